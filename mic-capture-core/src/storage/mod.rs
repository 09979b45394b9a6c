pub mod metadata;
pub mod unique_path;
pub mod wav_writer;
