use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::error::CaptureError;
use crate::models::sample_buffer::SampleBuffer;
use crate::processing::wav_format;
use crate::storage::unique_path;

/// Write `buffer` as a new WAV file in `directory` and return its path.
///
/// The directory is created if missing and the file name is made unique
/// with numeric suffixes. The file only appears under its final name once
/// it is completely written; on any failure nothing is left behind.
pub fn save_wav(
    buffer: &SampleBuffer,
    directory: &Path,
    base_name: &str,
    max_attempts: u32,
) -> Result<PathBuf, CaptureError> {
    fs::create_dir_all(directory).map_err(|e| CaptureError::io(directory, e))?;

    let file_path = unique_path::resolve_unique_path(directory, base_name, max_attempts)?;
    write_atomically(&file_path, |writer| wav_format::write_wav(writer, buffer))?;

    log::info!(
        "Saved {} samples ({:.2}s) to {}",
        buffer.len(),
        buffer.duration().as_secs_f64(),
        file_path.display()
    );
    Ok(file_path)
}

/// Run `write` against a temporary sibling of `file_path`, then rename it into place.
fn write_atomically<F>(file_path: &Path, write: F) -> Result<(), CaptureError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let temp_path = temp_path_for(file_path);

    let result = File::create(&temp_path)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.flush()?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()
        })
        .map_err(|e| CaptureError::io(&temp_path, e))
        .and_then(|()| fs::rename(&temp_path, file_path).map_err(|e| CaptureError::io(file_path, e)));

    if result.is_err() {
        if let Err(e) = fs::remove_file(&temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("Failed to remove temporary file {}: {}", temp_path.display(), e);
            }
        }
    }
    result
}

fn temp_path_for(file_path: &Path) -> PathBuf {
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4().simple()))
}

/// Compute SHA-256 hex digest of a file.
pub fn sha256_file(path: &Path) -> Result<String, CaptureError> {
    let data = fs::read(path).map_err(|e| CaptureError::io(path, e))?;
    let digest = Sha256::digest(&data);
    Ok(hex_encode(&digest))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn saves_encoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SampleBuffer::new(vec![0.5, -0.5, 0.0, 1.0], 8000, 2);

        let path = save_wav(&buffer, dir.path(), "take", 10).unwrap();

        assert_eq!(path, dir.path().join("take.wav"));
        assert_eq!(fs::read(&path).unwrap(), wav_format::encode(&buffer));
        assert_eq!(file_names(dir.path()), vec!["take.wav"]);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let buffer = SampleBuffer::new(vec![0.0; 4], 8000, 1);

        let path = save_wav(&buffer, &nested, "clip", 10).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn second_save_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let first = SampleBuffer::new(vec![0.1; 4], 8000, 1);
        let second = SampleBuffer::new(vec![0.2; 8], 8000, 1);

        let a = save_wav(&first, dir.path(), "clip", 10).unwrap();
        let b = save_wav(&second, dir.path(), "clip", 10).unwrap();

        assert_eq!(b, dir.path().join("clip_1.wav"));
        assert_eq!(fs::read(&a).unwrap(), wav_format::encode(&first));
        assert_eq!(fs::read(&b).unwrap(), wav_format::encode(&second));
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("broken.wav");

        let err = write_atomically(&target, |writer| {
            writer.write_all(b"RIFF")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        })
        .unwrap_err();

        assert!(matches!(err, CaptureError::Io { .. }));
        assert!(file_names(dir.path()).is_empty());
    }

    #[test]
    fn directory_that_is_a_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let buffer = SampleBuffer::new(vec![0.0; 4], 8000, 1);

        let err = save_wav(&buffer, &blocker, "clip", 10).unwrap_err();
        match err {
            CaptureError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn checksum_is_sha256_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.bin");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
