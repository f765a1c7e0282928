use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Reads inputs relative to one directory and writes outputs relative to another.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.input_dir.join(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.output_dir.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_between_directories() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("neighbourhoods.csv"), "Allston\n").unwrap();

        let storage = LocalStorage::new(input.path(), output.path().join("nested"));

        let data = storage.read_file("neighbourhoods.csv").await.unwrap();
        assert_eq!(data, b"Allston\n");

        storage.write_file("report.zip", b"zip").await.unwrap();
        assert!(output.path().join("nested").join("report.zip").exists());
    }

    #[tokio::test]
    async fn test_missing_input_is_io_error() {
        let input = TempDir::new().unwrap();
        let storage = LocalStorage::new(input.path(), input.path());

        let err = storage.read_file("missing.csv").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::ScoutError::IoError(_)));
    }
}
