use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    models::Catalog,
    services::sources::{parse_csv, CatalogSource},
};

/// Catalog read from a CSV file on disk
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for LocalFileSource {
    async fn load(&self) -> AppResult<Catalog> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to read catalog file");
            AppError::Io(e)
        })?;

        let catalog = parse_csv(&bytes, &self.describe())?;

        tracing::info!(
            path = %self.path.display(),
            rows = catalog.len(),
            "Catalog loaded from file"
        );

        Ok(catalog)
    }

    /// Modification time and length of the file
    async fn fingerprint(&self) -> AppResult<Option<String>> {
        let metadata = tokio::fs::metadata(&self.path).await?;
        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        Ok(Some(format!("{}:{}", modified, metadata.len())))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let file = write_csv("Name,Director\nHeat,Michael Mann\nAlien,Ridley Scott\n");
        let source = LocalFileSource::new(file.path());

        let catalog = source.load().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalFileSource::new(dir.path().join("missing.csv"));

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_fingerprint_changes_with_contents() {
        let mut file = write_csv("Name\nHeat\n");
        let source = LocalFileSource::new(file.path());
        let before = source.fingerprint().await.unwrap();

        file.write_all(b"Alien\n").unwrap();
        file.flush().unwrap();
        let after = source.fingerprint().await.unwrap();

        assert!(before.is_some());
        assert_ne!(before, after);
    }
}
