use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::Result;
use crate::processing::{DocumentLoader, LoadReport};

/// Process-wide cache of the data folder scan.
///
/// The folder is scanned on first use and the result is shared by every
/// session until `reload` is called.
#[derive(Clone)]
pub struct DocumentLibrary {
    loader: DocumentLoader,
    report: Arc<RwLock<Option<Arc<LoadReport>>>>,
}

impl DocumentLibrary {
    pub fn new(loader: DocumentLoader) -> Self {
        Self {
            loader,
            report: Arc::new(RwLock::new(None)),
        }
    }

    pub fn loader(&self) -> &DocumentLoader {
        &self.loader
    }

    pub async fn snapshot(&self) -> Result<Arc<LoadReport>> {
        if let Some(report) = self.report.read().await.as_ref() {
            return Ok(Arc::clone(report));
        }

        let mut guard = self.report.write().await;
        // Another request may have finished the scan while we waited.
        if let Some(report) = guard.as_ref() {
            return Ok(Arc::clone(report));
        }

        let report = Arc::new(self.loader.load_all().await?);
        *guard = Some(Arc::clone(&report));
        Ok(report)
    }

    /// Drop the cached scan and read the folder again.
    pub async fn reload(&self) -> Result<Arc<LoadReport>> {
        let mut guard = self.report.write().await;
        guard.take();

        tracing::info!(folder = %self.loader.folder().display(), "Reloading documents");
        let report = Arc::new(self.loader.load_all().await?);
        *guard = Some(Arc::clone(&report));
        Ok(report)
    }

    /// The last scan, without scanning if there is none yet.
    pub async fn cached(&self) -> Option<Arc<LoadReport>> {
        self.report.read().await.clone()
    }

    pub async fn is_cached(&self) -> bool {
        self.report.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentsConfig;

    fn library(folder: &std::path::Path) -> DocumentLibrary {
        DocumentLibrary::new(DocumentLoader::new(&DocumentsConfig {
            data_folder: folder.to_path_buf(),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn test_snapshot_is_cached_until_reload() {
        let dir = tempfile::tempdir().unwrap();
        let library = library(dir.path());

        assert!(!library.is_cached().await);
        let first = library.snapshot().await.unwrap();
        assert!(library.is_cached().await);

        let second = library.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let reloaded = library.reload().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let library = library(dir.path());

        let before = library.snapshot().await.unwrap();
        assert!(matches!(
            before.status,
            crate::models::LoadStatus::NoSupportedFiles { .. }
        ));

        std::fs::write(dir.path().join("broken.pdf"), b"not really a pdf").unwrap();

        let cached = library.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&before, &cached));

        let after = library.reload().await.unwrap();
        assert_eq!(after.summary.total_files, 1);
        assert_eq!(after.summary.failed_loads, 1);
    }
}
