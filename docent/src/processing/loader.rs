use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::DocumentsConfig;
use crate::error::{DocentError, Result};
use crate::models::{Document, DocumentKind, FailedLoad, LibrarySummary, LoadStatus};
use crate::processing::extractors::{DocxExtractor, ExtractedContent, PdfExtractor};

/// Everything produced by one scan of the data folder.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub folder: PathBuf,
    /// Keyed and ordered by file name.
    pub documents: BTreeMap<String, Document>,
    pub summary: LibrarySummary,
    pub status: LoadStatus,
}

impl LoadReport {
    fn empty(folder: &Path, status: LoadStatus) -> Self {
        Self {
            folder: folder.to_path_buf(),
            documents: BTreeMap::new(),
            summary: LibrarySummary::default(),
            status,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.documents.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DocumentLoader {
    folder: PathBuf,
    extensions: Vec<String>,
    min_docx_chars: usize,
}

impl DocumentLoader {
    pub fn new(config: &DocumentsConfig) -> Self {
        Self {
            folder: config.data_folder.clone(),
            extensions: config.supported_extensions.clone(),
            min_docx_chars: config.min_docx_chars,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Scan the folder on the blocking pool.
    pub async fn load_all(&self) -> Result<LoadReport> {
        let loader = self.clone();
        tokio::task::spawn_blocking(move || loader.load_blocking())
            .await
            .map_err(|e| DocentError::Internal(format!("Document loading task failed: {e}")))
    }

    pub fn load_blocking(&self) -> LoadReport {
        let folder_label = self.folder.display().to_string();

        if !self.folder.is_dir() {
            tracing::warn!(folder = %folder_label, "Data folder not found");
            return LoadReport::empty(
                &self.folder,
                LoadStatus::FolderNotFound {
                    folder: folder_label,
                },
            );
        }

        let entries = match Self::list_entries(&self.folder) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(folder = %folder_label, error = %e, "Failed to read data folder");
                return LoadReport::empty(
                    &self.folder,
                    LoadStatus::FolderNotFound {
                        folder: folder_label,
                    },
                );
            }
        };

        let supported: Vec<&PathBuf> = entries
            .iter()
            .filter(|path| path.is_file() && self.is_supported(path))
            .collect();

        tracing::info!(folder = %folder_label, count = supported.len(), "Found supported files");

        if supported.is_empty() {
            let files = entries.iter().filter_map(|path| file_name(path)).collect();
            return LoadReport::empty(
                &self.folder,
                LoadStatus::NoSupportedFiles {
                    folder: folder_label,
                    files,
                },
            );
        }

        let mut documents = BTreeMap::new();
        let mut failed_files = Vec::new();
        let mut total_files = 0;
        let mut total_words = 0;
        let mut total_pages = 0;
        let mut total_size = 0;

        for path in supported {
            let Some(name) = file_name(path) else {
                continue;
            };
            let Some(kind) = DocumentKind::from_path(path) else {
                tracing::warn!(file = %name, "Unsupported file type");
                continue;
            };

            total_files += 1;
            tracing::info!(file = %name, kind = %kind, "Processing document");

            match self.extract(path, kind) {
                Ok(extracted) if extracted.has_content() => {
                    let metadata = extracted.metadata;
                    total_words += metadata.word_count;
                    total_pages += metadata.page_equivalent();
                    total_size += metadata.file_size;
                    tracing::info!(file = %name, words = metadata.word_count, "Loaded document");

                    documents.insert(
                        name.clone(),
                        Document {
                            name,
                            content: extracted.text.unwrap_or_default(),
                            metadata,
                            file_path: path.clone(),
                        },
                    );
                }
                Ok(extracted) => {
                    tracing::warn!(file = %name, "No content extracted");
                    failed_files.push(FailedLoad {
                        file: name,
                        reason: "No content extracted".to_string(),
                        metadata: Some(extracted.metadata),
                    });
                }
                Err(e) => {
                    tracing::error!(file = %name, error = %e, "Error processing document");
                    failed_files.push(FailedLoad {
                        file: name,
                        reason: e.to_string(),
                        metadata: None,
                    });
                }
            }
        }

        let successful_loads = documents.len();
        let failed_loads = failed_files.len();

        let status = if successful_loads == 0 {
            LoadStatus::AllFailed {
                failures: failed_files.clone(),
            }
        } else if failed_loads > 0 {
            LoadStatus::Partial {
                success: successful_loads,
                total: total_files,
                failed: failed_loads,
            }
        } else {
            LoadStatus::AllLoaded {
                success: successful_loads,
                total: total_files,
            }
        };

        LoadReport {
            folder: self.folder.clone(),
            documents,
            summary: LibrarySummary {
                total_files,
                successful_loads,
                failed_loads,
                failed_files,
                total_words,
                total_pages,
                total_size,
                estimated_reading_time: LibrarySummary::reading_time_for(total_words),
            },
            status,
        }
    }

    fn extract(&self, path: &Path, kind: DocumentKind) -> Result<ExtractedContent> {
        let bytes = std::fs::read(path)?;
        let file_size = bytes.len() as u64;

        match kind {
            DocumentKind::Pdf => PdfExtractor::extract(&bytes, file_size),
            DocumentKind::Docx => Ok(DocxExtractor::extract(
                &bytes,
                file_size,
                self.min_docx_chars,
            )),
        }
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Directory entries sorted by file name.
    fn list_entries(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(folder)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(entries)
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}
