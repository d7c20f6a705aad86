use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::Result;

/// On-disk cache of synthesized audio, keyed by model, voice and text.
#[derive(Debug, Clone)]
pub struct AudioFileCache {
    dir: PathBuf,
    model: String,
    format: String,
}

impl AudioFileCache {
    pub fn new(dir: impl Into<PathBuf>, model: &str, format: &str) -> Self {
        Self {
            dir: dir.into(),
            model: model.to_string(),
            format: format.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, voice: &str, text: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(self.model.as_bytes());
        hasher.update(b"|");
        hasher.update(voice.as_bytes());
        hasher.update(b"|");
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        self.dir.join(format!("{digest:x}.{}", self.format))
    }

    /// A missing or unreadable entry is a miss.
    pub async fn get(&self, voice: &str, text: &str) -> Option<Vec<u8>> {
        let path = self.path_for(voice, text);
        match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read cached audio");
                }
                None
            }
        }
    }

    pub async fn put(&self, voice: &str, text: &str, audio: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(voice, text);
        tokio::fs::write(&path, audio).await?;
        Ok(path)
    }
}
