//! `docent init`: lay out a working directory for a first run.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::i18n::BUNDLED;

pub const DATA_DIR: &str = "data";
pub const TRANSLATIONS_DIR: &str = "translations";
pub const AUDIO_DIR: &str = "audio_responses";

const ENV_TEMPLATE: &str = "\
# Chat model
OPENAI_API_KEY=your_openai_api_key_here
# LLM_MODEL=openai/gpt-3.5-turbo
# LLM_BASE_URL=
# LLM_MAX_TOKENS=1500
# LLM_TEMPERATURE=0.3

# Text-to-speech
# SPEECH_ENABLED=true
# SPEECH_VOICE=alloy
SPEECH_CACHE_DIR=audio_responses

# Documents and UI
DATA_FOLDER=data
TRANSLATIONS_DIR=translations
# DEFAULT_LANGUAGE=en

# Server
# DOCENT_HOST=127.0.0.1
# DOCENT_PORT=8501
RUST_LOG=docent=info,tower_http=info
";

/// Paths created by [`init_project`]. Existing files are never touched.
#[derive(Debug, Default)]
pub struct InitReport {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub fn init_project(root: &Path) -> Result<InitReport> {
    let mut report = InitReport::default();

    for dir in [DATA_DIR, TRANSLATIONS_DIR, AUDIO_DIR] {
        let path = root.join(dir);
        if path.is_dir() {
            report.skipped.push(path);
        } else {
            std::fs::create_dir_all(&path)?;
            report.created.push(path);
        }
    }

    for (code, raw) in BUNDLED {
        write_if_missing(&root.join(TRANSLATIONS_DIR).join(format!("{code}.json")), raw, &mut report)?;
    }

    write_if_missing(&root.join(".env"), ENV_TEMPLATE, &mut report)?;

    Ok(report)
}

fn write_if_missing(path: &Path, contents: &str, report: &mut InitReport) -> Result<()> {
    if path.exists() {
        report.skipped.push(path.to_path_buf());
    } else {
        std::fs::write(path, contents)?;
        report.created.push(path.to_path_buf());
    }
    Ok(())
}
