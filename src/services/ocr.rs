//! Thin binding around the Tesseract OCR binary
//!
//! Spawns `tesseract stdin stdout` per request and pipes the prepared PNG
//! through stdin. The language pack and recognition modes are a fixed
//! operating contract taken from configuration at startup, never derived
//! from the request. Recognition runs under a bounded timeout; the child
//! is killed when the timeout fires.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::OcrConfig;
use crate::utils::errors::{OcrError, Result};

#[derive(Debug, Clone)]
pub struct OcrService {
    binary: PathBuf,
    languages: String,
    engine_mode: u8,
    page_seg_mode: u8,
    timeout: Duration,
}

impl OcrService {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config
                .binary_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("tesseract")),
            languages: config.languages.join("+"),
            engine_mode: config.engine_mode,
            page_seg_mode: config.page_seg_mode,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn cli_args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.languages.clone(),
            "--oem".to_string(),
            self.engine_mode.to_string(),
            "--psm".to_string(),
            self.page_seg_mode.to_string(),
        ]
    }

    /// Run recognition over a prepared PNG and return the raw engine
    /// output.
    ///
    /// Whitespace-only output is a successful recognition that found no
    /// text; callers decide how to phrase that to the user.
    pub async fn recognize(&self, png: &[u8]) -> Result<String> {
        debug!(binary = %self.binary.display(), languages = %self.languages, "Spawning OCR engine");

        let mut child = Command::new(&self.binary)
            .args(self.cli_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| OcrError::Launch {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(png).await.map_err(OcrError::Io)?;
            // stdin drops here so the engine sees EOF
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| OcrError::Timeout(self.timeout))?
            .map_err(OcrError::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(OcrError::Failed(stderr).into());
        }

        let text = String::from_utf8(output.stdout).map_err(|_| OcrError::InvalidOutput)?;
        Ok(text)
    }
}
