use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Text-source boundary: raw bytes in, nothing fancier.
///
/// Only plain-text formats are accepted here. Anything that needs real
/// decoding (PDF and friends) is an external collaborator's job; by the
/// time bytes reach this crate they must already be text.
pub struct FileReader;

impl FileReader {
    pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension {
            "txt" | "md" => {
                let bytes = fs::read(path)
                    .await
                    .context(format!("Failed to read file: {:?}", path))?;
                Ok(bytes)
            }
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }
}
