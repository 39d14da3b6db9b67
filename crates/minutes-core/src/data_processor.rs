use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A transcript read from disk, ready for summarization.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub path: PathBuf,
    pub content: String,
}

/// Finds and reads `.txt` transcripts under a directory.
#[derive(Default)]
pub struct TranscriptLoader {
    limit: Option<usize>,
}

impl TranscriptLoader {
    pub fn new() -> Self { Self::default() }

    pub fn with_limit(limit: usize) -> Self { Self { limit: Some(limit) } }

    /// Sorted `.txt` paths under `root`, truncated to the limit if one is set.
    pub fn list(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = list_txt_files(root);
        if let Some(limit) = self.limit {
            if files.len() > limit {
                files.truncate(limit);
                tracing::info!(limit, "Limited transcript listing");
            }
        }
        files
    }

    pub fn load_directory(&self, root: &Path) -> Result<Vec<Transcript>> {
        let files = self.list(root);
        if files.is_empty() {
            tracing::warn!(dir = %root.display(), "No .txt files found");
            return Ok(vec![]);
        }
        files.iter().map(|p| self.load_file(p)).collect()
    }

    pub fn load_file(&self, path: &Path) -> Result<Transcript> {
        let content = read_file_content(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Transcript { id: transcript_id(path), path: path.to_path_buf(), content })
    }
}

/// Reads UTF-8, falling back to lossy decoding for other encodings.
fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
    }
}

fn transcript_id(file_path: &Path) -> String {
    file_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "transcript".to_string())
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") { txt_files.push(path.to_path_buf()); }
    }
    txt_files.sort();
    txt_files
}
