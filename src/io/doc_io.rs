use std::fs;
use std::path::{Path, PathBuf};

use crate::doc::MemDoc;

/// Error type for document file I/O
#[derive(Debug, thiserror::Error)]
pub enum DocIoError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Load a draft file: one paragraph per line. An empty file becomes a single
/// empty paragraph (documents are never paragraph-less).
pub fn load_document(path: &Path) -> Result<MemDoc, DocIoError> {
    let text = fs::read_to_string(path).map_err(|e| DocIoError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(MemDoc::from_lines(text.lines()))
}

/// Write the document back, one paragraph per line with a trailing newline
pub fn save_document(path: &Path, doc: &MemDoc) -> Result<(), DocIoError> {
    let mut content = doc.lines().collect::<Vec<_>>().join("\n");
    content.push('\n');
    fs::write(path, content).map_err(|e| DocIoError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
