use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::doc::{PropertyStore, PropsError, Scope};

/// File-backed property store.
///
/// Document-scoped keys live in a sidecar JSON file next to the draft
/// (`draft.txt` → `draft.txt.props.json`); user-scoped keys live in one
/// config-dir file shared across documents. Each `set` writes through
/// immediately — last writer wins, no transaction.
#[derive(Debug)]
pub struct FileProps {
    doc_path: PathBuf,
    user_path: PathBuf,
    doc: HashMap<String, String>,
    user: HashMap<String, String>,
}

impl FileProps {
    /// Open the stores for a draft file, using the default user-scope path
    pub fn open(document_file: &Path) -> Self {
        FileProps::open_at(sidecar_path(document_file), user_props_path())
    }

    /// Open with explicit file locations (tests point both at a temp dir)
    pub fn open_at(doc_path: PathBuf, user_path: PathBuf) -> Self {
        let doc = read_map(&doc_path);
        let user = read_map(&user_path);
        FileProps {
            doc_path,
            user_path,
            doc,
            user,
        }
    }
}

impl PropertyStore for FileProps {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        let map = match scope {
            Scope::Document => &self.doc,
            Scope::User => &self.user,
        };
        map.get(key).cloned()
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<(), PropsError> {
        let (map, path) = match scope {
            Scope::Document => (&mut self.doc, &self.doc_path),
            Scope::User => (&mut self.user, &self.user_path),
        };
        map.insert(key.to_string(), value.to_string());
        write_map(path, map)
    }
}

/// Sidecar path for a draft file: append `.props.json` to the file name
pub fn sidecar_path(document_file: &Path) -> PathBuf {
    let mut name = document_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".props.json");
    document_file.with_file_name(name)
}

/// User-scope store path, respecting XDG_CONFIG_HOME
pub fn user_props_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("tagboard").join("user.json")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read a property file. Missing → empty. Corrupted → back up as .bak, warn,
/// start empty (callers re-initialize defaults lazily).
fn read_map(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(map) => map,
            Err(e) => {
                let bak = path.with_extension("json.bak");
                let _ = fs::copy(path, &bak);
                eprintln!(
                    "warning: could not parse {} (backed up as {}): {}",
                    path.display(),
                    bak.display(),
                    e
                );
                HashMap::new()
            }
        },
        Err(_) => HashMap::new(),
    }
}

fn write_map(path: &Path, map: &HashMap<String, String>) -> Result<(), PropsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PropsError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    let content = serde_json::to_string_pretty(map)?;
    fs::write(path, content).map_err(|e| PropsError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> FileProps {
        FileProps::open_at(
            dir.path().join("draft.txt.props.json"),
            dir.path().join("user.json"),
        )
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let mut props = open_in(&dir);
        props.set(Scope::Document, "K", "doc-value").unwrap();
        props.set(Scope::User, "K", "user-value").unwrap();

        let props = open_in(&dir);
        assert_eq!(props.get(Scope::Document, "K").as_deref(), Some("doc-value"));
        assert_eq!(props.get(Scope::User, "K").as_deref(), Some("user-value"));
    }

    #[test]
    fn missing_files_start_empty() {
        let dir = TempDir::new().unwrap();
        let props = open_in(&dir);
        assert_eq!(props.get(Scope::Document, "K"), None);
    }

    #[test]
    fn corrupted_file_is_backed_up_and_reset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.txt.props.json");
        fs::write(&path, "{{{ not json").unwrap();

        let props = open_in(&dir);
        assert_eq!(props.get(Scope::Document, "K"), None);
        assert!(dir.path().join("draft.txt.props.json.bak").exists());
    }

    #[test]
    fn sidecar_path_appends_suffix() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/draft.txt")),
            PathBuf::from("/tmp/draft.txt.props.json")
        );
    }
}
