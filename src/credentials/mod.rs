//! Credential storage: one API key in a local dotenv-style file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CREDENTIALS_FILE;
use crate::error::Result;

/// Variable name the API key is stored under.
pub const API_KEY_VAR: &str = "NULLBOT_API_KEY";

/// Loads and saves the API key from a `.nullbot` file.
///
/// The file holds plain KEY=VALUE lines; no encryption. Missing file or
/// missing variable reads as "no key configured" rather than an error.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by `.nullbot` in the working directory.
    pub fn new_default() -> Self {
        Self::new(CREDENTIALS_FILE)
    }

    /// Store backed by a specific file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the API key, if one is configured.
    pub fn load(&self) -> Result<Option<String>> {
        let iter = match dotenvy::from_path_iter(&self.path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "credential file not found");
                return Ok(None);
            }
            Err(dotenvy::Error::Io(e)) => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "credential file unreadable, treating as absent");
                return Ok(None);
            }
        };

        for item in iter {
            match item {
                Ok((key, value)) if key == API_KEY_VAR => {
                    if value.is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(value));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Save the API key, rewriting the managed line in place.
    ///
    /// Other KEY=VALUE lines in the file are preserved.
    pub fn save(&self, api_key: &str) -> Result<()> {
        let existing = std::fs::read_to_string(&self.path).unwrap_or_default();

        let mut lines: Vec<String> = Vec::new();
        let mut replaced = false;
        for line in existing.lines() {
            let is_managed = line
                .split_once('=')
                .map(|(k, _)| k.trim() == API_KEY_VAR)
                .unwrap_or(false);
            if is_managed {
                lines.push(format!("{API_KEY_VAR}={api_key}"));
                replaced = true;
            } else {
                lines.push(line.to_string());
            }
        }
        if !replaced {
            lines.push(format!("{API_KEY_VAR}={api_key}"));
        }

        let mut file = std::fs::File::create(&self.path)?;
        for line in &lines {
            writeln!(file, "{line}")?;
        }
        debug!(path = %self.path.display(), "API key saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join(".nullbot"))
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("sk-or-test-123").unwrap();
        assert_eq!(store.load().unwrap(), Some("sk-or-test-123".to_string()));
    }

    #[test]
    fn save_replaces_existing_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("old-key").unwrap();
        store.save("new-key").unwrap();
        assert_eq!(store.load().unwrap(), Some("new-key".to_string()));

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.matches(API_KEY_VAR).count(), 1);
    }

    #[test]
    fn save_preserves_unrelated_lines() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "OTHER_VAR=keep-me\n").unwrap();
        store.save("sk-123").unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("OTHER_VAR=keep-me"));
        assert!(contents.contains("NULLBOT_API_KEY=sk-123"));
    }

    #[test]
    fn load_file_without_key_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "OTHER_VAR=value\n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn load_empty_value_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "NULLBOT_API_KEY=\n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
