use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Token file name in the data directory.
const TOKENS_FILE: &str = "tokens.json";

/// The persisted token pair. Field names are the store's fixed keys;
/// nothing else about a session is ever written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenPair {
    access_token: String,
    refresh_token: String,
}

/// On-disk store for the bearer token pair.
///
/// Absence of the file (or an empty access token) means logged out; the
/// access token's presence is the sole signal used to attempt session
/// restore at boot. The refresh token is persisted alongside it but is
/// not exchanged anywhere in this client.
pub struct TokenStore {
    data_dir: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn tokens_path(&self) -> PathBuf {
        self.data_dir.join(TOKENS_FILE)
    }

    fn read(&self) -> Option<TokenPair> {
        let path = self.tokens_path();
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable token file, treating as logged out");
                None
            }
        }
    }

    /// The stored access token, if any. An empty string counts as absent.
    pub fn access_token(&self) -> Option<String> {
        self.read()
            .map(|p| p.access_token)
            .filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read()
            .map(|p| p.refresh_token)
            .filter(|t| !t.is_empty())
    }

    /// Persist both tokens, replacing whatever was stored before.
    pub fn save(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        let path = self.tokens_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create token store directory")?;
        }
        let pair = TokenPair {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        };
        let contents = serde_json::to_string_pretty(&pair)?;
        std::fs::write(&path, contents).context("Failed to write token file")?;
        Ok(())
    }

    /// Remove both tokens. Idempotent.
    pub fn clear(&self) -> Result<()> {
        let path = self.tokens_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_means_logged_out() {
        let dir = TempDir::new().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn test_save_then_read_back() {
        let dir = TempDir::new().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        store.save("t1", "t2").expect("save");
        assert_eq!(store.access_token().as_deref(), Some("t1"));
        assert_eq!(store.refresh_token().as_deref(), Some("t2"));
    }

    #[test]
    fn test_empty_access_token_counts_as_absent() {
        let dir = TempDir::new().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        // Refresh token defaults to empty when the server omits it
        store.save("t1", "").expect("save");
        assert_eq!(store.access_token().as_deref(), Some("t1"));
        assert!(store.refresh_token().is_none());

        store.save("", "").expect("save");
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_clear_removes_both_tokens() {
        let dir = TempDir::new().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        store.save("t1", "t2").expect("save");
        store.clear().expect("clear");
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        // Clearing again is fine
        store.clear().expect("clear twice");
    }

    #[test]
    fn test_corrupt_file_treated_as_logged_out() {
        let dir = TempDir::new().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("tokens.json"), "not json").expect("write");
        assert!(store.access_token().is_none());
    }
}
