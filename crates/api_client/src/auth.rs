//! Credential storage for the ERP API.
//!
//! Sign-in state lives in one JSON file, 0600 on Unix. The path is
//! injectable so tests never touch the real config directory, same as
//! the engine's recency store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Authentication credentials stored locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCredentials {
    /// Bearer token for the ERP API
    pub token: String,
    /// API base URL (e.g., "https://erp.example.com")
    pub api_base: String,
    /// User slug (for display)
    #[serde(default)]
    pub user_slug: Option<String>,
    /// User email (for display)
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthCredentials {
    pub fn new(token: String, api_base: String) -> Self {
        Self { token, api_base, user_slug: None, email: None }
    }
}

/// File-backed credential slot.
pub struct AuthStore {
    path: PathBuf,
}

impl AuthStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.config/ledgerdesk/auth.json` (platform equivalent).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ledgerdesk")
            .join("auth.json")
    }

    /// Load saved credentials. A missing or unparseable file means
    /// signed out, never an error.
    pub fn load(&self) -> Option<AuthCredentials> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Persist credentials, creating the parent directory as needed.
    /// The file is chmod 0600 on Unix: it holds a bearer token.
    pub fn save(&self, creds: &AuthCredentials) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let contents = serde_json::to_string_pretty(creds)
            .map_err(|e| format!("Failed to serialize credentials: {}", e))?;

        std::fs::write(&self.path, &contents)
            .map_err(|e| format!("Failed to write auth file: {}", e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|e| format!("Failed to set file permissions: {}", e))?;
        }

        Ok(())
    }

    /// Sign out: remove the credential file. Already-absent is fine.
    pub fn delete(&self) -> Result<(), String> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| format!("Failed to delete auth file: {}", e))?;
        }
        Ok(())
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> AuthStore {
        AuthStore::new(dir.path().join("nested").join("auth.json"))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let mut creds = AuthCredentials::new("tok123".into(), "https://erp.test".into());
        creds.user_slug = Some("alice".into());
        store.save(&creds).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "tok123");
        assert_eq!(loaded.api_base, "https://erp.test");
        assert_eq!(loaded.user_slug.as_deref(), Some("alice"));
        assert!(loaded.email.is_none());
    }

    #[test]
    fn missing_or_corrupt_file_loads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert!(store.load().is_none());

        let path = dir.path().join("auth.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AuthStore::new(path).load().is_none());
    }

    #[test]
    fn optional_fields_may_be_absent_on_disk() {
        let json = r#"{"token":"tok","api_base":"https://erp.example.com"}"#;
        let parsed: AuthCredentials = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.token, "tok");
        assert!(parsed.user_slug.is_none());
        assert!(parsed.email.is_none());
    }

    #[test]
    fn delete_signs_out_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .save(&AuthCredentials::new("tok".into(), "https://erp.test".into()))
            .unwrap();
        assert!(store.load().is_some());

        store.delete().unwrap();
        assert!(store.load().is_none());
        // Deleting again is not an error
        store.delete().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store
            .save(&AuthCredentials::new("tok".into(), "https://erp.test".into()))
            .unwrap();

        let mode = std::fs::metadata(dir.path().join("nested").join("auth.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn default_path_is_under_ledgerdesk() {
        let path = AuthStore::default_path();
        assert!(path.to_string_lossy().contains("ledgerdesk"));
        assert!(path.to_string_lossy().ends_with("auth.json"));
    }
}
