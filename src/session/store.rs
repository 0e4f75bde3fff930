//! On-disk session persistence
//!
//! The session is stored as JSON in `session.json` under the data directory.
//! On unix the file is kept readable by the owner only, including when an
//! existing file is overwritten.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::token::Session;
use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};

/// Reads and writes the stored session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the session file in `paths`
    pub fn new(paths: &ExpensePaths) -> Self {
        Self {
            path: paths.session_file(),
        }
    }

    /// Load the stored session, if any
    pub fn load(&self) -> ExpenseResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read session file: {}", e)))?;

        let session: Session = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Session(format!("Stored session is unreadable: {}", e)))?;

        Ok(Some(session))
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &Session) -> ExpenseResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ExpenseError::Io(format!("Failed to create data directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ExpenseError::Json(format!("Failed to serialize session: {}", e)))?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open session file: {}", e)))?;

        // The open mode only applies to new files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(|e| ExpenseError::Io(format!("Failed to restrict session file: {}", e)))?;
        }
        file.write_all(json.as_bytes())
            .map_err(|e| ExpenseError::Io(format!("Failed to write session file: {}", e)))?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the stored session; returns whether one existed
    pub fn clear(&self) -> ExpenseResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&self.path)
            .map_err(|e| ExpenseError::Io(format!("Failed to remove session file: {}", e)))?;

        debug!(path = %self.path.display(), "session cleared");
        Ok(true)
    }

    /// Path of the session file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
