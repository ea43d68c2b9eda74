//! Persisted session store.
//!
//! A durable key-value space holding exactly two independent keys: the auth
//! token and the serialized user profile. Each key is readable and writable
//! on its own, so a corrupt user record never blocks token recovery. Writes
//! are last-write-wins with no transaction across the keys; a crash between
//! the two writes can leave them inconsistent, which hydration tolerates.
//!
//! The store is plaintext on purpose: the token must round-trip as-is and
//! encryption of persisted state is out of scope.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use freshcart_core::UserProfile;

use crate::session::AuthToken;

/// Errors from the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem read or write failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record failed to (de)serialize.
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable mirror of the session's token and user profile.
///
/// Implementations keep the two keys independent: a failure reading or
/// parsing one must not affect the other.
pub trait SessionStore {
    /// Read the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn load_token(&self) -> Result<Option<AuthToken>, StoreError>;

    /// Persist the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write fails.
    fn save_token(&self, token: &AuthToken) -> Result<(), StoreError>;

    /// Remove the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear_token(&self) -> Result<(), StoreError>;

    /// Read the stored user profile, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the record does not parse.
    fn load_user(&self) -> Result<Option<UserProfile>, StoreError>;

    /// Persist the user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write fails.
    fn save_user(&self, user: &UserProfile) -> Result<(), StoreError>;

    /// Remove the stored user profile. Removing an absent record is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear_user(&self) -> Result<(), StoreError>;
}

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// File-backed [`SessionStore`]: one file per key under a state directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }
}

/// Read a file, mapping a missing file to `None`.
fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Remove a file, treating a missing file as already removed.
fn remove_optional(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

impl SessionStore for FileStore {
    fn load_token(&self) -> Result<Option<AuthToken>, StoreError> {
        Ok(read_optional(&self.token_path())?.map(AuthToken::new))
    }

    fn save_token(&self, token: &AuthToken) -> Result<(), StoreError> {
        fs::write(self.token_path(), token.as_str())?;
        Ok(())
    }

    fn clear_token(&self) -> Result<(), StoreError> {
        remove_optional(&self.token_path())
    }

    fn load_user(&self) -> Result<Option<UserProfile>, StoreError> {
        match read_optional(&self.user_path())? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    fn save_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        let contents = serde_json::to_string(user)?;
        fs::write(self.user_path(), contents)?;
        Ok(())
    }

    fn clear_user(&self) -> Result<(), StoreError> {
        remove_optional(&self.user_path())
    }
}
