//! Persistence of the authenticated [`Session`].

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use derive_more::{Display, Error, From};
use service::domain::user::Session;

use crate::{AsError, Error as AppError};

/// Storage of the current [`Session`].
pub trait Store {
    /// Loads the stored [`Session`], if any.
    ///
    /// # Errors
    ///
    /// If the stored [`Session`] cannot be read.
    fn load(&self) -> Result<Option<Session>, StoreError>;

    /// Replaces the stored [`Session`].
    ///
    /// # Errors
    ///
    /// If the [`Session`] cannot be written.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Removes the stored [`Session`], if any.
    ///
    /// # Errors
    ///
    /// If the stored [`Session`] cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;
}

/// [`Store`] keeping the [`Session`] as a JSON file.
#[derive(Clone, Debug)]
pub struct File {
    /// Path of the file.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] [`Store`] at the provided `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for File {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory [`Store`].
#[derive(Debug, Default)]
pub struct Memory(Mutex<Option<Session>>);

impl Store for Memory {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.0.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Error of a [`Store`] operation.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    /// Stored [`Session`] is not accessible.
    #[display("session file is not accessible: {_0}")]
    Io(io::Error),

    /// Stored [`Session`] is malformed.
    #[display("session file is malformed: {_0}")]
    Json(serde_json::Error),
}

impl AsError for StoreError {
    fn try_as_error(&self) -> Option<AppError> {
        Some(AppError {
            code: "SESSION_STORE_ERROR",
            message: "No se pudo acceder a la sesión guardada".to_owned(),
            backtrace: None,
        })
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use service::domain::user::{session::Token, Session, User};

    use super::{File, Store as _};

    pub(crate) fn session(token: &str) -> Session {
        Session {
            token: Token::from(token.to_owned()),
            user: serde_json::from_value::<User>(serde_json::json!({
                "id": 1,
                "name": "Rosa Quispe",
                "email": "rosa@inmobiliaria.pe",
            }))
            .unwrap(),
        }
    }

    #[test]
    fn file_keeps_token_and_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = File::new(dir.path().join("nested/session.json"));
        assert!(store.load().unwrap().is_none());

        store.save(&session("abc")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap())
                .unwrap();
        assert_eq!(raw["token"], "abc");
        assert_eq!(raw["user"]["email"], "rosa@inmobiliaria.pe");
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token.to_string(), "abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn file_rejects_malformed_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(File::new(path).load().is_err());
    }
}
