//! File-based Session Store Adapter
//!
//! Stores each session as a YAML file named after its id, so a console
//! session survives a restart of the process.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::SessionId;
use crate::domain::intake::Session;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
    fn session_path(&self, id: &SessionId) -> Result<PathBuf, SessionStoreError> {
        let safe = id
            .as_str()
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !safe {
            return Err(SessionStoreError::Backend(format!(
                "session id {:?} cannot be used as a file name",
                id.as_str()
            )));
        }
        Ok(self.base_path.join(format!("{}.yaml", id)))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let path = self.session_path(id)?;
        let yaml = match fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::Backend(e.to_string())),
        };

        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let path = self.session_path(session.id())?;
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::Backend(e.to_string()))?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(&path, yaml)
            .await
            .map_err(|e| SessionStoreError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn id(raw: &str) -> SessionId {
        SessionId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("sessions"));

        let mut session = Session::new(id("console"));
        session.apply_reply("Начать").unwrap();
        session.apply_reply("Комедия").unwrap();
        store.save(&session).await.unwrap();

        let loaded = store.load(&id("console")).await.unwrap();
        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        assert!(store.load(&id("absent")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_one_yaml_file_per_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        store.save(&Session::new(id("chat-1"))).await.unwrap();
        store.save(&Session::new(id("chat-2"))).await.unwrap();

        assert!(temp_dir.path().join("chat-1.yaml").exists());
        assert!(temp_dir.path().join("chat-2.yaml").exists());
    }

    #[tokio::test]
    async fn rejects_ids_unsafe_for_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        assert!(matches!(
            store.load(&id("../etc")).await,
            Err(SessionStoreError::Backend(_))
        ));
    }
}
