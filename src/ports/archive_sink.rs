//! Archive Sink Port - Append-only record of delivered scripts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Gender, SessionId, Timestamp};
use crate::domain::intake::{CompleteAnswers, FormatMode, ProjectType};
use crate::domain::script::Draft;

/// One delivered script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub timestamp: Timestamp,
    pub session_id: SessionId,
    pub name: String,
    pub project: ProjectType,
    pub gender: Gender,
    pub format: FormatMode,
    /// Attempts the retry loop used, including the accepted one.
    pub attempts: u32,
    pub script: String,
}

impl ArchiveRecord {
    pub fn from_delivery(session_id: SessionId, answers: &CompleteAnswers, draft: &Draft) -> Self {
        Self {
            timestamp: Timestamp::now(),
            session_id,
            name: answers.name.clone(),
            project: answers.project,
            gender: answers.gender,
            format: answers.format,
            attempts: draft.attempt,
            script: draft.text.clone(),
        }
    }
}

/// Errors that can occur while appending to the archive
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Failed to serialize archive record: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for the append-only archive
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// Appends one record. Records are never updated or removed.
    async fn append(&self, record: ArchiveRecord) -> Result<(), ArchiveError>;
}
