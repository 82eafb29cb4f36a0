//! JSON Lines archive sink.
//!
//! Each record is one JSON object on its own line. The file is opened in
//! append mode for every record and never rewritten.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ports::{ArchiveError, ArchiveRecord, ArchiveSink};

#[derive(Debug)]
pub struct JsonlArchiveSink {
    path: PathBuf,
    /// Serializes appends so concurrent sessions never interleave lines.
    write_lock: Mutex<()>,
}

impl JsonlArchiveSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArchiveSink for JsonlArchiveSink {
    async fn append(&self, record: ArchiveRecord) -> Result<(), ArchiveError> {
        let mut line = serde_json::to_string(&record)
            .map_err(|e| ArchiveError::SerializationFailed(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ArchiveError::Io(e.to_string()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| ArchiveError::Io(e.to_string()))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| ArchiveError::Io(e.to_string()))?;
        file.flush().await.map_err(|e| ArchiveError::Io(e.to_string()))
    }
}
