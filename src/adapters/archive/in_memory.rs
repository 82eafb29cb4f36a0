//! In-memory archive sink for tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ArchiveError, ArchiveRecord, ArchiveSink};

#[derive(Debug, Clone, Default)]
pub struct InMemoryArchiveSink {
    records: Arc<RwLock<Vec<ArchiveRecord>>>,
}

impl InMemoryArchiveSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in append order.
    pub async fn records(&self) -> Vec<ArchiveRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ArchiveSink for InMemoryArchiveSink {
    async fn append(&self, record: ArchiveRecord) -> Result<(), ArchiveError> {
        self.records.write().await.push(record);
        Ok(())
    }
}
