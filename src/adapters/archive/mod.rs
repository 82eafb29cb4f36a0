//! Archive sink adapters.
//!
//! - `InMemoryArchiveSink` - records kept in memory, for tests
//! - `JsonlArchiveSink` - append-only JSON Lines file

mod in_memory;
mod jsonl_file;

pub use in_memory::InMemoryArchiveSink;
pub use jsonl_file::JsonlArchiveSink;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Gender, SessionId, Timestamp};
    use crate::domain::intake::{FormatMode, ProjectType};
    use crate::ports::{ArchiveRecord, ArchiveSink};
    use tempfile::TempDir;

    fn record(name: &str) -> ArchiveRecord {
        ArchiveRecord {
            timestamp: Timestamp::now(),
            session_id: SessionId::new("chat-7").unwrap(),
            name: name.to_string(),
            project: ProjectType::Comedy,
            gender: Gender::Female,
            format: FormatMode::Universal,
            attempts: 2,
            script: "Добрый день!\nМеня зовут Анна.".to_string(),
        }
    }

    #[tokio::test]
    async fn in_memory_sink_keeps_append_order() {
        let sink = InMemoryArchiveSink::new();
        sink.append(record("first")).await.unwrap();
        sink.append(record("second")).await.unwrap();

        let names: Vec<_> = sink.records().await.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn jsonl_sink_writes_one_object_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let sink = JsonlArchiveSink::new(temp_dir.path().join("nested/archive.jsonl"));

        sink.append(record("Анна")).await.unwrap();
        sink.append(record("Мария")).await.unwrap();

        let content = tokio::fs::read_to_string(sink.path()).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: ArchiveRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.name, "Анна");
        assert_eq!(first.attempts, 2);
        assert_eq!(first.script, "Добрый день!\nМеня зовут Анна.");

        let raw: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(raw["project"], "comedy");
        assert_eq!(raw["gender"], "female");
        assert_eq!(raw["format"], "universal");
    }

    #[tokio::test]
    async fn jsonl_sink_appends_to_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("archive.jsonl");
        tokio::fs::write(&path, "{\"existing\":true}\n").await.unwrap();

        JsonlArchiveSink::new(&path)
            .append(record("Анна"))
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.starts_with("{\"existing\":true}\n"));
        assert_eq!(content.lines().count(), 2);
    }
}
