use std::path::{Path, PathBuf};

use super::summary::BatchSummary;

/// Write the summary as pretty JSON to `<dir>/enkai-report-<unix millis>.json`,
/// creating `dir` if needed.
pub async fn save_report(dir: impl AsRef<Path>, summary: &BatchSummary) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(format!(
        "enkai-report-{}.json",
        summary.timestamp.timestamp_millis()
    ));
    let json = serde_json::to_string_pretty(summary)?;
    tokio::fs::write(&path, json).await?;

    tracing::debug!(path = %path.display(), "report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::JobResult;
    use crate::report::summarize;
    use crate::task::TaskDescriptor;

    #[tokio::test]
    async fn writes_json_into_new_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports");
        let task = TaskDescriptor::new("1", "A", "Create a", "a.ts");
        let summary = summarize(&[JobResult::succeeded(&task, 7)], 7).unwrap();

        let path = save_report(&dir, &summary).await.unwrap();
        assert!(path.starts_with(&dir));

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: crate::report::BatchSummary = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.total_tasks, 1);
        assert_eq!(back.tasks[0].task_id, "1");
    }
}
