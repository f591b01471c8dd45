use chrono::Local;
use uuid::Uuid;

/// Batch id format: task-{YYYYMMDDHHmmss}-{random8}
pub fn generate_batch_id() -> String {
    let ts = Local::now().format("%Y%m%d%H%M%S");
    let uuid = Uuid::new_v4().simple().to_string();
    let suffix = &uuid[..8];
    format!("task-{}-{}", ts, suffix)
}

/// Sub-task ids are `{batch_id}-{n}` with a 1-based ordinal.
pub fn sub_task_id(batch_id: &str, index: usize) -> String {
    format!("{}-{}", batch_id, index + 1)
}
