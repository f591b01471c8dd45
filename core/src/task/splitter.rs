//! Decomposes one free-text objective into independent sub-tasks.
//!
//! Segmentation rules:
//! - sentences end at a newline, at `。`, or at a `.` followed by whitespace or
//!   the end of the text (so `LoginForm.tsx` stays intact);
//! - with target files, every file claims the sentences that mention it or use
//!   a universal-scope keyword, and a sentence may be claimed by several files;
//! - without target files, list separators (`,` `、`) fan a sentence out.

use serde::Serialize;

use super::id_gen::{generate_batch_id, sub_task_id};
use super::types::{Priority, TaskDescriptor};

/// Minutes of work assumed per sub-task for the display estimate.
pub const MINUTES_PER_TASK: usize = 10;

const SCOPE_WORDS: &[&str] = &["all", "each"];
const SCOPE_SUBSTRINGS: &[&str] = &["全て", "すべて", "各"];
const LIST_SEPARATORS: &[char] = &[',', '、'];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub batch_id: String,
    pub tasks: Vec<TaskDescriptor>,
    pub estimated_time: String,
    pub total_files: usize,
}

/// Split with a freshly generated batch id.
pub fn split(description: &str, target_files: &[String]) -> SplitResult {
    split_with_batch_id(&generate_batch_id(), description, target_files)
}

pub fn split_with_batch_id(
    batch_id: &str,
    description: &str,
    target_files: &[String],
) -> SplitResult {
    let segments = split_instructions(description, target_files);

    let tasks: Vec<TaskDescriptor> = segments
        .into_iter()
        .enumerate()
        .map(|(index, instructions)| {
            let file = target_files
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("task-{}.md", index + 1));
            TaskDescriptor::new(sub_task_id(batch_id, index), file.clone(), instructions, file)
                .with_priority(Priority::for_position(index))
        })
        .collect();

    tracing::debug!(
        batch_id = %batch_id,
        task_count = tasks.len(),
        target_files = target_files.len(),
        "description split into sub-tasks"
    );

    SplitResult {
        batch_id: batch_id.to_string(),
        estimated_time: format_estimated_time(tasks.len()),
        total_files: tasks.len(),
        tasks,
    }
}

/// Per-task instruction text, in dispatch order. Never empty.
pub fn split_instructions(description: &str, target_files: &[String]) -> Vec<String> {
    let sentences = split_sentences(description);
    let mut tasks = Vec::new();

    if !target_files.is_empty() {
        for file in target_files {
            let relevant: Vec<&str> = sentences
                .iter()
                .map(String::as_str)
                .filter(|s| mentions_file(s, file) || has_scope_keyword(s))
                .collect();
            if relevant.is_empty() {
                tasks.push(file.clone());
            } else {
                tasks.push(format!("{}: {}", file, relevant.join(". ")));
            }
        }
    } else {
        for sentence in sentences {
            if sentence.contains(LIST_SEPARATORS) {
                tasks.extend(
                    sentence
                        .split(LIST_SEPARATORS)
                        .map(str::trim)
                        .filter(|part| !part.is_empty())
                        .map(str::to_string),
                );
            } else {
                tasks.push(sentence);
            }
        }
    }

    if tasks.is_empty() {
        vec![description.to_string()]
    } else {
        tasks
    }
}

pub fn split_sentences(description: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = description.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\n' | '。' => flush_sentence(&mut current, &mut sentences),
            '.' if chars.peek().map_or(true, |next| next.is_whitespace()) => {
                flush_sentence(&mut current, &mut sentences)
            }
            _ => current.push(ch),
        }
    }
    flush_sentence(&mut current, &mut sentences);

    sentences
}

fn flush_sentence(current: &mut String, out: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
    current.clear();
}

fn mentions_file(sentence: &str, file: &str) -> bool {
    if sentence.contains(file) {
        return true;
    }
    let base = file.rsplit(['/', '\\']).next().unwrap_or(file);
    !base.is_empty() && base != file && sentence.contains(base)
}

fn has_scope_keyword(sentence: &str) -> bool {
    if SCOPE_SUBSTRINGS.iter().any(|k| sentence.contains(k)) {
        return true;
    }
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| SCOPE_WORDS.iter().any(|k| word.eq_ignore_ascii_case(k)))
}

/// `10 minutes × count`, rendered as `40m`, `1h 30m` or `2h`.
pub fn format_estimated_time(task_count: usize) -> String {
    let minutes = task_count * MINUTES_PER_TASK;
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if remaining > 0 {
        format!("{}h {}m", hours, remaining)
    } else {
        format!("{}h", hours)
    }
}
