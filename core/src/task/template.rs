use std::path::Path;

use serde::Deserialize;

use crate::error::TemplateError;

use super::types::{Complexity, Priority, TaskDescriptor};

/// One entry of a task template file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateTask {
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    output_path: Option<String>,
    /// Model alias (`flash`, `thinking`, `pro`) or full model id.
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    complexity: Option<Complexity>,
}

/// Parse a JSON array of `{ "fileName", "prompt", "outputPath" }` entries,
/// each optionally carrying `model` and `complexity`.
pub fn parse_template(content: &str) -> Result<Vec<TaskDescriptor>, TemplateError> {
    let entries: Vec<TemplateTask> = serde_json::from_str(content)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let prompt = entry
                .prompt
                .filter(|p| !p.trim().is_empty())
                .ok_or(TemplateError::MissingField {
                    index,
                    field: "prompt",
                })?;
            let output_path = entry
                .output_path
                .filter(|p| !p.trim().is_empty())
                .ok_or(TemplateError::MissingField {
                    index,
                    field: "outputPath",
                })?;
            let name = entry.file_name.unwrap_or_else(|| {
                Path::new(&output_path)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| output_path.clone())
            });

            let mut task =
                TaskDescriptor::new(format!("template-{}", index + 1), name, prompt, output_path)
                    .with_priority(Priority::for_position(index));
            task.model = entry.model.filter(|m| !m.trim().is_empty());
            task.complexity = entry.complexity;
            Ok(task)
        })
        .collect()
}

pub fn load_template(path: impl AsRef<Path>) -> Result<Vec<TaskDescriptor>, TemplateError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_template(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::types::TaskKind;
    use std::io::Write;

    const TEMPLATE: &str = r#"[
        {"fileName": "GameChat.tsx", "outputPath": "./components/GameChat.tsx", "prompt": "Create a chat with NPCs"},
        {"outputPath": "./app/settings/page.tsx", "prompt": "Settings page"}
    ]"#;

    #[test]
    fn parses_entries_in_order() {
        let tasks = parse_template(TEMPLATE).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "template-1");
        assert_eq!(tasks[0].name, "GameChat.tsx");
        assert_eq!(tasks[0].destination, "./components/GameChat.tsx");
        assert_eq!(tasks[0].task_kind, TaskKind::Create);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[1].name, "page.tsx");
        assert_eq!(tasks[1].priority, Priority::Medium);
    }

    #[test]
    fn carries_model_and_complexity() {
        let tasks = parse_template(
            r#"[
                {"outputPath": "a.ts", "prompt": "x", "model": "thinking"},
                {"outputPath": "b.ts", "prompt": "y", "complexity": "medium", "model": " "}
            ]"#,
        )
        .unwrap();
        assert_eq!(tasks[0].model.as_deref(), Some("thinking"));
        assert_eq!(tasks[0].complexity, None);
        assert_eq!(tasks[1].model, None);
        assert_eq!(tasks[1].complexity, Some(Complexity::Medium));

        let err = parse_template(r#"[{"outputPath": "a.ts", "prompt": "x", "complexity": "huge"}]"#)
            .unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }

    #[test]
    fn missing_prompt_is_reported_with_index() {
        let err = parse_template(r#"[{"outputPath": "a.ts", "prompt": "x"}, {"outputPath": "b.ts"}]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MissingField {
                index: 1,
                field: "prompt"
            }
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            parse_template("{not json").unwrap_err(),
            TemplateError::Parse(_)
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEMPLATE.as_bytes()).unwrap();
        let tasks = load_template(file.path()).unwrap();
        assert_eq!(tasks.len(), 2);

        let err = load_template("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
    }
}
