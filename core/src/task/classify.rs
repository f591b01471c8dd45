use super::types::TaskKind;

/// Keyword table checked in order; the first kind with a hit wins.
const KIND_KEYWORDS: &[(TaskKind, &[&str])] = &[
    (TaskKind::Create, &["作成", "新規", "追加", "create", "add", "new"]),
    (TaskKind::Modify, &["修正", "変更", "更新", "modify", "update", "change"]),
    (
        TaskKind::Refactor,
        &["リファクタリング", "改善", "最適化", "refactor", "improve", "optimize"],
    ),
    (TaskKind::Fix, &["修正", "バグ", "エラー", "fix", "bug", "error"]),
];

/// Classify instructions by lowercased substring search. Defaults to `Modify`.
pub fn infer_task_kind(instructions: &str) -> TaskKind {
    let lower = instructions.to_lowercase();
    KIND_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(kind, _)| *kind)
        .unwrap_or(TaskKind::Modify)
}
