//! Per-task model selection.
//!
//! An explicit `model` on a task always wins (aliases `flash`, `thinking` and
//! `pro` expand to full model ids). Otherwise a known complexity picks the
//! model, and in auto mode a missing complexity is inferred from the prompt.

use std::collections::BTreeMap;

use super::types::{Complexity, TaskDescriptor};

pub const FLASH_MODEL: &str = "gemini-2.0-flash";
pub const THINKING_MODEL: &str = "gemini-2.0-flash-thinking-exp-1219";
pub const PRO_MODEL: &str = "gemini-1.5-pro";

const COMPLEX_KEYWORDS: &[&str] = &[
    "アーキテクチャ",
    "architecture",
    "アルゴリズム",
    "algorithm",
    "ステートマシン",
    "state machine",
    "複雑な",
    "complex",
    "システム設計",
    "system design",
    "データ構造",
    "data structure",
    "最適化",
    "optimization",
];

const MEDIUM_KEYWORDS: &[&str] = &[
    "フォーム",
    "form",
    "api",
    "endpoint",
    "crud",
    "バリデーション",
    "validation",
    "コンポーネント",
    "component",
];

// Prompt lengths in characters.
const COMPLEX_LENGTH: usize = 500;
const MEDIUM_LENGTH: usize = 200;

/// Keyword and length heuristic. Complex keywords or a long prompt beat
/// medium ones.
pub fn analyze_complexity(prompt: &str) -> Complexity {
    let lower = prompt.to_lowercase();
    let len = prompt.chars().count();
    let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has_any(COMPLEX_KEYWORDS) || len > COMPLEX_LENGTH {
        Complexity::Complex
    } else if has_any(MEDIUM_KEYWORDS) || len > MEDIUM_LENGTH {
        Complexity::Medium
    } else {
        Complexity::Simple
    }
}

/// Expand a model alias; anything else is taken as a model id.
pub fn resolve_model_alias(model: &str) -> String {
    let trimmed = model.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "flash" => FLASH_MODEL.to_string(),
        "thinking" => THINKING_MODEL.to_string(),
        "pro" => PRO_MODEL.to_string(),
        _ => trimmed.to_string(),
    }
}

pub fn model_for_complexity(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Complex => THINKING_MODEL,
        Complexity::Simple | Complexity::Medium => FLASH_MODEL,
    }
}

/// Fill in `model` for every task that can be routed. With `auto`, tasks
/// without a complexity get one from [`analyze_complexity`].
pub fn route_models(tasks: &mut [TaskDescriptor], auto: bool) {
    for task in tasks.iter_mut() {
        let explicit = task.model.take().filter(|m| !m.trim().is_empty());
        task.model = match explicit {
            Some(model) => Some(resolve_model_alias(&model)),
            None => {
                if task.complexity.is_none() && auto {
                    task.complexity = Some(analyze_complexity(&task.instructions));
                }
                task.complexity.map(|c| model_for_complexity(c).to_string())
            }
        };

        tracing::debug!(
            task_id = %task.id,
            complexity = task.complexity.map(Complexity::as_str).unwrap_or("-"),
            model = task.model.as_deref().unwrap_or("default"),
            "task routed"
        );
    }
}

/// Number of tasks per model; unrouted tasks count under `default_model`.
pub fn model_breakdown(tasks: &[TaskDescriptor], default_model: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        let model = task.model.as_deref().unwrap_or(default_model);
        *counts.entry(model.to_string()).or_insert(0) += 1;
    }
    counts
}
