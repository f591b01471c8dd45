//! Task model: descriptors, keyword classification, splitting, the
//! caller-owned store, hand-off briefs, JSON templates, built-in presets and
//! per-task model routing.

pub mod brief;
pub mod classify;
pub mod id_gen;
pub mod presets;
pub mod routing;
pub mod splitter;
pub mod store;
pub mod template;
pub mod types;

pub use brief::{render_execution_plan, render_task_brief};
pub use classify::infer_task_kind;
pub use id_gen::generate_batch_id;
pub use presets::{load_preset, presets, Preset};
pub use routing::{analyze_complexity, model_breakdown, resolve_model_alias, route_models};
pub use splitter::{
    format_estimated_time, split, split_instructions, split_with_batch_id, SplitResult,
};
pub use store::TaskStore;
pub use template::{load_template, parse_template};
pub use types::{Complexity, Priority, TaskDescriptor, TaskKind, TaskStatus, TaskSummary};
