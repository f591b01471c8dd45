pub mod processors;
pub mod renderers;

pub use processors::PolicyPreamblePlugin;
pub use renderers::{JsonlRendererPlugin, TextRendererPlugin};
