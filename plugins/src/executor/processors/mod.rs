pub mod preamble;

pub use preamble::PolicyPreamblePlugin;
