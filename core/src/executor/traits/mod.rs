pub mod backend;
pub mod extractor;
pub mod processor;
pub mod renderer;
pub mod writer;

pub use backend::*;
pub use extractor::*;
pub use processor::*;
pub use renderer::*;
pub use writer::*;
