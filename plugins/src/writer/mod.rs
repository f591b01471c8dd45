pub mod fs;

pub use fs::FsOutputWriter;
