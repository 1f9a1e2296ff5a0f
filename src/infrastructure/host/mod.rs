mod file_storage;
mod memory;

pub use file_storage::*;
pub use memory::*;
