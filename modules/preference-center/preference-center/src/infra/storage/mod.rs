//! Storage adapters for the preference repository port.

pub mod json_file;
pub mod memory;

pub use json_file::{JsonFilePreferenceRepository, StorageError};
pub use memory::MemoryPreferenceRepository;
