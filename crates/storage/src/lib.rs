#![forbid(unsafe_code)]

pub mod file_store;
pub mod repository;

pub use file_store::FileTokenStore;
pub use repository::{MemoryTokenStore, StorageError, TokenRepository};
