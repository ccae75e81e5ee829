pub mod config;
pub mod storage_error;
pub mod store;
pub mod user_documents;

#[cfg(not(target_arch = "wasm32"))]
mod atomic_write;
mod storage_plugin;

pub use storage_error::StorageError;
pub use storage_plugin::{StoragePlugin, UserIdentity};
pub use store::{DocumentStore, KeyValueStore, MemoryStore};
