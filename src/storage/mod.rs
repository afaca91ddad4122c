pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Synchronous string-keyed storage area the store persists into.
///
/// Implementations take `&self` and handle their own interior mutability so a
/// single backend can be shared between store instances.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;
