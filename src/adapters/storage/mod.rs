//! Session store adapters.
//!
//! - `InMemorySessionStore` - map in process memory
//! - `FileSessionStore` - one YAML file per session

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
