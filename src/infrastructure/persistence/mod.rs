mod file_session_store;
mod memory_session_store;
mod redis_session_store;
mod snapshot;

pub use file_session_store::FileSessionStore;
pub use memory_session_store::InMemorySessionStore;
pub use redis_session_store::RedisSessionStore;
pub use snapshot::{SessionSnapshot, SnapshotRepository};
