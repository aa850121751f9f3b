//! Sync engine, record stores and observers

pub mod engine;
pub mod observer;
pub mod result;
pub mod store;

pub use engine::SyncEngine;
pub use observer::{SyncObserver, TracingObserver};
pub use result::SyncResult;
pub use store::{create_store, JsonFileStore, MemoryStore, RecordStore, UpsertOutcome};
