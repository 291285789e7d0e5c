pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::{Collection, Fields, IdGenerator, Record};
pub use infra::config;
pub use storage::{FailurePolicy, RecordStore, StoreError};
