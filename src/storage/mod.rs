pub mod error;
pub mod record_store;

pub use error::StoreError;
pub use record_store::{FailurePolicy, RecordStore};
