//! Domain types for the proverb collection.

pub mod id;
pub mod record;

pub use id::{Clock, IdGenerator, SystemClock};
pub use record::{Collection, Fields, Record, ID_FIELD};
