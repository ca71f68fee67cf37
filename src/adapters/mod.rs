//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `store` - Record store implementations (PostgREST, in-memory)

pub mod clock;
pub mod store;

pub use clock::{FixedClock, SystemClock};
pub use store::{InMemoryRecordStore, PostgrestConfig, PostgrestRecordStore, TableSpec};
