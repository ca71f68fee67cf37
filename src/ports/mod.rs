//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RecordStore` - Remote table store (select, insert, upsert)
//! - `Clock` - Source of the current instant and day key

mod clock;
mod record_store;

pub use clock::Clock;
pub use record_store::{
    from_row, to_row, Direction, Filter, Order, RecordStore, Row, Select, StoreError,
};
