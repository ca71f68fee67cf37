//! Store Adapters
//!
//! Implementations of the RecordStore port.
//!
//! ## Available Adapters
//!
//! - **PostgrestRecordStore** - Remote tables behind a PostgREST/Supabase endpoint
//! - **InMemoryRecordStore** - Tables kept in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::store::{InMemoryRecordStore, PostgrestConfig, PostgrestRecordStore};
//!
//! // Production: remote store
//! let store = PostgrestRecordStore::new(PostgrestConfig::from_store_config(&config.store))?;
//!
//! // Testing: in-memory store with the production constraints
//! let store = InMemoryRecordStore::with_default_schema(clock);
//! ```

mod in_memory;
mod postgrest;

pub use in_memory::{InMemoryRecordStore, TableSpec};
pub use postgrest::{PostgrestConfig, PostgrestRecordStore};
