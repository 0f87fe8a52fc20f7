//! Sensor Store - persistence for decoded readings
//!
//! ```text
//! hex text ──▶ sensor_frames::decode_hex ──▶ ReadingSink::save
//!                                                 │
//!                                          PgReadingStore (sensor_data)
//! ```

mod repository;
mod sink;

pub use repository::PgReadingStore;
pub use sink::{ingest_hex, IngestSummary, ReadingSink};
