//! Sensor Frames - pressure sensor packet decoding
//!
//! A sensor stream is a run of 4-byte packets:
//!
//! ```text
//! ┌────────┬─────────┬─────────────┬─────────────┐
//! │  0x80  │ counter │ pressure_hi │ pressure_lo │
//! │ header │ 0..=7F  │   big-endian u16 / 100    │
//! └────────┴─────────┴─────────────┴─────────────┘
//! ```
//!
//! Bytes that do not line up with that layout are skipped, never repaired.

mod parser;
pub mod types;

pub use parser::{decode_hex, decode_packet, decode_readings, split_packets};
pub use types::{FrameReport, SensorReading, PACKET_HEADER, PACKET_LEN};
