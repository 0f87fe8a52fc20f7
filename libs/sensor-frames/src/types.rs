//! Decoded sensor data types

use serde::{Deserialize, Serialize};
use std::fmt;

/// First byte of every packet
pub const PACKET_HEADER: u8 = 0x80;

/// Packet size in bytes
pub const PACKET_LEN: usize = 4;

/// Highest counter value; anything above it collides with the header bit
pub const MAX_COUNTER: u8 = 0x7F;

/// One decoded pressure reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Header byte as lowercase hex (always "80")
    pub status: String,
    /// Rolling packet counter
    pub counter: u8,
    /// Pressure in device units (raw value / 100)
    pub pressure: f64,
}

impl SensorReading {
    /// Build a reading from a packet that already passed validation
    pub(crate) fn from_packet(packet: [u8; PACKET_LEN]) -> Self {
        let raw = u16::from_be_bytes([packet[2], packet[3]]);
        Self {
            status: format!("{:x}", packet[0]),
            counter: packet[1],
            pressure: f64::from(raw) / 100.0,
        }
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status={} counter={} pressure={:.2}",
            self.status, self.counter, self.pressure
        )
    }
}

/// Result of decoding a byte stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Valid packets, in stream order
    pub readings: Vec<SensorReading>,
    /// Non-empty chunks that were not valid packets
    pub skipped: usize,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
