//! Packet framing
//!
//! Splitting mirrors how the sensor emits data: a header byte always opens
//! a new chunk, and a chunk that already holds four bytes is closed even
//! without a header following it.

use crate::types::{FrameReport, SensorReading, MAX_COUNTER, PACKET_HEADER, PACKET_LEN};
use errors::SensorResult;
use tracing::debug;

/// Split a byte stream into candidate packets
///
/// The leading chunk is returned even when empty, so the output always
/// covers the whole input.
pub fn split_packets(data: &[u8]) -> Vec<&[u8]> {
    let mut chunks = Vec::with_capacity(data.len() / PACKET_LEN + 1);
    let mut start = 0;

    for (i, &byte) in data.iter().enumerate() {
        if byte == PACKET_HEADER || i - start == PACKET_LEN {
            chunks.push(&data[start..i]);
            start = i;
        }
    }
    chunks.push(&data[start..]);

    chunks
}

/// Decode one chunk if it is a well-formed packet
pub fn decode_packet(chunk: &[u8]) -> Option<SensorReading> {
    let packet: [u8; PACKET_LEN] = chunk.try_into().ok()?;
    if packet[0] != PACKET_HEADER || packet[1] > MAX_COUNTER {
        return None;
    }
    Some(SensorReading::from_packet(packet))
}

/// Decode every valid packet in a byte stream
pub fn decode_readings(data: &[u8]) -> FrameReport {
    let mut report = FrameReport::default();

    for chunk in split_packets(data) {
        match decode_packet(chunk) {
            Some(reading) => report.readings.push(reading),
            None if chunk.is_empty() => {},
            None => {
                debug!("Skipping chunk: {}", common::hex::encode_spaced(chunk));
                report.skipped += 1;
            },
        }
    }

    debug!(
        "Decoded {} readings from {} bytes ({} chunks skipped)",
        report.readings.len(),
        data.len(),
        report.skipped
    );
    report
}

/// Decode hex text straight into readings
pub fn decode_hex(text: &str) -> SensorResult<FrameReport> {
    let bytes = common::hex::decode(text)?;
    Ok(decode_readings(&bytes))
}
