//! Reading sinks and the ingest entry point

use async_trait::async_trait;
use errors::SensorResult;
use sensor_frames::SensorReading;
use serde::Serialize;
use tracing::info;

/// Destination for decoded readings
#[async_trait]
pub trait ReadingSink: Send + Sync {
    /// Store all readings; either every reading is stored or none is
    async fn save(&self, readings: &[SensorReading]) -> SensorResult<u64>;

    /// Sink name for logs
    fn name(&self) -> &str;
}

/// Outcome of one ingest call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Valid packets found in the input
    pub decoded: usize,
    /// Rows the sink reported as written
    pub saved: u64,
    /// Chunks that were not valid packets
    pub skipped: usize,
}

/// Decode hex text and hand the readings to `sink`
///
/// Malformed hex fails before the sink is touched. An input without valid
/// packets is not an error and does not call the sink.
pub async fn ingest_hex<S>(sink: &S, text: &str) -> SensorResult<IngestSummary>
where
    S: ReadingSink + ?Sized,
{
    let report = sensor_frames::decode_hex(text)?;

    let mut summary = IngestSummary {
        decoded: report.readings.len(),
        saved: 0,
        skipped: report.skipped,
    };

    if report.readings.is_empty() {
        info!("No valid packets in input ({} chunks skipped)", report.skipped);
        return Ok(summary);
    }

    summary.saved = sink.save(&report.readings).await?;
    info!(
        "Stored {} readings via {} ({} chunks skipped)",
        summary.saved,
        sink.name(),
        summary.skipped
    );

    Ok(summary)
}
