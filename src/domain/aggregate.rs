//! Time-frame aggregation of OHLCV bars.

use crate::domain::bar::Bar;
use crate::domain::error::RsitraderError;

/// Downsample `bars` from `current_tf` to `want_tf` (both in seconds).
///
/// Consecutive chunks of `want_tf / current_tf` bars reduce to a single
/// bar: timestamp and open from the first bar of the chunk, high/low
/// extremes across the chunk, close from the last bar, volume summed.
/// A trailing chunk shorter than the factor is dropped.
///
/// Fails with `InvalidTimeFrame` when `want_tf` is not a strict multiple
/// of `current_tf` greater than it.
pub fn aggregate(
    current_tf: u32,
    want_tf: u32,
    bars: &[Bar],
) -> Result<Vec<Bar>, RsitraderError> {
    if want_tf <= current_tf || want_tf % current_tf != 0 {
        return Err(RsitraderError::InvalidTimeFrame {
            current_tf,
            want_tf,
        });
    }

    let factor = (want_tf / current_tf) as usize;
    let mut aggregated = Vec::with_capacity(bars.len() / factor);

    for chunk in bars.chunks_exact(factor) {
        let first = &chunk[0];
        let last = &chunk[factor - 1];
        aggregated.push(Bar {
            timestamp: first.timestamp,
            open: first.open,
            high: chunk.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max),
            low: chunk.iter().map(|b| b.low).fold(f64::INFINITY, f64::min),
            close: last.close,
            volume: chunk.iter().map(|b| b.volume).sum(),
        });
    }

    Ok(aggregated)
}
