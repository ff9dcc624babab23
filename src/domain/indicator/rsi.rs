//! RSI (Relative Strength Index) indicator.
//!
//! Cumulative variant: gains and losses are summed over the lookback
//! window rather than smoothed.
//!
//! Formula: RSI = 100 - (100 / (1 + gains / losses))
//! If losses == 0: RSI = 100
//!
//! Warmup: no value until `period` close-to-close deltas are available.

use crate::domain::bar::Bar;

/// RSI over the `period` close-to-close deltas ending at `index`.
///
/// Returns `None` when `index < period` or `index` is out of bounds.
/// A zero delta counts toward losses, so a flat window yields 100.
pub fn rsi(bars: &[Bar], index: usize, period: usize) -> Option<f64> {
    if index < period || index >= bars.len() {
        return None;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in (index - period + 1)..=index {
        let delta = bars[i].close - bars[i - 1].close;
        if delta > 0.0 {
            gains += delta;
        } else {
            losses -= delta;
        }
    }

    if losses == 0.0 {
        return Some(100.0);
    }

    Some(100.0 - (100.0 / (1.0 + gains / losses)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: 1_700_000_000 + i as i64 * 60,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn undefined_before_warmup() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        for index in 0..14 {
            assert!(rsi(&bars, index, 14).is_none(), "index {} should be None", index);
        }
        assert!(rsi(&bars, 14, 14).is_some());
    }

    #[test]
    fn undefined_past_end() {
        let bars = make_bars(&[100.0; 20]);
        assert!(rsi(&bars, 20, 14).is_none());
    }

    #[test]
    fn undefined_on_empty_series() {
        assert!(rsi(&[], 0, 14).is_none());
    }

    #[test]
    fn all_gains_is_exactly_100() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        assert_eq!(rsi(&bars, 14, 14), Some(100.0));
    }

    #[test]
    fn flat_window_is_exactly_100() {
        // Zero deltas land in losses, leaving both sums at zero.
        let bars = make_bars(&[100.0; 15]);
        assert_eq!(rsi(&bars, 14, 14), Some(100.0));
    }

    #[test]
    fn all_losses_is_zero() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let bars = make_bars(&closes);
        assert_relative_eq!(rsi(&bars, 14, 14).unwrap(), 0.0);
    }

    #[test]
    fn alternating_deltas_match_closed_form() {
        // Deltas +2, -1 repeating over the 14-delta window ending at index
        // 14: seven gains of 2 and seven losses of 1.
        let mut closes = vec![100.0];
        for i in 0..14 {
            let delta = if i % 2 == 0 { 2.0 } else { -1.0 };
            closes.push(closes[i] + delta);
        }
        let bars = make_bars(&closes);

        let gains = 14.0;
        let losses = 7.0;
        let expected = 100.0 - (100.0 / (1.0 + gains / losses));
        assert_relative_eq!(rsi(&bars, 14, 14).unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn window_slides_with_index() {
        // Index 15's window drops the first delta and picks up a new one.
        let closes: Vec<f64> = vec![
            100.0, 110.0, 108.0, 109.0, 107.0, 108.0, 106.0, 107.0, 105.0, 106.0, 104.0, 105.0,
            103.0, 104.0, 102.0, 103.0,
        ];
        let bars = make_bars(&closes);

        let at_14 = rsi(&bars, 14, 14).unwrap();
        let at_15 = rsi(&bars, 15, 14).unwrap();
        // The +10 opening delta leaves the window at index 15.
        assert!(at_15 < at_14);
    }

    #[test]
    fn value_in_range() {
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + ((i % 7) as f64 - 3.0) * 2.0)
            .collect();
        let bars = make_bars(&closes);
        for index in 14..30 {
            let value = rsi(&bars, index, 14).unwrap();
            assert!((0.0..=100.0).contains(&value), "RSI {} out of range", value);
        }
    }
}
