//! OHLCV bar representation.

use serde::{Deserialize, Serialize};

use crate::domain::error::RsitraderError;

/// One OHLCV record. `timestamp` is Unix seconds; timestamps are strictly
/// increasing within a series with a constant nominal spacing (the series
/// time frame, in seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Check the bar invariant: positive prices, non-negative volume, and
    /// `low <= open,close <= high`. The core assumes well-formed bars; the
    /// data adapters run this on everything they load.
    pub fn validate(&self) -> Result<(), RsitraderError> {
        let fail = |reason: String| {
            Err(RsitraderError::Data {
                reason: format!("bar at {}: {}", self.timestamp, reason),
            })
        };

        if !(self.open > 0.0 && self.high > 0.0 && self.low > 0.0 && self.close > 0.0) {
            return fail("prices must be positive".into());
        }
        if self.volume < 0.0 {
            return fail("volume must be non-negative".into());
        }
        if self.low > self.high {
            return fail(format!("low {} above high {}", self.low, self.high));
        }
        if self.open < self.low || self.open > self.high {
            return fail(format!("open {} outside [low, high]", self.open));
        }
        if self.close < self.low || self.close > self.high {
            return fail(format!("close {} outside [low, high]", self.close));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            timestamp: 1_624_046_520,
            open: 2509.15,
            high: 2511.43,
            low: 2508.3,
            close: 2510.15,
            volume: 2450.0,
        }
    }

    #[test]
    fn valid_bar_passes() {
        assert!(sample_bar().validate().is_ok());
    }

    #[test]
    fn low_above_high_fails() {
        let bar = Bar {
            low: 2512.0,
            ..sample_bar()
        };
        assert!(bar.validate().is_err());
    }

    #[test]
    fn close_outside_range_fails() {
        let bar = Bar {
            close: 2520.0,
            ..sample_bar()
        };
        assert!(bar.validate().is_err());
    }

    #[test]
    fn non_positive_price_fails() {
        let bar = Bar {
            open: 0.0,
            ..sample_bar()
        };
        assert!(bar.validate().is_err());
    }

    #[test]
    fn negative_volume_fails() {
        let bar = Bar {
            volume: -1.0,
            ..sample_bar()
        };
        assert!(bar.validate().is_err());
    }

    #[test]
    fn zero_volume_is_fine() {
        let bar = Bar {
            volume: 0.0,
            ..sample_bar()
        };
        assert!(bar.validate().is_ok());
    }

    #[test]
    fn json_round_trip_keys() {
        let json = serde_json::to_string(&sample_bar()).unwrap();
        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"volume\""));
        let back: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_bar());
    }
}
