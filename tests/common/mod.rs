#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use rsitrader::domain::error::RsitraderError;
pub use rsitrader::domain::bar::Bar;
use rsitrader::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(&self, code: &str) -> Result<Vec<Bar>, RsitraderError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(RsitraderError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) => Ok(bars.clone()),
            None => Err(RsitraderError::NoData {
                code: code.to_string(),
            }),
        }
    }

    fn list_codes(&self) -> Result<Vec<String>, RsitraderError> {
        let mut codes: Vec<String> = self.data.keys().cloned().collect();
        codes.sort();
        Ok(codes)
    }
}

/// Unix seconds for a New York civil time.
pub fn ny_timestamp(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap();
    New_York
        .from_local_datetime(&naive)
        .single()
        .unwrap()
        .timestamp()
}

/// Regular-session open (09:30 New York) on a quiet winter Monday.
pub fn session_open() -> i64 {
    ny_timestamp(2024, 1, 15, 9, 30, 0)
}

pub fn make_bar(timestamp: i64, close: f64) -> Bar {
    Bar {
        timestamp,
        open: close,
        high: close,
        low: close,
        close,
        volume: 1000.0,
    }
}

/// One-minute bars from the session open with the given closes.
pub fn session_bars(closes: &[f64]) -> Vec<Bar> {
    let open_ts = session_open();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(open_ts + i as i64 * 60, close))
        .collect()
}

/// Closes that fall far enough to trip the oversold entry, then rise far
/// enough to trip the overbought exit.
pub fn v_shape_closes() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..16).map(|i| 100.0 - i as f64).collect();
    let bottom = *closes.last().unwrap();
    closes.extend((1..=16).map(|i| bottom + i as f64));
    closes
}
