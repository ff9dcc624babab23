//! Buy/sell signal evaluation for the RSI mean-reversion rule.

use crate::domain::bar::Bar;
use crate::domain::indicator::rsi::rsi;
use crate::domain::session::in_ny_session;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_BUY_THRESHOLD: f64 = 20.0;
pub const DEFAULT_SELL_THRESHOLD: f64 = 80.0;

/// Open-position state. At most one long position at a time, no
/// pyramiding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Flat,
    Long { entry_price: f64 },
}

impl Position {
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long { .. })
    }
}

/// RSI mean-reversion rule: buy oversold, sell overbought, both restricted
/// to the New York regular session.
///
/// `buy_condition` and `sell_condition` mutate the position state.
/// Precondition: indices are evaluated in strictly increasing order, buy
/// checked first and sell only when buy did not fire (see
/// [`crate::domain::simulator::run`]). Calling out of order, or both for
/// the same index, gives inconsistent results.
#[derive(Debug, Clone)]
pub struct RsiReversion {
    pub period: usize,
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    position: Position,
}

impl RsiReversion {
    pub fn new(period: usize, buy_threshold: f64, sell_threshold: f64) -> Self {
        RsiReversion {
            period,
            buy_threshold,
            sell_threshold,
            position: Position::Flat,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// True when flat, inside the session window, and RSI is below the buy
    /// threshold. Enters the position at the bar close.
    ///
    /// The session filter runs before RSI, so out-of-session bars never
    /// pay the indicator cost.
    pub fn buy_condition(&mut self, bars: &[Bar], index: usize) -> bool {
        if self.position.is_long() {
            return false;
        }
        if !in_ny_session(bars[index].timestamp) {
            return false;
        }
        let Some(value) = rsi(bars, index, self.period) else {
            return false;
        };
        if value < self.buy_threshold {
            self.position = Position::Long {
                entry_price: bars[index].close,
            };
            return true;
        }
        false
    }

    /// True when long, inside the session window, and RSI is above the
    /// sell threshold. Flattens the position.
    pub fn sell_condition(&mut self, bars: &[Bar], index: usize) -> bool {
        if !self.position.is_long() {
            return false;
        }
        if !in_ny_session(bars[index].timestamp) {
            return false;
        }
        let Some(value) = rsi(bars, index, self.period) else {
            return false;
        };
        if value > self.sell_threshold {
            self.position = Position::Flat;
            return true;
        }
        false
    }
}

impl Default for RsiReversion {
    fn default() -> Self {
        RsiReversion::new(
            DEFAULT_RSI_PERIOD,
            DEFAULT_BUY_THRESHOLD,
            DEFAULT_SELL_THRESHOLD,
        )
    }
}
