//! Trade simulation over a bar series.

use crate::domain::bar::Bar;
use crate::domain::signal::RsiReversion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
}

/// One entry in the trade log: the action and the bar it fired on.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub action: Action,
    pub bar: Bar,
}

/// Drive the strategy across the whole series, producing the ordered trade
/// log.
///
/// Indices are walked once in order. Buy is checked first; sell only when
/// buy did not fire, so a single bar never emits both. The position guard
/// inside the strategy makes buys and sells alternate starting with buy.
pub fn run(strategy: &mut RsiReversion, bars: &[Bar]) -> Vec<Trade> {
    let mut trades = Vec::new();

    for index in 0..bars.len() {
        if strategy.buy_condition(bars, index) {
            trades.push(Trade {
                action: Action::Buy,
                bar: bars[index].clone(),
            });
        } else if strategy.sell_condition(bars, index) {
            trades.push(Trade {
                action: Action::Sell,
                bar: bars[index].clone(),
            });
        }
    }

    trades
}
