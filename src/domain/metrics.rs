//! Performance metrics over a trade log.

use crate::domain::bar::Bar;
use crate::domain::simulator::{Action, Trade};

/// A completed round trip, derived by pairing a buy with the next sell.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub entry_price: f64,
    pub exit_price: f64,
    pub profit: f64,
}

/// Pair each sell with the most recent unmatched buy, scanning the log in
/// order with a single pending entry. A sell with no pending entry is
/// dropped, not an error.
pub fn build_closed_trades(trades: &[Trade]) -> Vec<ClosedTrade> {
    let mut closed = Vec::new();
    let mut entry: Option<f64> = None;

    for trade in trades {
        let price = trade.bar.close;
        match trade.action {
            Action::Buy => entry = Some(price),
            Action::Sell => {
                if let Some(entry_price) = entry.take() {
                    closed.push(ClosedTrade {
                        entry_price,
                        exit_price: price,
                        profit: price - entry_price,
                    });
                }
            }
        }
    }

    closed
}

/// Summary statistics for one simulation run. All fields default to 0.0
/// when the underlying sample is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsResult {
    pub avg_profit: f64,
    pub avg_loss: f64,
    pub win_rate: f64,
    pub max_realized_drawdown: f64,
    pub max_unrealized_drawdown: f64,
    pub total_return: f64,
}

impl MetricsResult {
    /// Compute all metrics from the trade log and the bar series it was
    /// produced from.
    pub fn evaluate(trades: &[Trade], bars: &[Bar]) -> Self {
        let closed = build_closed_trades(trades);

        let mut wins = 0usize;
        let mut win_total = 0.0_f64;
        let mut losses = 0usize;
        let mut loss_total = 0.0_f64;
        let mut total_return = 0.0_f64;

        for trade in &closed {
            total_return += trade.profit;
            if trade.profit > 0.0 {
                wins += 1;
                win_total += trade.profit;
            } else {
                // Zero profit counts as a loss.
                losses += 1;
                loss_total += trade.profit;
            }
        }

        let avg_profit = if wins > 0 {
            win_total / wins as f64
        } else {
            0.0
        };

        let avg_loss = if losses > 0 {
            loss_total / losses as f64
        } else {
            0.0
        };

        let win_rate = if closed.is_empty() {
            0.0
        } else {
            wins as f64 / closed.len() as f64
        };

        MetricsResult {
            avg_profit,
            avg_loss,
            win_rate,
            max_realized_drawdown: realized_drawdown(&closed),
            max_unrealized_drawdown: unrealized_drawdown(trades, bars),
            total_return,
        }
    }
}

/// Largest decline of cumulative closed-trade equity from its running
/// peak. Reacts only at trade-close boundaries.
fn realized_drawdown(closed: &[ClosedTrade]) -> f64 {
    let mut equity = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;

    for trade in closed {
        equity += trade.profit;
        peak = peak.max(equity);
        max_dd = max_dd.max(peak - equity);
    }

    max_dd
}

/// Worst intra-trade paper loss: while a position is open, track the
/// running peak close and the largest peak-to-close decline, bar by bar.
/// The entry bar participates; the exit bar does not (the position is
/// already flat when its close is seen).
fn unrealized_drawdown(trades: &[Trade], bars: &[Bar]) -> f64 {
    let mut in_position = false;
    let mut peak_price = 0.0_f64;
    let mut max_dd = 0.0_f64;
    let mut trade_idx = 0usize;

    for bar in bars {
        if trade_idx < trades.len() && trades[trade_idx].bar.timestamp == bar.timestamp {
            let trade = &trades[trade_idx];
            match trade.action {
                Action::Buy => {
                    in_position = true;
                    peak_price = trade.bar.close;
                }
                Action::Sell => {
                    in_position = false;
                }
            }
            trade_idx += 1;
        }

        if in_position {
            peak_price = peak_price.max(bar.close);
            max_dd = max_dd.max(peak_price - bar.close);
        }
    }

    max_dd
}
