//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_data_adapter::{self, FileDataAdapter};
use crate::domain::aggregate::aggregate;
use crate::domain::bar::Bar;
use crate::domain::error::RsitraderError;
use crate::domain::metrics::MetricsResult;
use crate::domain::session::ny_time;
use crate::domain::signal::{
    RsiReversion, DEFAULT_BUY_THRESHOLD, DEFAULT_RSI_PERIOD, DEFAULT_SELL_THRESHOLD,
};
use crate::domain::simulator;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "rsitrader", about = "RSI session backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over the configured codes
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Run a single code instead of the configured list
        #[arg(long)]
        code: Option<String>,
        /// Backtest one explicit bar file instead of the configured codes
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// List codes with loadable data files
    ListCodes {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show bar count and timestamp range for a code
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest { config, code, data } => {
            run_backtest(&config, code.as_deref(), data.as_deref())
        }
        Command::ListCodes { config } => run_list_codes(&config),
        Command::Info { config, code } => run_info(&config, &code),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = RsitraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Time-frame parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestParams {
    pub current_tf: u32,
    pub want_tf: Option<u32>,
}

pub fn build_backtest_params(config: &dyn ConfigPort) -> Result<BacktestParams, RsitraderError> {
    let current_tf = config.get_int("backtest", "current_tf", 60);
    if current_tf <= 0 {
        return Err(RsitraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "current_tf".into(),
            reason: format!("must be a positive number of seconds, got {}", current_tf),
        });
    }

    let want_tf = match config.get_string("backtest", "want_tf") {
        Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
            RsitraderError::ConfigInvalid {
                section: "backtest".into(),
                key: "want_tf".into(),
                reason: format!("must be a positive number of seconds, got {}", raw),
            }
        })?),
        None => None,
    };

    Ok(BacktestParams {
        current_tf: current_tf as u32,
        want_tf,
    })
}

pub fn build_strategy(config: &dyn ConfigPort) -> Result<RsiReversion, RsitraderError> {
    let period = config.get_int("strategy", "rsi_period", DEFAULT_RSI_PERIOD as i64);
    if period < 1 {
        return Err(RsitraderError::ConfigInvalid {
            section: "strategy".into(),
            key: "rsi_period".into(),
            reason: format!("must be at least 1, got {}", period),
        });
    }

    let buy_threshold = config.get_double("strategy", "buy_threshold", DEFAULT_BUY_THRESHOLD);
    let sell_threshold = config.get_double("strategy", "sell_threshold", DEFAULT_SELL_THRESHOLD);
    for (key, value) in [
        ("buy_threshold", buy_threshold),
        ("sell_threshold", sell_threshold),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(RsitraderError::ConfigInvalid {
                section: "strategy".into(),
                key: key.into(),
                reason: format!("must lie in [0, 100], got {}", value),
            });
        }
    }

    Ok(RsiReversion::new(period as usize, buy_threshold, sell_threshold))
}

pub fn resolve_codes(code_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    match code_override {
        Some(code) => vec![code.to_string()],
        None => config
            .get_string("data", "codes")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn data_path(config: &dyn ConfigPort) -> Result<PathBuf, RsitraderError> {
    config
        .get_string("data", "path")
        .map(PathBuf::from)
        .ok_or_else(|| RsitraderError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })
}

fn run_backtest(
    config_path: &Path,
    code_override: Option<&str>,
    data_override: Option<&Path>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = match build_backtest_params(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // A single explicit file bypasses code resolution entirely.
    if let Some(path) = data_override {
        let code = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("data")
            .to_string();
        return match file_data_adapter::read_path(path)
            .and_then(|bars| run_series(&code, bars, &params, &strategy))
        {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                (&e).into()
            }
        };
    }

    let codes = resolve_codes(code_override, &adapter);
    if codes.is_empty() {
        eprintln!("error: no codes configured");
        return ExitCode::from(2);
    }

    let base_path = match data_path(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = FileDataAdapter::new(base_path);

    eprintln!("Backtesting {} codes...", codes.len());

    let mut first_error: Option<ExitCode> = None;
    for code in &codes {
        let outcome = data_port
            .fetch_bars(code)
            .and_then(|bars| run_series(code, bars, &params, &strategy));
        if let Err(e) = outcome {
            eprintln!("error: {e}");
            first_error.get_or_insert((&e).into());
        }
    }

    first_error.unwrap_or(ExitCode::SUCCESS)
}

/// Aggregate if requested, simulate with a fresh evaluator, print metrics.
fn run_series(
    code: &str,
    bars: Vec<Bar>,
    params: &BacktestParams,
    strategy: &RsiReversion,
) -> Result<(), RsitraderError> {
    let bars = match params.want_tf {
        Some(want_tf) => aggregate(params.current_tf, want_tf, &bars)?,
        None => bars,
    };

    eprintln!("Running {} over {} bars", code, bars.len());

    let mut strategy = strategy.clone();
    let trades = simulator::run(&mut strategy, &bars);
    let result = MetricsResult::evaluate(&trades, &bars);
    print_result(code, trades.len(), &result);
    Ok(())
}

fn print_result(code: &str, trade_count: usize, result: &MetricsResult) {
    println!("Results for {}:", code);
    println!("  trades:                  {}", trade_count);
    println!("  avg_profit:              {:.4}", result.avg_profit);
    println!("  avg_loss:                {:.4}", result.avg_loss);
    println!("  win_rate:                {:.4}", result.win_rate);
    println!("  total_return:            {:.4}", result.total_return);
    println!(
        "  max_realized_drawdown:   {:.4}",
        result.max_realized_drawdown
    );
    println!(
        "  max_unrealized_drawdown: {:.4}",
        result.max_unrealized_drawdown
    );
}

fn run_list_codes(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let base_path = match data_path(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match FileDataAdapter::new(base_path).list_codes() {
        Ok(codes) => {
            for code in codes {
                println!("{}", code);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &Path, code: &str) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(exit) => return exit,
    };

    let base_path = match data_path(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match FileDataAdapter::new(base_path).fetch_bars(code) {
        Ok(bars) => {
            println!("{}: {} bars", code, bars.len());
            if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
                let range = match (ny_time(first.timestamp), ny_time(last.timestamp)) {
                    (Some(start), Some(end)) => format!(
                        "{} .. {}",
                        start.format("%Y-%m-%d %H:%M:%S %Z"),
                        end.format("%Y-%m-%d %H:%M:%S %Z")
                    ),
                    _ => format!("{} .. {}", first.timestamp, last.timestamp),
                };
                println!("range: {}", range);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
