#[macro_use]
extern crate log;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use serde_json::to_string_pretty;
use sleepchart_algos::{ChartOptions, HeartRateSmoother, SleepChart, SleepSummary};
use sleepchart_codec::{
    ChartPayload, HeartRateResponse, SleepDataResponse, SleepResponse, TimeWindow, decode_night,
    parse_timestamp,
};
use sleepchart_types::NightData;

#[derive(Parser)]
#[command(version, about = "Aligns overnight heart rate with sleep stages for charting")]
pub struct SleepChartCli {
    #[clap(subcommand)]
    pub subcommand: SleepChartCommand,
}

#[derive(Subcommand)]
pub enum SleepChartCommand {
    ///
    /// Smooth heart rate, tag sleep stages and plan axis ticks
    ///
    Chart {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, env, default_value_t = HeartRateSmoother::DEFAULT_WINDOW)]
        window_size: usize,
        #[arg(long, env, default_value_t = 15)]
        tick_minutes: i64,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    ///
    /// Print time spent per sleep stage
    ///
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
    ///
    /// Write decoded stages and readings without smoothing
    ///
    Export {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// Intraday heart-rate response (JSON)
    #[arg(long, env)]
    pub heart_rate: PathBuf,
    /// Sleep log responses (JSON), one per queried day
    #[arg(long, required = true)]
    pub sleep: Vec<PathBuf>,
    /// Daily heart-rate response carrying the resting heart rate
    #[arg(long, env)]
    pub daily: Option<PathBuf>,
    /// Window start, RFC 3339 or `YYYY-MM-DDTHH:MM` (UTC)
    #[arg(long, env, value_parser = parse_timestamp)]
    pub start: DateTime<Utc>,
    /// Window end (exclusive)
    #[arg(long, env, value_parser = parse_timestamp)]
    pub end: DateTime<Utc>,
}

fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = SleepChartCli::parse();

    match cli.subcommand {
        SleepChartCommand::Chart {
            input,
            window_size,
            tick_minutes,
            output,
        } => {
            let (_, night) = load_night(&input)?;
            let chart = SleepChart::new(ChartOptions {
                window_size,
                tick_interval: TimeDelta::try_minutes(tick_minutes)
                    .with_context(|| format!("tick interval of {tick_minutes} minutes"))?,
            })?;
            let data = chart.build(&night)?;
            if data.records.is_empty() {
                warn!("No heart-rate samples inside the window");
            }

            write_output(output, &to_string_pretty(&ChartPayload::new(&data))?)
        }
        SleepChartCommand::Summary { input } => {
            let (window, night) = load_night(&input)?;
            let summary = SleepSummary::from_intervals(&night.intervals);

            println!("{} - {}", window.start, window.end);
            println!("{}", summary);
            match night.resting_heart_rate {
                Some(rhr) => println!("Resting {} bpm", rhr),
                None => println!("Resting n/a"),
            }
            Ok(())
        }
        SleepChartCommand::Export { input, output } => {
            let (window, night) = load_night(&input)?;
            let response = SleepDataResponse::new(&window, &night);
            write_output(output, &to_string_pretty(&response)?)
        }
    }
}

fn load_night(input: &InputArgs) -> anyhow::Result<(TimeWindow, NightData)> {
    let window = TimeWindow::new(input.start, input.end)?;

    let heart_rate = HeartRateResponse::from_slice(&read(&input.heart_rate)?)
        .with_context(|| format!("decoding {}", input.heart_rate.display()))?;

    let daily = match &input.daily {
        Some(path) => Some(
            HeartRateResponse::from_slice(&read(path)?)
                .with_context(|| format!("decoding {}", path.display()))?,
        ),
        None => None,
    };

    let mut sleep_logs = Vec::new();
    for path in &input.sleep {
        let response = SleepResponse::from_slice(&read(path)?)
            .with_context(|| format!("decoding {}", path.display()))?;
        sleep_logs.extend(response.sleep);
    }

    let night = decode_night(&heart_rate, &sleep_logs, daily.as_ref(), &window)?;
    Ok((window, night))
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(output: Option<PathBuf>, json: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
