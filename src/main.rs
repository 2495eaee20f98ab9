use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use teal_toad::{config::Config, frame::DataFrame, model::Value, series::Series};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Mean {
        #[arg(long)]
        column: String,
    },

    Freq {
        #[arg(long)]
        column: String,
    },

    Prob {
        #[arg(long)]
        column: String,

        #[arg(long, allow_negative_numbers = true)]
        value: Value,

        #[arg(long, default_value_t = 0)]
        smoothing_factor: u64,
    },

    Show {
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let frame = Config::from_file(&args.data_file)
        .context("failed to construct cfg")?
        .into_frame()?;
    log::info!("loaded {} rows of {:?}", frame.n_rows(), frame.headers());

    match args.command {
        Command::Mean { column } => {
            let mean = get_column(&frame, &column)?
                .mean()
                .with_context(|| format!("failed to compute mean of {column:?}"))?;
            println!("{mean:?}");
        }
        Command::Freq { column } => {
            let freq = get_column(&frame, &column)?.freq();
            for (val, count) in freq.iter() {
                println!("{val} {count}");
            }
        }
        Command::Prob {
            column,
            value,
            smoothing_factor,
        } => {
            let prob = get_column(&frame, &column)?
                .probability(&value, smoothing_factor)
                .with_context(|| format!("failed to compute probability of {value}"))?;
            println!("{prob} ({})", prob.as_f64());
        }
        Command::Show { columns } => {
            let frame = if columns.is_empty() {
                frame
            } else {
                frame.select(columns.as_slice())
            };
            println!("{}", frame.headers().join(" "));
            for row in frame.rows() {
                let cells: Vec<_> = row.iter().map(Value::to_string).collect();
                println!("{}", cells.join(" "));
            }
        }
    }

    Ok(())
}

fn get_column(frame: &DataFrame, name: &str) -> Result<Series> {
    frame
        .column(name)
        .with_context(|| format!("unknown column {name:?}"))
}
