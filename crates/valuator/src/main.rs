use clap::Parser;
use std::path::PathBuf;
use valuator::{OutputFormat, RunOptions, Suite, init_logging, run};

#[derive(Parser, Debug)]
#[command(name = "valuator")]
#[command(about = "Value, dividend and growth valuation models for a single equity")]
struct Args {
    /// YAML inputs file (defaults are used when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Suite to report on
    #[arg(short, long, value_enum, default_value_t = Suite::All)]
    suite: Suite,

    /// Override one input, e.g. `--set value.eps=3.2` (repeatable)
    #[arg(long = "set", value_name = "SUITE.FIELD=VALUE")]
    overrides: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write a default inputs file to this path and exit
    #[arg(long, value_name = "PATH")]
    write_defaults: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.as_deref(), &args.log_level)?;

    let options = RunOptions {
        input: args.input,
        suite: args.suite,
        overrides: args.overrides,
        format: args.format,
        write_defaults: args.write_defaults,
    };

    let output = run(&options)?;
    print!("{output}");

    tracing::debug!("valuator finished");
    Ok(())
}
