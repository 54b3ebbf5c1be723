use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use eyre::{bail, Result};

/// CLI options
#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Envelope format wrapping the input: ioss, rff, rff-be, rec, rec-be, netto.
    #[clap(short = 'e', long, default_value = "ioss")]
    pub envelope: String,
    /// Reference version for category 10 (e.g. "1.1", "0.24s").
    #[clap(long)]
    pub vsn010: Option<String>,
    /// Reference version for category 21 (e.g. "2.4", "1.4").
    #[clap(long)]
    pub vsn021: Option<String>,
    /// Recording start date (YYYY-MM-DD), used to resolve IOSS recording-day rollovers.
    #[clap(long)]
    pub start_date: Option<String>,
    /// Seconds to add to every decoded time of day.
    #[clap(long, default_value_t = 0.0)]
    pub time_bias: f64,
    /// Only decode records whose time of day is at or after this many seconds past midnight.
    #[clap(long)]
    pub start_time: Option<f64>,
    /// Only decode records whose time of day is before this many seconds past midnight.
    #[clap(long)]
    pub stop_time: Option<f64>,
    /// Stop after this many frames.
    #[clap(long)]
    pub frame_limit: Option<u64>,
    /// Stop after this many input bytes.
    #[clap(long)]
    pub byte_limit: Option<u64>,
    /// Abort on the first decode error instead of skipping the offending block/record.
    #[clap(long)]
    pub stop_on_error: bool,
    /// Output file; stdout if omitted.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Output format: "debug" (count records) or "jsonl" (one JSON object per line).
    #[clap(short = 'F', long, default_value = "debug")]
    pub format: String,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Display utility full version.
    #[clap(short = 'V', long)]
    pub version: bool,
    /// Input file.
    pub input: PathBuf,
}

/// Check the presence and validity of some of the arguments
///
pub fn check_args(opts: &Opts) -> Result<()> {
    if !matches!(opts.envelope.as_str(), "ioss" | "rff" | "rff-be" | "rec" | "rec-be" | "netto") {
        bail!("Unknown envelope format {:?}", opts.envelope);
    }

    if !matches!(opts.format.as_str(), "debug" | "jsonl") {
        bail!("Unknown output format {:?}, want debug or jsonl", opts.format);
    }

    if opts.start_time.is_some() != opts.stop_time.is_some() {
        bail!("Need both --start-time/--stop-time or neither");
    }

    if let (Some(start), Some(stop)) = (opts.start_time, opts.stop_time) {
        if start >= stop {
            bail!("--start-time must be before --stop-time");
        }
    }

    Ok(())
}
