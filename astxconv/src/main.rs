//! CLI front-end for the ASTERIX surveillance data decoder in `fetiche-formats`.
//!
//! Reads a recording in one of the supported envelope formats, splits each frame into its
//! data blocks, decodes every record and hands the result to a [`Sink`]. Modelled on
//! `cat21conv`'s CLI shape: a banner, an `eyre::Result` main, `tracing_subscriber` logging,
//! and a final "N records in Nms" summary.

use std::fs::File;
use std::io::{self, BufReader};
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use clap::{crate_name, crate_version, Parser};
use eyre::{eyre, Result};
use tracing::{info, trace, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use fetiche_formats::{
    decode_block, open_reader, split_blocks, DebugSink, DecoderConfig, DecoderState,
    EnvelopeFormat, JsonlSink, Sink, TimeWindow,
};

use crate::cli::{check_args, Opts};

mod cli;

fn version() -> String {
    format!("{}/{}", crate_name!(), crate_version!())
}

fn envelope_from_str(s: &str) -> EnvelopeFormat {
    match s {
        "ioss" => EnvelopeFormat::Ioss,
        "rff" => EnvelopeFormat::Rff { big_endian: false },
        "rff-be" => EnvelopeFormat::Rff { big_endian: true },
        "rec" => EnvelopeFormat::Rec { big_endian: false },
        "rec-be" => EnvelopeFormat::Rec { big_endian: true },
        "netto" => EnvelopeFormat::Netto,
        other => unreachable!("unknown envelope format {other:?}, checked by check_args"),
    }
}

fn parse_start_date(s: &str) -> Result<(u16, u8, u8)> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| eyre!("bad --start-date {:?}: {e}", s))?;
    Ok((date.year() as u16, date.month() as u8, date.day() as u8))
}

fn build_config(opts: &Opts) -> Result<DecoderConfig> {
    let mut cfg = DecoderConfig::new(opts.input.clone(), envelope_from_str(&opts.envelope));

    if let Some(vsn) = &opts.vsn010 {
        cfg.set_reference_version(10, vsn)?;
    }
    if let Some(vsn) = &opts.vsn021 {
        cfg.set_reference_version(21, vsn)?;
    }
    if let Some(start_date) = &opts.start_date {
        cfg.start_date = Some(parse_start_date(start_date)?);
    }
    cfg.time_bias_seconds = opts.time_bias;
    if let (Some(start), Some(stop)) = (opts.start_time, opts.stop_time) {
        cfg.time_window = Some(TimeWindow {
            start_seconds: start,
            stop_seconds: stop,
        });
    }
    cfg.frame_limit = opts.frame_limit;
    cfg.byte_limit = opts.byte_limit;
    cfg.stop_on_error = opts.stop_on_error;

    Ok(cfg)
}

/// Decode the whole input through `sink`, returning the number of frames processed.
fn run(cfg: &DecoderConfig, sink: &mut dyn Sink) -> Result<u64> {
    let file = File::open(&cfg.input_path)?;
    let mut reader = open_reader(cfg.envelope_format, BufReader::new(file), cfg.start_date);

    let mut state = DecoderState::new();
    let mut frames = 0u64;
    let mut bytes = 0u64;

    loop {
        if let Some(limit) = cfg.frame_limit {
            if frames >= limit {
                break;
            }
        }
        if let Some(limit) = cfg.byte_limit {
            if bytes >= limit {
                break;
            }
        }

        let frame = match reader.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "envelope reader failed");
                if cfg.stop_on_error {
                    return Err(eyre!("envelope reader failed: {e}"));
                }
                break;
            }
        };

        bytes += frame.payload.len() as u64;

        if let Some(window) = cfg.time_window {
            if let Some(tod) = frame.time_of_day {
                if tod < window.start_seconds || tod >= window.stop_seconds {
                    frames += 1;
                    continue;
                }
            }
        }

        for block in split_blocks(&frame.payload) {
            let block = match block {
                Ok(block) => block,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping bad data block");
                    if cfg.stop_on_error {
                        return Err(eyre!("bad data block: {e}"));
                    }
                    continue;
                }
            };
            if let Err(e) = decode_block(block.category, block.payload, &frame, cfg, &mut state, sink) {
                tracing::warn!(category = block.category, error = %e, "skipping bad record/block");
                if cfg.stop_on_error {
                    return Err(eyre!("category {} decode failed: {e}", block.category));
                }
            }
        }

        frames += 1;
    }

    Ok(frames)
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    eprintln!("{}\n", version());

    if opts.version {
        return Ok(());
    }

    check_args(&opts)?;

    let fmt = fmt::layer()
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(false)
        .compact();
    let filter = EnvFilter::from_default_env();
    tracing_subscriber::registry().with(filter).with(fmt).init();

    let cfg = build_config(&opts)?;

    info!("Decoding {:?}…", cfg.input_path);
    let now = Instant::now();

    let frames = match opts.format.as_str() {
        "jsonl" => match &opts.output {
            Some(path) => {
                let file = File::create(path)?;
                let mut sink = JsonlSink::new(file);
                run(&cfg, &mut sink)?
            }
            None => {
                let mut sink = JsonlSink::new(io::stdout());
                run(&cfg, &mut sink)?
            }
        },
        _ => {
            let mut sink = DebugSink::default();
            let frames = run(&cfg, &mut sink)?;
            let records = sink.objects.len();
            match &opts.output {
                Some(path) => std::fs::write(path, format!("{records} records\n"))?,
                None => println!("{records} records"),
            }
            frames
        }
    };

    let elapsed = now.elapsed().as_millis().max(1);
    info!("{} frames processed in {}ms: {} frames/s", frames, elapsed, (frames as u128 * 1000 / elapsed));
    trace!("verbosity level {}", opts.verbose);
    if opts.stop_on_error {
        warn!("stop-on-error enabled");
    }

    Ok(())
}
