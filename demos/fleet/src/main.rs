//! fleet — run the eVTOL charging simulation from the command line.
//!
//! Builds a random fleet from the five stock categories (or a JSON catalog),
//! shares a handful of chargers between them, and prints per-category
//! flight, charging and waiting totals once the simulated window closes.
//!
//! ```text
//! fleet --vehicles 20 --chargers 3 --minutes 180 --seed 42
//! fleet --catalog my_fleet.json --json
//! fleet --replicates 16 --quiet
//! ```

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;

use ev_core::time::split_hms;
use ev_core::{SimConfig, Tick};
use ev_fleet::Catalog;
use ev_sim::{SimBuilder, SimObserver, mean_by_category, run_replicates};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Simulate an eVTOL fleet sharing a pool of chargers")]
struct Args {
    /// Number of vehicles (at least one of each category when possible).
    #[arg(long, default_value_t = 20)]
    vehicles: usize,

    /// Number of single-occupancy chargers.
    #[arg(long, default_value_t = 3)]
    chargers: usize,

    /// Simulated minutes to run.
    #[arg(long, default_value_t = 180)]
    minutes: u64,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 600)]
    tick_ms: u64,

    /// Seed for the fleet mix and fault draws.  Omit for a fresh seed.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON array of vehicle specs to use instead of the stock categories.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Run this many seeds (seed, seed+1, ...) and print per-category means.
    #[arg(long)]
    replicates: Option<u64>,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Suppress the live time-remaining line.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Rewrites one "Time remaining" line in place.  The first write error is
/// kept and retrieved with [`take_error`][Self::take_error] after the run.
struct TimeRemaining<W: Write> {
    out:        W,
    last_error: Option<io::Error>,
}

impl<W: Write> TimeRemaining<W> {
    fn new(out: W) -> Self {
        Self { out, last_error: None }
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    fn write_line(&mut self, remaining_ms: u64, end: &str) {
        let (h, m, s) = split_hms(remaining_ms);
        let result = write!(self.out, "\rTime remaining: {h}:{m:02}:{s:02}   {end}")
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            self.last_error.get_or_insert(e);
        }
    }
}

impl<W: Write> SimObserver for TimeRemaining<W> {
    fn on_progress(&mut self, _tick: Tick, remaining_ms: u64) {
        self.write_line(remaining_ms, "");
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.write_line(0, "\n");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::presets());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("reading catalog {}", path.display()))
}

fn minutes_to_ms(minutes: u64) -> Result<u64> {
    match minutes.checked_mul(60_000) {
        Some(ms) => Ok(ms),
        None => bail!("--minutes {minutes} is too large"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = SimConfig {
        fleet_size:       args.vehicles,
        charger_count:    args.chargers,
        duration_ms:      minutes_to_ms(args.minutes)?,
        tick_duration_ms: args.tick_ms,
        seed:             args.seed,
        ..SimConfig::default()
    };
    let catalog = load_catalog(args.catalog.as_ref())?;

    if let Some(count) = args.replicates {
        if count == 0 {
            bail!("--replicates must be at least 1");
        }
        let base = args.seed.unwrap_or(0);
        let seeds: Vec<u64> = (0..count).map(|i| base.wrapping_add(i)).collect();

        let t0 = Instant::now();
        let reports = run_replicates(&config, &catalog, &seeds)?;
        let means = mean_by_category(&reports);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&means)?);
            return Ok(());
        }
        println!(
            "{count} replicates in {:.3} s (seeds {base}..{})",
            t0.elapsed().as_secs_f64(),
            base.wrapping_add(count - 1)
        );
        println!();
        println!(
            "{:<10} {:>8} {:>10} {:>10} {:>10} {:>8} {:>12}",
            "Category", "Count", "Flight h", "Charge h", "Wait h", "Faults", "Pass. miles"
        );
        println!("{}", "-".repeat(74));
        for m in &means {
            println!(
                "{:<10} {:>8.2} {:>10.3} {:>10.3} {:>10.3} {:>8.2} {:>12.1}",
                m.name,
                m.vehicle_count,
                m.flight_hours,
                m.charge_hours,
                m.wait_hours,
                m.faults,
                m.passenger_miles
            );
        }
        return Ok(());
    }

    let mut sim = SimBuilder::new(config, catalog).build()?;
    if !args.json {
        println!(
            "Vehicles: {}  |  Chargers: {}  |  Minutes: {}  |  Seed: {}",
            args.vehicles,
            args.chargers,
            args.minutes,
            sim.seed()
        );
    }

    let t0 = Instant::now();
    let report = if args.quiet || args.json {
        sim.run(&mut ev_sim::NoopObserver)
    } else {
        let mut progress = TimeRemaining::new(io::stdout());
        let report = sim.run(&mut progress);
        if let Some(e) = progress.take_error() {
            return Err(e).context("writing progress to stdout");
        }
        report
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Simulation complete in {:.3} s", t0.elapsed().as_secs_f64());
        println!();
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn minutes_convert_to_ms() {
        assert_eq!(minutes_to_ms(180).unwrap(), 10_800_000);
    }

    #[test]
    fn oversized_minutes_rejected() {
        let err = minutes_to_ms(u64::MAX / 1_000).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn progress_line_is_rewritten_in_place() {
        let mut progress = TimeRemaining::new(Vec::new());
        progress.on_progress(Tick(0), 3_723_000);
        progress.on_sim_end(Tick(1));
        assert!(progress.take_error().is_none());
        let text = String::from_utf8(progress.out).unwrap();
        assert_eq!(text, "\rTime remaining: 1:02:03   \rTime remaining: 0:00:00   \n");
    }

    #[test]
    fn first_write_error_is_kept() {
        let mut progress = TimeRemaining::new(BrokenPipe);
        progress.on_progress(Tick(0), 1_000);
        progress.on_sim_end(Tick(1));
        let err = progress.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(progress.take_error().is_none());
    }
}
