//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim: configuration
//! layering, the interactive prompt, the one-shot `get` and `batch`
//! commands, and rayon configuration.

use almanac::error::AlmanacError;
use almanac::generator::BatchGenerator;
use almanac::stats::StatsSnapshot;
use almanac::{config, DateValue, GeneratorConfig, RankedCache};
use anyhow::Result;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{info, warn};

use super::Cli;

// ── Configuration ───────────────────────────────────────────────

/// Defaults, then the config file, then command-line flags.
pub fn resolve_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut resolved = match &cli.config {
        Some(path) => config::parse_toml_file(path)?,
        None => GeneratorConfig::default(),
    };
    if cli.check {
        resolved.strict = true;
    }
    if cli.sequential {
        resolved.parallel = false;
    }
    info!(
        strict = resolved.strict,
        parallel = resolved.parallel,
        "generator configured"
    );
    Ok(resolved)
}

/// Parse a rank typed by the user. Non-integers and ranks below 1 are
/// both `InvalidRank`.
pub fn parse_rank(text: &str) -> Result<i64, AlmanacError> {
    let rank: i64 = text
        .trim()
        .parse()
        .map_err(|_| AlmanacError::InvalidRank(text.trim().to_string()))?;
    if rank < 1 {
        return Err(AlmanacError::invalid_rank(rank));
    }
    Ok(rank)
}

// ── Interactive Prompt ──────────────────────────────────────────

pub fn run_repl(config: GeneratorConfig) -> Result<()> {
    let mut cache = RankedCache::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl(&mut cache, stdin.lock(), &mut stdout)?;
    cache.stats().log_summary();
    Ok(())
}

/// Prompt loop over arbitrary input/output so it can be driven in tests.
pub fn repl<R: BufRead, W: Write>(cache: &mut RankedCache, mut input: R, out: &mut W) -> Result<()> {
    loop {
        write!(out, "Enter date number (or 'stop'): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let entry = line.trim();
        if entry.eq_ignore_ascii_case("stop") {
            return Ok(());
        }

        let rank = match parse_rank(entry) {
            Ok(rank) => rank,
            Err(_) if entry.parse::<i64>().is_ok() => {
                writeln!(out, "Please enter a positive integer.")?;
                continue;
            }
            Err(_) => {
                writeln!(out, "Invalid input. Please enter an integer or 'stop'.")?;
                continue;
            }
        };

        let started = Instant::now();
        match cache.get_nth_date(rank) {
            Ok(value) => writeln!(
                out,
                "{}  ({:.3}s, {} cached)",
                value,
                started.elapsed().as_secs_f64(),
                cache.len()
            )?,
            Err(e @ AlmanacError::RankOutOfRange { .. }) => writeln!(out, "{}", e)?,
            Err(e) => return Err(e.into()),
        }
    }
}

// ── One-Shot Commands ───────────────────────────────────────────

pub fn run_get(config: GeneratorConfig, ranks: &[String]) -> Result<()> {
    let mut cache = RankedCache::new(config);
    let mut stdout = io::stdout().lock();
    for text in ranks {
        let rank = parse_rank(text)?;
        let value = cache.get_nth_date(rank)?;
        writeln!(stdout, "{}", value)?;
    }
    cache.stats().log_summary();
    Ok(())
}

#[derive(Debug, Serialize)]
struct BatchReport {
    pairs: usize,
    count: usize,
    min: Option<DateValue>,
    max: Option<DateValue>,
    stats: StatsSnapshot,
}

pub fn run_batch(config: GeneratorConfig, pairs: usize, json: bool) -> Result<()> {
    let generator = BatchGenerator::new(config);
    let batch = generator.generate_batch(pairs)?;
    let report = BatchReport {
        pairs,
        count: batch.len(),
        min: batch.first().copied(),
        max: batch.last().copied(),
        stats: generator.stats().snapshot(),
    };

    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
    } else {
        write!(stdout, "{} pairs: {} dates", report.pairs, report.count)?;
        if let (Some(min), Some(max)) = (report.min, report.max) {
            write!(stdout, ", smallest {}, largest {}", min, max)?;
        }
        writeln!(stdout)?;
    }
    Ok(())
}

// ── Rayon ───────────────────────────────────────────────────────

pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> String {
        let mut cache = RankedCache::new(GeneratorConfig::default());
        let mut out = Vec::new();
        repl(&mut cache, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_rank_accepts_positive_integers() {
        assert_eq!(parse_rank("1").unwrap(), 1);
        assert_eq!(parse_rank(" 842 \n").unwrap(), 842);
    }

    #[test]
    fn parse_rank_rejects_everything_else() {
        for text in ["0", "-5", "abc", "1.5", ""] {
            assert!(
                matches!(parse_rank(text), Err(AlmanacError::InvalidRank(_))),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn repl_answers_then_stops() {
        let out = session("1\n2\nstop\n");
        assert!(out.contains("22  ("));
        assert!(out.contains("10123133  ("));
        assert!(out.contains("841 cached)"));
        assert_eq!(out.matches("Enter date number (or 'stop'): ").count(), 3);
    }

    #[test]
    fn repl_stop_is_case_insensitive() {
        let out = session("STOP\n1\n");
        assert!(!out.contains("22  ("));
    }

    #[test]
    fn repl_reports_bad_input_and_continues() {
        let out = session("banana\n0\n-3\n1\n");
        assert!(out.contains("Invalid input. Please enter an integer or 'stop'."));
        assert_eq!(out.matches("Please enter a positive integer.").count(), 2);
        assert!(out.contains("s, 1 cached)"));
    }

    #[test]
    fn repl_ends_at_end_of_input() {
        let out = session("");
        assert_eq!(out, "Enter date number (or 'stop'): \n");
    }
}
