use anyhow::{Context, Result};
use clap::Parser;
use crashboard_execution::{generate, histogram, summarize, CrashTier, CRASH_TIERS};
use crashboard_types::{round_multiplier, Histogram, Outcome, OutcomeSource, Summary};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

const DEFAULT_ROUNDS: usize = 100_000;

/// Sample the crash generator and compare it against its tier table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of rounds to generate.
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,

    /// Seed for reproducible runs (entropy when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the report as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Debug, Serialize)]
struct TierRow {
    range: String,
    expected: f64,
    observed: f64,
    count: u64,
}

#[derive(Debug, Serialize)]
struct Report {
    rounds: usize,
    seed: Option<u64>,
    tiers: Vec<TierRow>,
    summary: Option<Summary>,
    histogram: Histogram,
}

fn tier_index(value: f64) -> usize {
    CRASH_TIERS
        .iter()
        .position(|tier| value < tier.ceiling())
        .unwrap_or(CRASH_TIERS.len() - 1)
}

fn tier_range(tier: &CrashTier) -> String {
    format!("{:.2}x-{:.2}x", tier.base, tier.ceiling())
}

fn build_report(rounds: usize, seed: Option<u64>) -> Report {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut tier_counts = [0u64; CRASH_TIERS.len()];
    let mut outcomes = Vec::with_capacity(rounds);
    for idx in 0..rounds {
        let raw = generate(&mut rng);
        tier_counts[tier_index(raw)] += 1;
        outcomes.push(Outcome {
            id: idx as u64 + 1,
            multiplier: round_multiplier(raw),
            timestamp_ms: 0,
            source: OutcomeSource::Simulated,
        });
    }

    let tiers = CRASH_TIERS
        .iter()
        .zip(tier_counts)
        .map(|(tier, count)| TierRow {
            range: tier_range(tier),
            expected: tier.probability,
            observed: if rounds == 0 {
                0.0
            } else {
                count as f64 / rounds as f64
            },
            count,
        })
        .collect();

    Report {
        rounds,
        seed,
        tiers,
        summary: summarize(&outcomes),
        histogram: histogram(&outcomes),
    }
}

fn print_table(report: &Report) {
    println!("rounds: {}", report.rounds);
    if let Some(seed) = report.seed {
        println!("seed: {seed}");
    }
    println!();
    println!("{:<16} {:>10} {:>10} {:>10}", "tier", "expected", "observed", "count");
    for row in &report.tiers {
        println!(
            "{:<16} {:>9.2}% {:>9.2}% {:>10}",
            row.range,
            row.expected * 100.0,
            row.observed * 100.0,
            row.count
        );
    }

    println!();
    match &report.summary {
        Some(summary) => {
            println!("average:     {:.2}x", summary.average);
            println!("median:      {:.2}x", summary.median);
            println!("min / max:   {:.2}x / {:.2}x", summary.min, summary.max);
            println!("volatility:  {:.2}", summary.volatility);
            println!("below 2x:    {}", summary.crashes_below_2x);
            println!("5x or more:  {}", summary.crashes_above_5x);
            println!("10x or more: {}", summary.crashes_above_10x);
        }
        None => println!("no rounds generated"),
    }

    println!();
    for entry in report.histogram.iter() {
        println!("{:<14} {:>10}", entry.label, entry.count);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    tracing::info!(rounds = args.rounds, seed = ?args.seed, "generating distribution report");
    let report = build_report(args.rounds, args.seed);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        print_table(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["distribution-report"]);
        assert_eq!(args.rounds, DEFAULT_ROUNDS);
        assert_eq!(args.seed, None);
        assert!(!args.json);
    }

    #[test]
    fn observed_frequencies_track_tier_table() {
        let report = build_report(50_000, Some(3));
        assert_eq!(report.tiers.len(), CRASH_TIERS.len());
        let total: u64 = report.tiers.iter().map(|row| row.count).sum();
        assert_eq!(total, 50_000);
        for row in &report.tiers {
            assert!(
                (row.observed - row.expected).abs() < 0.015,
                "{}: observed {} expected {}",
                row.range,
                row.observed,
                row.expected
            );
        }
        assert_eq!(report.histogram.total(), 50_000);
        assert_eq!(report.summary.map(|s| s.count), Some(50_000));
    }

    #[test]
    fn empty_run_has_no_summary() {
        let report = build_report(0, Some(1));
        assert!(report.summary.is_none());
        assert!(report.tiers.iter().all(|row| row.count == 0 && row.observed == 0.0));
    }

    #[test]
    fn seeded_reports_match() {
        let left = build_report(1_000, Some(11));
        let right = build_report(1_000, Some(11));
        assert_eq!(left.summary, right.summary);
        assert_eq!(left.histogram, right.histogram);
    }

    #[test]
    fn tier_index_uses_ceilings() {
        assert_eq!(tier_index(1.0), 0);
        assert_eq!(tier_index(1.999), 0);
        assert_eq!(tier_index(2.0), 1);
        assert_eq!(tier_index(9.99), 2);
        assert_eq!(tier_index(49.99), 3);
        assert_eq!(tier_range(&CRASH_TIERS[3]), "10.00x-50.00x");
    }
}
