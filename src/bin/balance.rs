#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use balanced_partition::report::{build_report, render_text, GroupingReport};
use balanced_partition::sample::{random_sample, reference_sample, subsample, REFERENCE_METRICS};
use balanced_partition::{
    greedy_partition, level_all, Item, LevelingOptions, PairOrder, PartitionError, Weighted,
};

/// Round budget per group pair in the demo scenarios.
const DEMO_ROUND_COUNT: usize = 100;
/// Per-pair stop threshold in the demo scenarios.
const DEMO_MIN_PRECISION: f64 = 0.1;

#[derive(Parser)]
#[command(name = "balance", version, about = "Balanced multi-way partitioning")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demonstration scenarios
    Demo {
        /// Seed for sample selection and generation (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Emit one JSON report per line instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        leveling: LevelingArgs,
    },
    /// Balance explicit metrics into groups
    Split {
        /// Comma-separated item metrics
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        metrics: Vec<f64>,
        /// Number of groups
        #[arg(long)]
        groups: usize,
        /// Emit a JSON report instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        leveling: LevelingArgs,
    },
}

#[derive(Args)]
struct LevelingArgs {
    /// Maximum swap rounds per group pair
    #[arg(long)]
    round_count: Option<usize>,
    /// Stop leveling a pair once a round improves it by this much or less
    #[arg(long)]
    min_precision: Option<f64>,
    /// Visit each group pair once instead of from both sides
    #[arg(long)]
    unordered_pairs: bool,
}

impl LevelingArgs {
    fn to_options(&self, base: LevelingOptions) -> LevelingOptions {
        let pair_order = if self.unordered_pairs {
            PairOrder::Unordered
        } else {
            base.pair_order
        };
        LevelingOptions {
            round_count: self.round_count.unwrap_or(base.round_count),
            min_precision: self.min_precision.unwrap_or(base.min_precision),
            pair_order,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(err) = e.downcast_ref::<PartitionError>() {
                error!(
                    code = err.code(),
                    argument_error = err.is_argument_error(),
                    "balancing failed"
                );
            }
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Demo {
            seed,
            json,
            leveling,
        } => {
            let options =
                leveling.to_options(LevelingOptions::new(DEMO_ROUND_COUNT, DEMO_MIN_PRECISION));
            options.validate()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let reference = reference_sample();
            let full = subsample(&reference, reference.len(), &mut rng)?;
            let third = subsample(&reference, REFERENCE_METRICS.len().div_ceil(3), &mut rng)?;
            let small_random = random_sample(100, 0.1, 10.0, &mut rng)?;
            let large_random = random_sample(6000, 0.1, 100.0, &mut rng)?;

            let scenarios: [(&str, &[Item], usize); 5] = [
                ("Full sample with few groups", full.as_slice(), 4),
                ("Full sample with many groups", full.as_slice(), 18),
                ("Subsample with few groups", third.as_slice(), 5),
                ("Random sample", small_random.as_slice(), 5),
                ("Random sample", large_random.as_slice(), 15),
            ];

            let mut stdout = io::stdout().lock();
            for (label, items, group_count) in scenarios {
                let report = run_scenario(label, items, group_count, &options)?;
                emit(&mut stdout, &report, json)?;
            }
        }
        Commands::Split {
            metrics,
            groups,
            json,
            leveling,
        } => {
            let options = leveling.to_options(LevelingOptions::default());
            options.validate()?;
            let items: Vec<Item> = metrics
                .iter()
                .enumerate()
                .map(|(index, &metric)| Item::with_index(metric, index))
                .collect();
            let report = run_scenario("Split", &items, groups, &options)?;
            emit(&mut io::stdout().lock(), &report, json)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_scenario<T: Weighted>(
    label: &str,
    items: &[T],
    group_count: usize,
    options: &LevelingOptions,
) -> Result<GroupingReport, Box<dyn std::error::Error>> {
    let mut partition = greedy_partition(items, group_count)?;
    let greedy_totals = partition.totals();
    let summary = level_all(&mut partition, options)?;
    Ok(build_report(label, &partition)
        .with_greedy_baseline(&greedy_totals)
        .with_leveling(summary))
}

fn emit(out: &mut impl Write, report: &GroupingReport, json: bool) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(report).map_err(io::Error::other)?;
        writeln!(out, "{line}")
    } else {
        writeln!(out, "{}", render_text(report))
    }
}
