use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use u_triage::allocator::{TieBreaker, TriageAllocator};
use u_triage::config::AllocationConfig;
use u_triage::input::json::{load_scenario, save_scenario, Scenario};
use u_triage::input::prompt::Prompter;
use u_triage::input::synth::{generate, SynthParams};
use u_triage::input::{self, preset};
use u_triage::models::AllocationProblem;
use u_triage::report::AllocationReport;

#[derive(Parser)]
#[command(name = "triage-alloc")]
#[command(about = "Equity-constrained diagnostic test allocation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Share of resource-0 capacity reserved for low-priority tests
    #[arg(long, global = true)]
    equity_fraction: Option<f64>,

    /// Priority score below which a test counts as low priority
    #[arg(long, global = true)]
    cutoff: Option<f64>,

    /// Ordering of candidates with equal sort keys
    #[arg(long, global = true, value_enum)]
    tie_breaker: Option<TieBreakerArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the packaged example dataset
    Preset,
    /// Run a JSON scenario file
    Run {
        /// Scenario file
        file: PathBuf,
    },
    /// Enter a problem interactively
    Interactive,
    /// Run a seeded synthetic scenario
    Synth {
        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Number of tests
        #[arg(long, default_value_t = 30)]
        tests: usize,
        /// Number of resources
        #[arg(long, default_value_t = 3)]
        resources: usize,
        /// Number of conditions
        #[arg(long, default_value_t = 6)]
        conditions: usize,
        /// Budget ceiling
        #[arg(long, default_value_t = 2500.0)]
        budget: f64,
        /// Also write the generated scenario to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TieBreakerArg {
    ById,
    InputOrder,
}

impl From<TieBreakerArg> for TieBreaker {
    fn from(arg: TieBreakerArg) -> Self {
        match arg {
            TieBreakerArg::ById => TieBreaker::ById,
            TieBreakerArg::InputOrder => TieBreaker::InputOrder,
        }
    }
}

impl Cli {
    fn apply_overrides(&self, mut config: AllocationConfig) -> AllocationConfig {
        if let Some(fraction) = self.equity_fraction {
            config = config.with_equity_fraction(fraction);
        }
        if let Some(cutoff) = self.cutoff {
            config = config.with_low_priority_cutoff(cutoff);
        }
        if let Some(tie_breaker) = self.tie_breaker {
            config = config.with_tie_breaker(tie_breaker.into());
        }
        config
    }
}

fn load(cli: &Cli) -> Result<(AllocationProblem, Option<AllocationConfig>)> {
    match &cli.command {
        Commands::Preset => Ok((preset::example_problem(), None)),
        Commands::Run { file } => {
            let scenario = load_scenario(file)
                .with_context(|| format!("failed to load scenario {}", file.display()))?;
            Ok((scenario.problem, scenario.config))
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            let problem = Prompter::new(stdin.lock(), io::stderr())
                .read_problem()
                .context("failed to read problem")?;
            Ok((problem, None))
        }
        Commands::Synth {
            seed,
            tests,
            resources,
            conditions,
            budget,
            save,
        } => {
            let params = SynthParams {
                tests: *tests,
                resources: *resources,
                conditions: *conditions,
                budget_max: *budget,
                ..SynthParams::default()
            };
            let problem = generate(&params, *seed);
            if let Some(path) = save {
                save_scenario(path, &Scenario::new(problem.clone()))
                    .with_context(|| format!("failed to save scenario {}", path.display()))?;
            }
            Ok((problem, None))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let (problem, scenario_config) = load(&cli)?;
    let problem = input::prepare(problem).context("invalid allocation problem")?;
    let config = cli.apply_overrides(scenario_config.unwrap_or_default());

    let outcome = TriageAllocator::with_config(config).allocate(&problem);
    let report = AllocationReport::from_outcome(&outcome);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
