//! Rumor Simulation
//!
//! Spreads a rumor over a random contact graph and reports how many rounds
//! it takes until everybody knows that everybody knows, to the configured
//! depth.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use rumor_core::output::{describe_outcome, format_series_table, write_reports};
use rumor_core::{default_config_toml, ConfigError, ConfigFile, SimConfig, SimError, Simulator};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "rumor_sim")]
#[command(about = "Rumor spreading and common-knowledge escalation on a random contact graph")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of agents
    #[arg(short = 'a', long = "agents")]
    agents: Option<usize>,

    /// Random contact draws per agent
    #[arg(short = 'c', long)]
    connectivity: Option<usize>,

    /// Degree of shared knowledge (number of levels)
    #[arg(short = 'n', long = "depth")]
    depth: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Stop a run after this many rounds
    #[arg(long)]
    max_rounds: Option<u64>,

    /// Write the JSON report to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip the per-round table
    #[arg(long)]
    no_table: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

impl Args {
    /// Command line values take precedence over the configuration file.
    fn apply(&self, mut config: SimConfig) -> SimConfig {
        if let Some(agents) = self.agents {
            config.agent_count = agents;
        }
        if let Some(connectivity) = self.connectivity {
            config.connectivity = connectivity;
        }
        if let Some(depth) = self.depth {
            config.knowledge_depth = depth;
        }
        if self.seed.is_some() {
            config.random_seed = self.seed;
        }
        if self.max_rounds.is_some() {
            config.max_rounds = self.max_rounds;
        }
        config
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("could not write report: {0}")]
    Output(#[from] std::io::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    if args.print_default_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    let file = match &args.config {
        Some(path) => ConfigFile::from_file(path)?,
        None => ConfigFile::default(),
    };
    let runs: Vec<SimConfig> = file
        .experiments()
        .into_iter()
        .map(|config| args.apply(config))
        .collect();

    println!("Rumor Simulation");
    println!("================");

    let mut reports = Vec::with_capacity(runs.len());
    for (index, config) in runs.iter().enumerate() {
        println!();
        println!(
            "Experiment {} of {}: {} agents, connectivity {}, depth {}",
            index + 1,
            runs.len(),
            config.agent_count,
            config.connectivity,
            config.knowledge_depth
        );

        let mut simulator = Simulator::new(config)?;
        if let Some(seed) = simulator.seed() {
            println!("  Seed: {}", seed);
        }
        println!("  Origin: {}", simulator.origin());

        simulator.run_with_limit(config.max_rounds);
        let report = simulator.report(index as u64 + 1);

        if !args.no_table {
            println!();
            print!("{}", format_series_table(&report.metrics));
        }
        println!("  {}", describe_outcome(&report));
        reports.push(report);
    }

    if let Some(path) = &args.output {
        write_reports(&reports, path)?;
        println!();
        println!("Wrote {}", path.display());
    }

    Ok(())
}
