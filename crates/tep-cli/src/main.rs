//! Command-line front end for DC transmission expansion planning.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tep_algo::{BalanceMode, CostRule, ExpansionPlan, SolverConfig, System};
use tep_core::SystemSpec;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod garver;

#[derive(Parser)]
#[command(name = "tep", version, about = "DC transmission expansion planning")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a JSON network definition file
    Solve {
        /// Path to the network file
        network: PathBuf,
        /// Override the file's apparent-power base
        #[arg(long)]
        s_base: Option<f64>,
        #[command(flatten)]
        options: SolveOptions,
    },
    /// Solve the built-in Garver six-node example
    Demo {
        #[command(flatten)]
        options: SolveOptions,
    },
}

#[derive(Args)]
struct SolveOptions {
    /// Big-M constant for the flow disjunction, in per-unit power
    #[arg(long, default_value_t = SolverConfig::default().big_m)]
    big_m: f64,
    /// Existing lines contribute only their unconditional flow to the
    /// nodal balance (default doubles up selected existing lines)
    #[arg(long)]
    physical_balance: bool,
    /// Exclude existing lines from the capital-cost objective
    #[arg(long)]
    free_existing: bool,
}

impl SolveOptions {
    fn to_config(&self) -> SolverConfig {
        SolverConfig {
            big_m: self.big_m,
            balance: if self.physical_balance {
                BalanceMode::Physical
            } else {
                BalanceMode::DoubleCounted
            },
            cost_rule: if self.free_existing {
                CostRule::CandidatesOnly
            } else {
                CostRule::AllLines
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Solve {
            network,
            s_base,
            options,
        } => solve_file(&network, s_base, &options.to_config()),
        Commands::Demo { options } => solve_demo(&options.to_config()),
    }
}

fn solve_file(path: &PathBuf, s_base: Option<f64>, config: &SolverConfig) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading network file {}", path.display()))?;
    let spec: SystemSpec =
        serde_json::from_str(&text).context("parsing network definition")?;
    let lines = spec.to_lines()?;
    let s_base = s_base.unwrap_or(spec.s_base);

    info!(path = %path.display(), lines = lines.len(), s_base, "solving network file");
    let system = System::new(lines, s_base)?;
    let plan = system.optimize(config)?;
    report(&plan);
    Ok(())
}

fn solve_demo(config: &SolverConfig) -> Result<()> {
    let system = System::new(garver::lines(), garver::S_BASE)?;
    let plan = system.optimize(config)?;
    report(&plan);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults_match_solver_defaults() {
        let cli = Cli::try_parse_from(["tep", "demo"]).unwrap();
        let Commands::Demo { options } = cli.command else {
            panic!("expected the demo subcommand");
        };
        let config = options.to_config();
        let defaults = SolverConfig::default();
        assert_eq!(config.big_m, defaults.big_m);
        assert_eq!(config.balance, defaults.balance);
        assert_eq!(config.cost_rule, defaults.cost_rule);
    }
}

fn report(plan: &ExpansionPlan) {
    println!(
        "Cost of the expansion: {:.2}M USD",
        plan.expansion_cost * 1e-6
    );
    println!();
    println!("Lines to be constructed:");
    for id in plan.built_line_ids() {
        println!("{id}");
    }
    println!();
    println!("{}", plan.summary());
}
