//! PolyFlow CLI - dependence analysis front end
//!
//! Loads a JSON scope description, computes the exact RAW/WAR/WAW
//! dependences and prints them, optionally together with a per-depth
//! parallelism report.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin polyflow -- analyze \
//!   --input scop.json \
//!   --kinds all \
//!   --parallel
//! ```
//!
//! Logging of the intermediate relations is available through the standard
//! `RUST_LOG` environment variable, e.g. `RUST_LOG=debug`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use isl_rs::{Context, DimType, Set, Space};
use polyflow::{AnalysisConfig, DependenceAnalysis, DependenceKinds, ScopDescription};

#[derive(Parser)]
#[clap(name = "polyflow")]
#[clap(about = "Exact dependence analysis for polyhedral scopes")]
#[clap(version)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the dependences of a scope description and report them.
    Analyze {
        /// JSON scope description file
        #[clap(long = "input", short = 'i', value_name = "FILE")]
        input: PathBuf,

        /// Dependence kinds to print: raw, war, waw or all
        #[clap(long = "kinds", default_value = "all")]
        kinds: String,

        /// Also report, for every schedule depth, whether the dimension can
        /// run in parallel
        #[clap(long = "parallel")]
        parallel: bool,
    },
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Commands::Analyze {
            input,
            kinds,
            parallel,
        } => analyze(&input, &kinds, parallel),
    }
}

fn parse_kinds(kinds: &str) -> Result<DependenceKinds, String> {
    match kinds {
        "raw" => Ok(DependenceKinds::RAW),
        "war" => Ok(DependenceKinds::WAR),
        "waw" => Ok(DependenceKinds::WAW),
        "all" => Ok(DependenceKinds::ALL),
        other => Err(format!(
            "unknown dependence kind `{}` (expected raw, war, waw or all)",
            other
        )),
    }
}

fn analyze(input: &Path, kinds: &str, parallel: bool) -> Result<(), String> {
    let kinds = parse_kinds(kinds)?;

    let description = ScopDescription::from_file(input).map_err(|e| e.to_string())?;
    let ctx = Arc::new(Context::alloc());
    let scop = description
        .build_scop(ctx.clone())
        .map_err(|e| e.to_string())?;

    let mut analysis = DependenceAnalysis::new(scop, AnalysisConfig::default());
    analysis.calculate_dependences();

    let deps = analysis.get_dependences(kinds).map_err(|e| e.to_string())?;
    println!("dependences: {}", deps.to_str());

    if parallel {
        // The shallowest scattering bounds how deep the report can go.
        let depths = analysis
            .scop()
            .statements()
            .iter()
            .map(|s| s.scattering().dim(DimType::Out) as u32)
            .min()
            .unwrap_or(0);

        for depth in 0..depths {
            // Consider every schedule-prefix value any statement can reach.
            let domain = Set::universe(Space::set_alloc(&ctx, 0, depth + 1))
                .align_params(analysis.scop().param_space().copy());
            let is_parallel = analysis
                .is_parallel_dimension(domain, depth)
                .map_err(|e| e.to_string())?;
            println!(
                "depth {}: {}",
                depth,
                if is_parallel { "parallel" } else { "sequential" }
            );
        }
    }

    Ok(())
}
