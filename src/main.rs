//! Command-line entry point: loads an operator/machine/property triple
//! (either from LTSA files or a bundled fixture), runs the modification
//! search, and reports every violator found.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use opmodel_repair::fixtures::Fixtures;
use opmodel_repair::patterns::PatternLibrary;
use opmodel_repair::property::{Interpretation, Property};
use opmodel_repair::{ltsa, search, Automaton, EngineError, SearchOutcome};

/// Search for operator-model rewrites that violate a safety property.
#[derive(Parser, Debug)]
#[command(name = "opmodel-repair", version, about)]
struct Cli {
    /// Path to an LTSA file for the operator model.
    #[arg(long)]
    operator: Option<PathBuf>,

    /// Path to an LTSA file for the machine model.
    #[arg(long)]
    machine: Option<PathBuf>,

    /// Path to an LTSA file for the property model.
    #[arg(long)]
    property: Option<PathBuf>,

    /// Use a bundled fixture set instead of LTSA files: "cycle" or "cdm".
    #[arg(long, conflicts_with_all = ["operator", "machine", "property"])]
    fixture: Option<String>,

    /// Error state of the property automaton (repeatable).
    #[arg(long = "error-state")]
    error_states: Vec<usize>,

    /// Maximum number of chained rewrites to try.
    #[arg(long, default_value_t = 2)]
    depth: usize,

    /// Maximum embeddings tried per pattern at each search level.
    #[arg(long = "limit-per-level", default_value_t = 64)]
    limit_per_level: usize,

    /// Per-candidate property-check deadline, in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = 1000)]
    timeout_ms: u64,

    /// Raise the tracing filter to "debug".
    #[arg(short, long)]
    verbose: bool,
}

struct Models {
    operator: Automaton,
    machine: Automaton,
    property: Automaton,
    error_states: Vec<usize>,
}

fn load_models(cli: &Cli) -> Result<Models, EngineError> {
    if let Some(name) = &cli.fixture {
        let (operator, machine) = match name.as_str() {
            "cycle" => (Fixtures::ex_cycle(4), Fixtures::ex_cycle(4)),
            "cdm" => (Fixtures::ex_cdm(), Fixtures::ex_linear()),
            other => {
                return Err(EngineError::InvalidArg(format!(
                    "unknown fixture set '{other}' (expected 'cycle' or 'cdm')"
                )))
            }
        };
        let error_states = if cli.error_states.is_empty() {
            vec![5]
        } else {
            cli.error_states.clone()
        };
        return Ok(Models {
            operator,
            machine,
            property: Fixtures::prop_five(),
            error_states,
        });
    }

    let operator = cli
        .operator
        .as_ref()
        .ok_or_else(|| EngineError::InvalidArg("--operator is required without --fixture".into()))?;
    let machine = cli
        .machine
        .as_ref()
        .ok_or_else(|| EngineError::InvalidArg("--machine is required without --fixture".into()))?;
    let property = cli
        .property
        .as_ref()
        .ok_or_else(|| EngineError::InvalidArg("--property is required without --fixture".into()))?;

    Ok(Models {
        operator: ltsa::load(operator)?,
        machine: ltsa::load(machine)?,
        property: ltsa::load(property)?,
        error_states: cli.error_states.clone(),
    })
}

fn run(cli: Cli) -> Result<(), EngineError> {
    let models = load_models(&cli)?;
    let property = Property::new(models.property, Interpretation::Nop, models.error_states);
    let patterns = PatternLibrary::init();
    let timeout = std::time::Duration::from_millis(cli.timeout_ms);

    let mut violators_found = 0usize;
    let outcome = search::search(
        &models.operator,
        &models.machine,
        &property,
        &patterns,
        cli.depth,
        cli.limit_per_level,
        timeout,
        |violator| {
            violators_found += 1;
            println!(
                "violator #{violators_found}: patterns applied = {:?}",
                violator.applied
            );
        },
    );

    match outcome {
        SearchOutcome::Success { violators, tried } => {
            println!("Success: {violators} violator(s) found after {tried} candidate(s) checked");
        }
        SearchOutcome::NotFound { tried } => {
            println!("NotFound: no violator among {tried} candidate(s) checked");
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
