use crate::cli::RunArgs;
use crate::config::builder::build_config;
use crate::config::scenario::Scenario;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chemsim::{
    engine::progress::ProgressReporter,
    workflows::{self, driver::Simulation, run::RunSummary},
};
use tracing::{info, warn};

pub fn run(args: RunArgs, quiet: bool) -> Result<()> {
    info!("Resolving run configuration...");
    let config = build_config(&args)?;

    let scenario = match &config.scenario {
        Some(path) => {
            info!("Loading scenario from {:?}", path);
            Scenario::load(path)?
        }
        None => Scenario::default(),
    };

    let mut sim = Simulation::new(config.simulation);
    for (index, command) in scenario.setup.into_iter().enumerate() {
        let name = command.name();
        sim.apply(command).map_err(|source| CliError::Setup {
            index,
            command: name,
            source,
        })?;
    }
    info!(
        atoms = sim.state().atom_count(),
        bonds = sim.state().bond_count(),
        "Initial conditions applied."
    );

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    if !quiet {
        println!("Running {} ticks of {:.4} s...", config.ticks, config.dt);
    }
    let summary = workflows::run::run(
        &mut sim,
        config.ticks,
        config.dt,
        &scenario.schedule,
        &reporter,
    )?;

    if summary.commands_rejected > 0 {
        warn!(
            rejected = summary.commands_rejected,
            "Some scheduled commands were rejected."
        );
    }
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "Ticks:           {} advanced of {} requested",
        summary.ticks_advanced, summary.ticks_requested
    );
    println!("Simulated time:  {:.3} s", summary.simulated_time);
    println!(
        "Commands:        {} applied, {} rejected",
        summary.commands_applied, summary.commands_rejected
    );
    print!("{}", summary.stats);
}
