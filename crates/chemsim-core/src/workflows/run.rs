use super::driver::Simulation;
use crate::engine::analysis::SimulationStats;
use crate::engine::command::Command;
use crate::engine::config::ConfigError;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

/// A command to apply just before the tick with the given zero-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledCommand {
    pub tick: u64,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks_requested: u64,
    /// Ticks that actually advanced the state; paused ticks are not counted.
    pub ticks_advanced: u64,
    pub commands_applied: usize,
    pub commands_rejected: usize,
    pub simulated_time: f64,
    pub stats: SimulationStats,
}

/// Runs `sim` headlessly for `ticks` frames of `frame_dt` seconds each.
///
/// Scheduled commands are applied between ticks, in tick order and then in the order given.
/// Rejected commands are logged and counted but do not stop the run. Entries scheduled at or
/// after `ticks` are never applied.
#[instrument(skip_all, name = "headless_run_workflow", fields(ticks = ticks, frame_dt = frame_dt))]
pub fn run(
    sim: &mut Simulation,
    ticks: u64,
    frame_dt: f64,
    schedule: &[ScheduledCommand],
    reporter: &ProgressReporter,
) -> Result<RunSummary, EngineError> {
    if !(frame_dt.is_finite() && frame_dt > 0.0) {
        return Err(ConfigError::InvalidParameter {
            name: "dt",
            value: frame_dt,
        }
        .into());
    }

    let mut ordered: Vec<&ScheduledCommand> = schedule.iter().collect();
    ordered.sort_by_key(|entry| entry.tick);
    let unreachable = ordered.iter().filter(|entry| entry.tick >= ticks).count();
    if unreachable > 0 {
        warn!(
            count = unreachable,
            "Some scheduled commands fall after the last tick and will be skipped."
        );
    }

    info!(
        atoms = sim.state().atom_count(),
        scheduled = ordered.len(),
        "Starting headless run."
    );
    reporter.report(Progress::RunStart { total_ticks: ticks });

    let start_ticks = sim.tick_count();
    let start_time = sim.elapsed();
    let mut applied = 0;
    let mut rejected = 0;
    let mut next_entry = ordered.iter().peekable();

    for tick in 0..ticks {
        while let Some(entry) = next_entry.next_if(|entry| entry.tick == tick) {
            match sim.apply(entry.command.clone()) {
                Ok(_) => applied += 1,
                Err(e) => {
                    warn!(tick, command = entry.command.name(), error = %e, "Scheduled command rejected.");
                    rejected += 1;
                }
            }
        }

        sim.advance(frame_dt);
        reporter.report(Progress::TickCompleted {
            tick: tick + 1,
            atoms: sim.state().atom_count(),
            bonds: sim.state().bond_count(),
        });
    }

    reporter.report(Progress::RunFinish);

    let summary = RunSummary {
        ticks_requested: ticks,
        ticks_advanced: sim.tick_count() - start_ticks,
        commands_applied: applied,
        commands_rejected: rejected,
        simulated_time: sim.elapsed() - start_time,
        stats: sim.stats(),
    };
    info!(
        ticks = summary.ticks_advanced,
        bonds = summary.stats.bonds,
        "Headless run complete."
    );
    Ok(summary)
}
