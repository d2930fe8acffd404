//! Commands for controlling a running simulation from its host.

use biogrid_core::config::Variant;
use biogrid_core::simulation::InjectKind;
use serde::{Deserialize, Serialize};

/// Commands sent from a front end to the simulation task.
///
/// They are applied strictly between ticks, in the order received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Stop ticking on the timer
    Pause,
    /// Resume ticking on the timer
    Resume,
    TogglePause,
    /// Execute a single tick, even while paused
    Step,
    /// Replace the whole grid with a fresh population
    Reset,
    /// Change the timer cadence (ticks per second)
    SetTickRate(u64),
    /// Paint a fresh agent at a position
    Inject {
        row: usize,
        col: usize,
        kind: InjectKind,
    },
    /// Maximise the pattern level at a position
    Perturb { row: usize, col: usize },
    /// Perturb a random cell
    PerturbRandom,
    /// Stop the simulation task
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostState {
    Running,
    Paused,
    Stopped,
}

impl HostState {
    /// The pattern variant starts running; the organism variants start
    /// paused so the initial scatter can be inspected.
    pub fn initial_for(variant: Variant) -> Self {
        match variant {
            Variant::Diffusive => HostState::Running,
            Variant::Territorial | Variant::Trophic => HostState::Paused,
        }
    }
}

/// Published after every command and tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStatus {
    pub state: HostState,
    pub tick: u64,
    pub tick_rate: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_per_variant() {
        assert_eq!(HostState::initial_for(Variant::Diffusive), HostState::Running);
        assert_eq!(HostState::initial_for(Variant::Territorial), HostState::Paused);
        assert_eq!(HostState::initial_for(Variant::Trophic), HostState::Paused);
    }

    #[test]
    fn test_command_serde() {
        let cmd = Command::Inject {
            row: 2,
            col: 3,
            kind: InjectKind::Predator,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), cmd);
    }
}
