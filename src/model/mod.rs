//! Kernel modules re-exported under the host crate's namespace.

pub use biogrid_core::{InjectKind, Simulation, SimError};

pub mod config {
    pub use biogrid_core::config::*;
}
pub mod grid {
    pub use biogrid_core::grid::*;
}
pub mod interaction {
    pub use biogrid_core::interaction::*;
}
pub mod metrics {
    pub use biogrid_core::metrics::*;
}
pub mod neighborhood {
    pub use biogrid_core::neighborhood::*;
}
pub mod rules {
    pub use biogrid_core::rules::*;
}
pub mod snapshot {
    pub use biogrid_core::snapshot::*;
}
pub mod world {
    pub use biogrid_core::world::*;
}

pub mod state {
    pub use biogrid_data::*;
}
