/// Asserts that the agent at `(row, col)` holds the given energy (within 1e-9).
#[macro_export]
macro_rules! assert_energy_at {
    ($world:expr, $row:expr, $col:expr, $energy:expr) => {
        let agent = $world
            .grid()
            .get($row, $col)
            .and_then(|c| c.agent())
            .expect("No agent at the given position");
        assert!(
            (agent.energy - $energy).abs() < 1e-9,
            "Agent at ({}, {}) has energy {}, expected {}",
            $row,
            $col,
            agent.energy,
            $energy
        );
    };
}

/// Asserts that the cell at `(row, col)` is empty.
#[macro_export]
macro_rules! assert_cell_empty {
    ($world:expr, $row:expr, $col:expr) => {
        let cell = $world.grid().get($row, $col).expect("Position out of bounds");
        assert!(
            cell.is_empty(),
            "Cell ({}, {}) should be empty but holds {:?}",
            $row,
            $col,
            cell
        );
    };
}

/// Asserts the number of cells holding an agent.
#[macro_export]
macro_rules! assert_living {
    ($world:expr, $count:expr) => {
        assert_eq!(
            $world.population().living(),
            $count,
            "Living population mismatch"
        );
    };
}
