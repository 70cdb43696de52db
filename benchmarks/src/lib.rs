//! Shared helpers for wayfind benchmark suites.

use wayfind_worlds::worlds::dungeon::{Cell, Dungeon};

/// An `n × n` dungeon with no walls and the target in the far corner.
///
/// # Panics
///
/// Panics if `n` is zero. Benchmark setup failures are fatal.
#[must_use]
pub fn open_dungeon(n: usize) -> Dungeon {
    let walls = vec![vec![false; n]; n];
    Dungeon::new(walls, Cell::new(n - 1, n - 1)).expect("open dungeon")
}

/// An `n × n` serpentine maze: every other row is a wall with a single gap,
/// alternating between the right and left edge, so the only route sweeps
/// across the whole grid.
///
/// # Panics
///
/// Panics if `n` is zero. Benchmark setup failures are fatal.
#[must_use]
pub fn serpentine_dungeon(n: usize) -> Dungeon {
    let walls = (0..n)
        .map(|row| {
            if row % 2 == 0 {
                return vec![false; n];
            }
            let gap = if row % 4 == 1 { n - 1 } else { 0 };
            (0..n).map(|col| col != gap).collect()
        })
        .collect();
    let last_open_row = (n - 1) - (n - 1) % 2;
    Dungeon::new(walls, Cell::new(last_open_row, 0)).expect("serpentine dungeon")
}
