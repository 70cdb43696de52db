//! `Dungeon`: 8-connected grid with walls.
//!
//! Moves go to any of the eight neighbouring cells that lie inside the grid
//! and are not walls. Diagonal moves may cut past wall corners. Step cost and
//! heuristic are both Euclidean distance, so the heuristic is admissible and
//! consistent.

use wayfind_search::NodeModel;

use crate::contract::ScenarioV1;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Euclidean distance between cell centres.
    #[must_use]
    pub fn distance(self, other: Cell) -> f64 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        #[allow(clippy::cast_precision_loss)]
        let (dr, dc) = (dr as f64, dc as f64);
        dr.hypot(dc)
    }

    fn is_adjacent(self, other: Cell) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

/// Typed failure for dungeon construction and step costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DungeonError {
    /// The grid has no cells.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A layout character was neither `.` nor `#`.
    InvalidTile { row: usize, col: usize, tile: char },
    /// The target lies outside the grid or on a wall.
    TargetBlocked { target: Cell },
    /// A step cost was requested between non-neighbouring cells.
    NotAdjacent { from: Cell, to: Cell },
}

impl std::fmt::Display for DungeonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "dungeon has no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::InvalidTile { row, col, tile } => {
                write!(f, "invalid tile {tile:?} at ({row}, {col})")
            }
            Self::TargetBlocked { target } => write!(
                f,
                "target ({}, {}) is outside the grid or a wall",
                target.row, target.col
            ),
            Self::NotAdjacent { from, to } => write!(
                f,
                "cells ({}, {}) and ({}, {}) are not adjacent",
                from.row, from.col, to.row, to.col
            ),
        }
    }
}

impl std::error::Error for DungeonError {}

/// A walled grid and the cell the heuristic aims at.
#[derive(Debug, Clone)]
pub struct Dungeon {
    walls: Vec<Vec<bool>>,
    cols: usize,
    target: Cell,
}

/// The 5×11 reference layout. `#` is a wall.
pub const REFERENCE_LAYOUT: [&str; 5] = [
    "...........",
    "###.###.#..",
    "....#...#..",
    "..##...####",
    ".....#.....",
];

impl Dungeon {
    /// Build from a wall mask (`true` = wall).
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError`] if the grid is empty or ragged, or the
    /// target is out of bounds or a wall.
    pub fn new(walls: Vec<Vec<bool>>, target: Cell) -> Result<Self, DungeonError> {
        let cols = walls.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(DungeonError::Empty);
        }
        for (row, line) in walls.iter().enumerate() {
            if line.len() != cols {
                return Err(DungeonError::Ragged {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
        }
        let dungeon = Self {
            walls,
            cols,
            target,
        };
        if !dungeon.is_open(target) {
            return Err(DungeonError::TargetBlocked { target });
        }
        Ok(dungeon)
    }

    /// Parse a layout of `.` (open) and `#` (wall) rows.
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::InvalidTile`] on any other character, plus
    /// the errors of [`Dungeon::new`].
    pub fn parse(layout: &[&str], target: Cell) -> Result<Self, DungeonError> {
        let walls = layout
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, tile)| match tile {
                        '.' => Ok(false),
                        '#' => Ok(true),
                        _ => Err(DungeonError::InvalidTile { row, col, tile }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(walls, target)
    }

    /// The reference layout with the target in the bottom-right corner.
    ///
    /// # Errors
    ///
    /// Never fails for the bundled layout; the `Result` mirrors
    /// [`Dungeon::parse`].
    pub fn reference() -> Result<Self, DungeonError> {
        Self::parse(&REFERENCE_LAYOUT, Cell::new(4, 10))
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.walls.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn target(&self) -> Cell {
        self.target
    }

    /// Whether `cell` is inside the grid and not a wall.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.walls
            .get(cell.row)
            .and_then(|line| line.get(cell.col))
            .is_some_and(|wall| !wall)
    }
}

impl NodeModel<Cell> for Dungeon {
    type Error = DungeonError;

    fn successors(&self, node: &Cell) -> Vec<Cell> {
        const OFFSETS: [(isize, isize); 8] = [
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (-1, 1),
            (1, -1),
            (1, 1),
        ];
        OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                Some(Cell::new(
                    node.row.checked_add_signed(dr)?,
                    node.col.checked_add_signed(dc)?,
                ))
            })
            .filter(|&cell| self.is_open(cell))
            .collect()
    }

    fn nodes_match(&self, a: &Cell, b: &Cell) -> bool {
        a == b
    }

    fn step_cost(&self, from: &Cell, to: &Cell) -> Result<f64, DungeonError> {
        if !from.is_adjacent(*to) {
            return Err(DungeonError::NotAdjacent {
                from: *from,
                to: *to,
            });
        }
        Ok(from.distance(*to))
    }

    fn heuristic(&self, node: &Cell) -> f64 {
        node.distance(self.target)
    }

    fn bucket_key(&self, node: &Cell) -> u64 {
        // Row-major index for in-grid cells; off-grid cells may collide.
        let widen = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        widen(node.row)
            .wrapping_mul(widen(self.cols))
            .wrapping_add(widen(node.col))
    }
}

/// Pathfinding query on a [`Dungeon`]: reach the dungeon's target.
#[derive(Debug, Clone)]
pub struct DungeonScenario {
    pub dungeon: Dungeon,
    pub start: Cell,
}

impl DungeonScenario {
    /// Reference layout from the top-left to the bottom-right corner.
    ///
    /// # Errors
    ///
    /// Propagates [`Dungeon::reference`].
    pub fn reference() -> Result<Self, DungeonError> {
        Ok(Self {
            dungeon: Dungeon::reference()?,
            start: Cell::new(0, 0),
        })
    }
}

impl ScenarioV1 for DungeonScenario {
    type Node = Cell;
    type Model = Dungeon;

    fn world_id(&self) -> &str {
        "dungeon"
    }

    fn model(&self) -> &Dungeon {
        &self.dungeon
    }

    fn start(&self) -> Cell {
        self.start
    }

    fn goal_node(&self) -> Option<Cell> {
        Some(self.dungeon.target())
    }

    fn accepts(&self, node: &Cell) -> bool {
        *node == self.dungeon.target()
    }

    fn label(&self, node: &Cell) -> serde_json::Value {
        serde_json::json!([node.row, node.col])
    }
}
