//! `RoadTrip`: undirected weighted graph of junctions.
//!
//! Nodes are junction ids. Each road joins two junctions in both directions
//! with a travel time. The heuristic is the straight-line distance between
//! junction coordinates, which is NOT scaled to travel time; it steers the
//! search but does not bound the remaining cost. [`TripHeuristic::Zero`]
//! turns the search into uniform-cost search.

use std::collections::BTreeMap;

use wayfind_search::NodeModel;

use crate::contract::ScenarioV1;

/// Junction identifier.
pub type JunctionId = u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Junction {
    pub id: JunctionId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Road {
    pub ends: [JunctionId; 2],
    pub time: f64,
}

/// Heuristic used by [`RoadTrip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripHeuristic {
    #[default]
    StraightLine,
    Zero,
}

/// Typed failure for road network construction and step costs.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadTripError {
    /// A road or query names a junction that does not exist.
    UnknownJunction { id: JunctionId },
    /// Two junctions share an id.
    DuplicateJunction { id: JunctionId },
    /// A road has a negative or non-finite travel time.
    InvalidTime { ends: [JunctionId; 2], time: f64 },
    /// A step cost was requested between junctions with no road.
    ConnectionMissing { from: JunctionId, to: JunctionId },
}

impl std::fmt::Display for RoadTripError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownJunction { id } => write!(f, "unknown junction {id}"),
            Self::DuplicateJunction { id } => write!(f, "junction {id} defined twice"),
            Self::InvalidTime { ends, time } => {
                write!(f, "road {}-{} has invalid time {time}", ends[0], ends[1])
            }
            Self::ConnectionMissing { from, to } => {
                write!(f, "no road between junctions {from} and {to}")
            }
        }
    }
}

impl std::error::Error for RoadTripError {}

/// A validated road network with a destination.
#[derive(Debug, Clone)]
pub struct RoadTrip {
    junctions: BTreeMap<JunctionId, Junction>,
    /// Adjacency in road declaration order.
    connections: BTreeMap<JunctionId, Vec<(JunctionId, f64)>>,
    destination: JunctionId,
    heuristic: TripHeuristic,
}

impl RoadTrip {
    /// Build a network heading for `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`RoadTripError`] on duplicate or unknown junctions and on
    /// negative or non-finite travel times.
    pub fn new(
        junctions: &[Junction],
        roads: &[Road],
        destination: JunctionId,
    ) -> Result<Self, RoadTripError> {
        let mut table = BTreeMap::new();
        for junction in junctions {
            if table.insert(junction.id, *junction).is_some() {
                return Err(RoadTripError::DuplicateJunction { id: junction.id });
            }
        }

        let mut connections: BTreeMap<JunctionId, Vec<(JunctionId, f64)>> =
            table.keys().map(|&id| (id, Vec::new())).collect();
        for road in roads {
            if !road.time.is_finite() || road.time < 0.0 {
                return Err(RoadTripError::InvalidTime {
                    ends: road.ends,
                    time: road.time,
                });
            }
            let [a, b] = road.ends;
            for id in road.ends {
                if !table.contains_key(&id) {
                    return Err(RoadTripError::UnknownJunction { id });
                }
            }
            connections.entry(a).or_default().push((b, road.time));
            connections.entry(b).or_default().push((a, road.time));
        }

        if !table.contains_key(&destination) {
            return Err(RoadTripError::UnknownJunction { id: destination });
        }

        Ok(Self {
            junctions: table,
            connections,
            destination,
            heuristic: TripHeuristic::default(),
        })
    }

    /// The ten-junction reference network, heading for junction 4.
    ///
    /// # Errors
    ///
    /// Never fails for the bundled network; the `Result` mirrors
    /// [`RoadTrip::new`].
    pub fn reference() -> Result<Self, RoadTripError> {
        Self::new(&reference_junctions(), &reference_roads(), 4)
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: TripHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[must_use]
    pub fn destination(&self) -> JunctionId {
        self.destination
    }

    #[must_use]
    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions.get(&id)
    }

    /// Travel time of the direct road, if any.
    #[must_use]
    pub fn road_time(&self, from: JunctionId, to: JunctionId) -> Option<f64> {
        self.connections
            .get(&from)?
            .iter()
            .find(|(other, _)| *other == to)
            .map(|(_, time)| *time)
    }

    fn straight_line(&self, from: JunctionId) -> f64 {
        match (self.junctions.get(&from), self.junctions.get(&self.destination)) {
            (Some(a), Some(b)) => (a.x - b.x).hypot(a.y - b.y),
            _ => 0.0,
        }
    }
}

impl NodeModel<JunctionId> for RoadTrip {
    type Error = RoadTripError;

    fn successors(&self, node: &JunctionId) -> Vec<JunctionId> {
        self.connections
            .get(node)
            .map(|roads| roads.iter().map(|(other, _)| *other).collect())
            .unwrap_or_default()
    }

    fn nodes_match(&self, a: &JunctionId, b: &JunctionId) -> bool {
        a == b
    }

    fn step_cost(&self, from: &JunctionId, to: &JunctionId) -> Result<f64, RoadTripError> {
        if from == to {
            return Ok(0.0);
        }
        self.road_time(*from, *to)
            .ok_or(RoadTripError::ConnectionMissing {
                from: *from,
                to: *to,
            })
    }

    fn heuristic(&self, node: &JunctionId) -> f64 {
        match self.heuristic {
            TripHeuristic::StraightLine => self.straight_line(*node),
            TripHeuristic::Zero => 0.0,
        }
    }

    fn bucket_key(&self, node: &JunctionId) -> u64 {
        u64::from(*node)
    }
}

fn reference_junctions() -> Vec<Junction> {
    [
        (1, 50.0, 250.0),
        (2, 150.0, 300.0),
        (3, 300.0, 400.0),
        (4, 490.0, 360.0),
        (5, 490.0, 120.0),
        (6, 270.0, 100.0),
        (7, 170.0, 110.0),
        (8, 470.0, 470.0),
        (9, 170.0, 420.0),
        (10, 250.0, 260.0),
    ]
    .into_iter()
    .map(|(id, x, y)| Junction { id, x, y })
    .collect()
}

fn reference_roads() -> Vec<Road> {
    [
        ([1, 2], 0.0),
        ([2, 3], 0.0),
        ([3, 4], 0.0),
        ([4, 5], 100.0),
        ([5, 6], 100.0),
        ([6, 7], 100.0),
        ([7, 1], 100.0),
        ([1, 9], 300.0),
        ([2, 9], 250.0),
        ([9, 10], 400.0),
        ([10, 8], 450.0),
        ([8, 4], 100.0),
        ([10, 7], 1000.0),
    ]
    .into_iter()
    .map(|(ends, time)| Road { ends, time })
    .collect()
}

/// Route query on a [`RoadTrip`]: from `start` to the network's destination.
#[derive(Debug, Clone)]
pub struct RoadTripScenario {
    pub network: RoadTrip,
    pub start: JunctionId,
}

impl RoadTripScenario {
    /// Reference network from junction 1 to junction 4.
    ///
    /// # Errors
    ///
    /// Propagates [`RoadTrip::reference`].
    pub fn reference() -> Result<Self, RoadTripError> {
        Ok(Self {
            network: RoadTrip::reference()?,
            start: 1,
        })
    }
}

impl ScenarioV1 for RoadTripScenario {
    type Node = JunctionId;
    type Model = RoadTrip;

    fn world_id(&self) -> &str {
        "road_trip"
    }

    fn model(&self) -> &RoadTrip {
        &self.network
    }

    fn start(&self) -> JunctionId {
        self.start
    }

    fn goal_node(&self) -> Option<JunctionId> {
        Some(self.network.destination())
    }

    fn accepts(&self, node: &JunctionId) -> bool {
        *node == self.network.destination()
    }

    fn label(&self, node: &JunctionId) -> serde_json::Value {
        serde_json::json!(node)
    }
}
