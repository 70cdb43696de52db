//! `Countdown`: combine numbers with arithmetic until a target appears.
//!
//! A node is the multiset of numbers still available. One step picks two of
//! them and replaces the pair with their sum, product, positive difference or
//! exact quotient. Every step costs 1, so the path cost is the number of
//! operations. Two nodes match when they hold the same multiset, regardless
//! of order or of the operation that produced them.
//!
//! Rules that prune useless moves:
//! - multiplication by 1 is skipped;
//! - a difference equal to the subtrahend (`2b - b`) is skipped;
//! - division by 1 is skipped, as are non-exact quotients.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use wayfind_search::NodeModel;

use crate::contract::ScenarioV1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Multiply,
    Subtract,
    Divide,
}

impl Operation {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Multiply => '*',
            Self::Subtract => '-',
            Self::Divide => '/',
        }
    }
}

/// The move that produced a [`NumberSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub operation: Operation,
    pub operands: [u64; 2],
    pub generated: u64,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.operands[0],
            self.operation.symbol(),
            self.operands[1],
            self.generated
        )
    }
}

/// Numbers still available, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSet {
    pub numbers: Vec<u64>,
    pub last_action: Option<Action>,
}

impl NumberSet {
    #[must_use]
    pub fn new(numbers: Vec<u64>) -> Self {
        Self {
            numbers,
            last_action: None,
        }
    }

    /// The numbers in ascending order; equal for matching sets.
    #[must_use]
    pub fn sorted(&self) -> Vec<u64> {
        let mut sorted = self.numbers.clone();
        sorted.sort_unstable();
        sorted
    }

    #[must_use]
    pub fn contains(&self, n: u64) -> bool {
        self.numbers.contains(&n)
    }

    fn combine(
        &self,
        (i, j): (usize, usize),
        operation: Operation,
        operands: [u64; 2],
        generated: u64,
    ) -> Self {
        let mut numbers = Vec::with_capacity(self.numbers.len() - 1);
        numbers.push(generated);
        numbers.extend(
            self.numbers
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, n)| *n),
        );
        Self {
            numbers,
            last_action: Some(Action {
                operation,
                operands,
                generated,
            }),
        }
    }
}

/// Every legal single-operation move from a pair `(a, b)`, in the order
/// add, multiply, subtract, divide.
fn moves(a: u64, b: u64) -> Vec<(Operation, [u64; 2], u64)> {
    let mut out = Vec::with_capacity(4);
    if let Some(sum) = a.checked_add(b) {
        out.push((Operation::Add, [a, b], sum));
    }
    if a != 1 && b != 1 {
        if let Some(product) = a.checked_mul(b) {
            out.push((Operation::Multiply, [a, b], product));
        }
    }
    if a > b && a - b != b {
        out.push((Operation::Subtract, [a, b], a - b));
    } else if b > a && b - a != a {
        out.push((Operation::Subtract, [b, a], b - a));
    }
    if b > 1 && a % b == 0 {
        out.push((Operation::Divide, [a, b], a / b));
    } else if a > 1 && b % a == 0 {
        out.push((Operation::Divide, [b, a], b / a));
    }
    out
}

/// Unit-cost arithmetic search space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown;

impl NodeModel<NumberSet> for Countdown {
    type Error = std::convert::Infallible;

    fn successors(&self, node: &NumberSet) -> Vec<NumberSet> {
        let n = node.numbers.len();
        let mut out = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                let (a, b) = (node.numbers[i], node.numbers[j]);
                for (operation, operands, generated) in moves(a, b) {
                    out.push(node.combine((i, j), operation, operands, generated));
                }
            }
        }
        out
    }

    fn nodes_match(&self, a: &NumberSet, b: &NumberSet) -> bool {
        a.numbers.len() == b.numbers.len() && a.sorted() == b.sorted()
    }

    fn step_cost(&self, _from: &NumberSet, _to: &NumberSet) -> Result<f64, Self::Error> {
        Ok(1.0)
    }

    /// Larger sets are cheaper: more numbers leave more ways to reach the
    /// target without reusing intermediate results.
    fn heuristic(&self, node: &NumberSet) -> f64 {
        match u32::try_from(node.numbers.len()) {
            Ok(0) | Err(_) => 1.0,
            Ok(len) => 1.0 / f64::from(len),
        }
    }

    fn bucket_key(&self, node: &NumberSet) -> u64 {
        let mut hasher = DefaultHasher::new();
        node.sorted().hash(&mut hasher);
        hasher.finish()
    }
}

/// Reach `target` by combining `numbers`.
#[derive(Debug, Clone)]
pub struct CountdownScenario {
    pub numbers: Vec<u64>,
    pub target: u64,
}

impl CountdownScenario {
    /// Six numbers, target 300.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            numbers: vec![100, 50, 2, 1, 10, 25],
            target: 300,
        }
    }
}

impl ScenarioV1 for CountdownScenario {
    type Node = NumberSet;
    type Model = Countdown;

    fn world_id(&self) -> &str {
        "countdown"
    }

    fn model(&self) -> &Countdown {
        &Countdown
    }

    fn start(&self) -> NumberSet {
        NumberSet::new(self.numbers.clone())
    }

    /// Any set containing the target qualifies, so there is no single node.
    fn goal_node(&self) -> Option<NumberSet> {
        None
    }

    fn accepts(&self, node: &NumberSet) -> bool {
        node.contains(self.target)
    }

    fn label(&self, node: &NumberSet) -> serde_json::Value {
        serde_json::json!({
            "action": node.last_action.map(|a| a.to_string()),
            "numbers": node.numbers,
        })
    }
}
