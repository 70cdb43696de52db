//! Observer lock tests: the event stream is complete and observing a search
//! never changes its outcome.

use std::collections::BTreeSet;

use wayfind_search::observer::NoopObserver;
use wayfind_search::{Goal, SearchEngine, SearchEvent, SearchEventKind};
use wayfind_worlds::worlds::dungeon::{Cell, Dungeon};

#[derive(Default)]
struct Tally {
    opened: BTreeSet<usize>,
    closed: Vec<usize>,
    improved: u64,
    parents_known: bool,
}

impl Tally {
    fn record(&mut self, event: &SearchEvent<'_, Cell>) {
        match event.kind {
            SearchEventKind::Opened => {
                // Parents are always opened before their children.
                self.parents_known &= event.parent_id.is_none_or(|p| self.opened.contains(&p));
                self.opened.insert(event.record_id);
            }
            SearchEventKind::Improved => self.improved += 1,
            SearchEventKind::Closed => self.closed.push(event.record_id),
        }
        assert!((event.f - (event.g + event.h)).abs() < 1e-9);
    }
}

fn engine() -> SearchEngine<Dungeon> {
    SearchEngine::new(Dungeon::reference().unwrap())
}

#[test]
fn observed_and_unobserved_runs_agree() {
    let goal = Cell::new(4, 10);
    let plain = engine().solve(Cell::new(0, 0), Goal::node(goal)).unwrap();

    let mut tally = Tally {
        parents_known: true,
        ..Tally::default()
    };
    let mut observer = |e: &SearchEvent<'_, Cell>| tally.record(e);
    let observed = engine()
        .solve_observed(Cell::new(0, 0), Goal::node(goal), &mut observer)
        .unwrap();

    assert_eq!(plain.path, observed.path);
    assert_eq!(plain.cost, observed.cost);
    assert_eq!(plain.stats, observed.stats);

    let noop = engine()
        .solve_observed(Cell::new(0, 0), Goal::node(goal), &mut NoopObserver)
        .unwrap();
    assert_eq!(plain.stats, noop.stats);
}

#[test]
fn event_counts_match_stats() {
    let mut tally = Tally {
        parents_known: true,
        ..Tally::default()
    };
    let mut observer = |e: &SearchEvent<'_, Cell>| tally.record(e);
    let result = engine()
        .solve_observed(Cell::new(0, 0), Goal::node(Cell::new(4, 10)), &mut observer)
        .unwrap();

    assert!(tally.parents_known);
    assert_eq!(tally.opened.len() as u64, result.stats.total_records_created);
    assert_eq!(tally.closed.len() as u64, result.stats.total_expansions);
    assert_eq!(tally.improved, result.stats.total_relaxations_applied);

    let distinct: BTreeSet<usize> = tally.closed.iter().copied().collect();
    assert_eq!(distinct.len(), tally.closed.len(), "a record closed twice");
}
