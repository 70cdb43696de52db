//! Countdown lock tests: reaching 300 from `[100, 50, 2, 1, 10, 25]`.

use wayfind_search::{Goal, NodeModel, SearchEngine, SearchPolicy, TerminationReason};
use wayfind_worlds::contract::GoalForm;
use wayfind_worlds::runner::run_scenario;
use wayfind_worlds::worlds::countdown::{Countdown, CountdownScenario, NumberSet};

fn reaches(target: u64) -> impl Fn(&NumberSet) -> bool {
    move |node| node.contains(target)
}

#[test]
fn reference_target_takes_two_operations() {
    let accept = reaches(300);
    let result = SearchEngine::new(Countdown)
        .solve(
            NumberSet::new(vec![100, 50, 2, 1, 10, 25]),
            Goal::predicate(&accept),
        )
        .unwrap();

    assert!(result.is_goal_reached());
    assert_eq!(result.cost, Some(2.0));
    let path = result.path.unwrap();
    assert_eq!(path.len(), 3);
    assert!(path.last().unwrap().contains(300));
    assert!(path.iter().take(2).all(|n| !n.contains(300)));
}

#[test]
fn every_hop_is_a_legal_move() {
    let accept = reaches(300);
    let result = SearchEngine::new(Countdown)
        .solve(
            NumberSet::new(vec![100, 50, 2, 1, 10, 25]),
            Goal::predicate(&accept),
        )
        .unwrap();
    let path = result.path.unwrap();
    for hop in path.windows(2) {
        let successors = Countdown.successors(&hop[0]);
        assert!(
            successors.iter().any(|s| Countdown.nodes_match(s, &hop[1])),
            "{:?} does not follow from {:?}",
            hop[1].numbers,
            hop[0].numbers
        );
        assert_eq!(hop[1].numbers.len() + 1, hop[0].numbers.len());
        assert!(hop[1].last_action.is_some());
    }
}

#[test]
fn target_already_present_needs_no_operations() {
    let accept = reaches(10);
    let result = SearchEngine::new(Countdown)
        .solve(NumberSet::new(vec![3, 10]), Goal::predicate(&accept))
        .unwrap();
    assert_eq!(result.cost, Some(0.0));
    assert_eq!(result.stats.total_expansions, 0);
}

#[test]
fn impossible_target_exhausts_open_set() {
    // From {2, 3} the reachable values are 5, 6 and 1.
    let accept = reaches(7);
    let result = SearchEngine::new(Countdown)
        .solve(NumberSet::new(vec![2, 3]), Goal::predicate(&accept))
        .unwrap();
    assert_eq!(
        result.termination_reason,
        TerminationReason::OpenSetExhausted
    );
    assert!(result.path.is_none());
}

#[test]
fn literal_goal_matches_any_ordering() {
    let result = SearchEngine::new(Countdown)
        .solve(NumberSet::new(vec![4, 5, 6]), Goal::node(NumberSet::new(vec![6, 9])))
        .unwrap();
    assert_eq!(result.cost, Some(1.0));
    let last = result.path.unwrap().pop().unwrap();
    assert_eq!(last.sorted(), vec![6, 9]);
}

#[test]
fn scenario_report_labels_actions() {
    let report = run_scenario(
        &CountdownScenario::reference(),
        GoalForm::Predicate,
        &SearchPolicy::default(),
    )
    .unwrap();
    let path = report.path.unwrap();
    assert_eq!(path.len(), 3);
    assert!(path[0]["action"].is_null());
    assert!(path[2]["action"].as_str().unwrap().ends_with("= 300"));
}
