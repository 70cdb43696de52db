//! Cross-process determinism: spawns the `solve_fixture` binary under four
//! environment variants and asserts all produce identical output.

use std::path::Path;
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("solve_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("WAYFIND_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    // Sanity checks.
    for expected in [
        "dungeon.node.termination_reason=goal_reached",
        "dungeon.node.path_len=12",
        "dungeon.predicate.trace_digest=sha256:",
        "road_trip.node.cost=0.0",
        "road_trip.predicate.cost=0.0",
        "road_trip.node.path_len=4",
        "countdown.predicate.cost=2.0",
        "countdown.predicate.path_len=3",
    ] {
        assert!(
            baseline.contains(expected),
            "baseline output missing {expected}:\n{baseline}"
        );
    }

    // Variant 2: different cwd.
    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    let variant_cwd = run_variant(alt_cwd, &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    // Variant 3: different locale env.
    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(
        baseline, variant_locale,
        "output differs when LC_ALL=C LANG=C"
    );

    // Variant 4: spurious env vars, logging switched on.
    let variant_noise = run_variant(
        &root,
        &[
            ("WAYFIND_NOISE", "should_not_matter"),
            ("WAYFIND_LOG", "wayfind_search=trace,wayfind_worlds=info"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(
        baseline, variant_noise,
        "output differs with spurious env vars"
    );
}

#[test]
fn literal_and_predicate_lines_agree() {
    let output = run_variant(&workspace_root(), &[]);
    let value = |key: &str| -> String {
        output
            .lines()
            .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
            .unwrap_or_else(|| panic!("missing {key}"))
            .to_string()
    };
    for world in ["dungeon", "road_trip"] {
        for field in ["cost", "path_len", "trace_digest"] {
            assert_eq!(
                value(&format!("{world}.node.{field}")),
                value(&format!("{world}.predicate.{field}")),
                "{world} {field} differs between goal forms"
            );
        }
    }
}
