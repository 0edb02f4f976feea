//! Integration tests for running the built-in directive table through the driver.

use super::test_utils::{default_outputs, Fixture, ABORT_ONLY_SOURCES, SOURCES};
use auxgen::digest::OutputSnapshot;
use auxgen::directives::DirectiveTable;
use auxgen::driver::{Driver, DriverSettings};
use auxgen::error::GenerateError;

fn driver(fixture: &Fixture, jobs: usize) -> Driver {
    let mut config = fixture.config();
    config.generate.jobs = jobs;
    Driver::new(DriverSettings::from_config(&config.generate, fixture.root()))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

#[test]
fn test_default_run_produces_exactly_four_outputs() {
    let fixture = Fixture::new();
    let table = DirectiveTable::builtin();

    let report = runtime().block_on(driver(&fixture, 4).run(&table)).unwrap();

    assert_eq!(report.task_count(), 4);
    assert_eq!(fixture.generated_files(), default_outputs());
    assert!(!fixture.root().join(ABORT_ONLY_SOURCES).exists());
}

#[test]
fn test_outputs_carry_exact_arguments() {
    let fixture = Fixture::new();
    runtime()
        .block_on(driver(&fixture, 1).run(&DirectiveTable::builtin()))
        .unwrap();

    let critbit = std::fs::read_to_string(fixture.source("critbit.move")).unwrap();
    assert_eq!(
        critbit,
        "// generated by github.com/fardream/gen-move-container@latest\n\
         // args: critbit -o ../aptos/contract/auxexch/sources/critbit.move -p aux -m critbit --use-aptos-table\n"
    );

    let quoter = std::fs::read_to_string(fixture.source("reward_quoter.move")).unwrap();
    assert_eq!(
        quoter,
        "// generated by ./aptos/cmd/gen-reward-distributor\n\
         // args: -q -o ../aptos/contract/auxexch/sources/reward_quoter.move\n"
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let fixture = Fixture::new();
    let table = DirectiveTable::builtin();
    let outputs: Vec<_> = default_outputs()
        .iter()
        .map(|p| fixture.root().join(p))
        .collect();
    let rt = runtime();
    let driver = driver(&fixture, 4);

    rt.block_on(driver.run(&table)).unwrap();
    let first = OutputSnapshot::capture(outputs.clone()).unwrap();
    rt.block_on(driver.run(&table)).unwrap();
    let second = OutputSnapshot::capture(outputs).unwrap();

    assert_eq!(first.present().count(), 4);
    assert!(first.diff(&second).is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_verify_builtin_table() {
    let fixture = Fixture::new();
    let report = runtime()
        .block_on(driver(&fixture, 2).verify(&DirectiveTable::builtin()))
        .unwrap();
    assert_eq!(report.first.task_count(), 4);
    assert_eq!(report.second.task_count(), 4);
    assert_eq!(report.snapshot.present().count(), 4);
}

#[test]
fn test_enabling_abort_task_adds_exactly_one_output() {
    let fixture = Fixture::new();
    let rt = runtime();
    let driver = driver(&fixture, 4);
    let defaults: Vec<_> = default_outputs()
        .iter()
        .map(|p| fixture.root().join(p))
        .collect();

    rt.block_on(driver.run(&DirectiveTable::builtin())).unwrap();
    let before_files = fixture.generated_files();
    let before = OutputSnapshot::capture(defaults.clone()).unwrap();

    let table = DirectiveTable::builtin()
        .enable(&["abort_only_contract"])
        .unwrap();
    let report = rt.block_on(driver.run(&table)).unwrap();
    assert_eq!(report.task_count(), 5);

    let after_files = fixture.generated_files();
    let added: Vec<&String> = after_files
        .iter()
        .filter(|f| !before_files.contains(f))
        .collect();
    assert_eq!(
        added,
        vec![&format!("{}/authority.move", ABORT_ONLY_SOURCES)]
    );
    assert!(before
        .diff(&OutputSnapshot::capture(defaults).unwrap())
        .is_empty());
}

#[test]
fn test_tool_failure_fails_run_with_stderr() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.generate.jobs = 1;
    config.generate.launcher =
        fixture.failing_launcher(&format!("../{}/reward_quoter.move", SOURCES));
    let driver = Driver::new(DriverSettings::from_config(&config.generate, fixture.root()));

    let result = runtime().block_on(driver.run(&DirectiveTable::builtin()));

    match result.unwrap_err() {
        GenerateError::ToolFailed { task, code, stderr } => {
            assert_eq!(task, "reward_quoter");
            assert_eq!(code, Some(7));
            assert!(stderr.contains("generator exploded"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // With one job, tasks declared before the failing one already ran
    assert!(fixture.source("reward_distributor.move").exists());
}

#[test]
fn test_parallel_and_serial_runs_agree() {
    let serial = Fixture::new();
    let parallel = Fixture::new();
    let rt = runtime();
    rt.block_on(driver(&serial, 1).run(&DirectiveTable::builtin()))
        .unwrap();
    rt.block_on(driver(&parallel, 8).run(&DirectiveTable::builtin()))
        .unwrap();

    for file in default_outputs() {
        assert_eq!(
            std::fs::read(serial.root().join(&file)).unwrap(),
            std::fs::read(parallel.root().join(&file)).unwrap(),
            "{} differs",
            file
        );
    }
}
