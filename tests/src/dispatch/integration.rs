//! Black-box tests for the dispatch engine's completeness, isolation and
//! timeout guarantees.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use mrcli_common::model::{FailureKind, Outcome, TargetSet};
use mrcli_core::dispatch::dispatch;

use crate::fakes::{Script, ScriptedExecutor};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn one_result_per_device_under_injected_failures() {
    let executor = ScriptedExecutor::new()
        .script("br1.mel", Script::Unreachable)
        .script("cr1.syd", Script::Hang)
        .script("ar1.mel", Script::output("uptime 4w"));
    let targets = TargetSet::from_names(["ar1.mel", "br1.mel", "cr1.bne", "cr1.mel", "cr1.syd"]);

    let results = dispatch(Arc::new(executor), &targets, "show version", Duration::from_millis(200))
        .await
        .unwrap();

    assert_eq!(results.len(), targets.len());
    let devices: HashSet<&str> = results.iter().map(|r| r.device.as_str()).collect();
    let expected: HashSet<&str> = targets.iter().collect();
    assert_eq!(devices, expected, "exactly one result per targeted device");
    assert_eq!(results.failure_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn hanging_device_cannot_delay_siblings_past_the_timeout() {
    let executor = ScriptedExecutor::new()
        .script("cr1.mel", Script::Hang)
        .script("ar1.mel", Script::output_after("fast", Duration::from_millis(10)));
    let targets = TargetSet::from_names(["ar1.mel", "br1.mel", "cr1.mel"]);

    let started = tokio::time::Instant::now();
    let results = dispatch(Arc::new(executor), &targets, "show clock", TIMEOUT)
        .await
        .unwrap();

    // The barrier waits for the timeout reaping the hung device, no longer.
    assert!(started.elapsed() <= TIMEOUT + Duration::from_millis(50));
    assert_eq!(results.len(), 3);

    for result in results.iter() {
        match (result.device.as_str(), &result.outcome) {
            ("cr1.mel", Outcome::Failure { kind, .. }) => assert_eq!(*kind, FailureKind::Timeout),
            ("cr1.mel", other) => panic!("hung device should time out, got {other:?}"),
            (_, Outcome::Success { .. }) => {}
            (device, outcome) => panic!("{device} corrupted by sibling failure: {outcome:?}"),
        }
    }
}

#[tokio::test]
async fn unreachable_device_preserves_failure_kind() {
    let executor = ScriptedExecutor::new().script("cr2.syd", Script::Unreachable);
    let targets = TargetSet::from_names(["cr1.syd", "cr2.syd"]);

    let results = dispatch(Arc::new(executor), &targets, "show version", TIMEOUT)
        .await
        .unwrap();

    let failed = results
        .iter()
        .find(|r| r.device == "cr2.syd")
        .expect("unreachable device present in results");
    match &failed.outcome {
        Outcome::Failure { kind, message } => {
            assert_eq!(*kind, FailureKind::Unreachable);
            assert!(message.contains("connect refused"));
        }
        other => panic!("expected failure outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn timeout_applies_per_target_not_in_sequence() {
    // Ten devices that each take 80% of the timeout: serial execution
    // would blow the budget by a factor of eight.
    let delay = Duration::from_millis(80);
    let mut executor = ScriptedExecutor::new();
    let names: Vec<String> = (1..=10).map(|i| format!("cr{i}.mel")).collect();
    for name in &names {
        executor = executor.script(name, Script::output_after("ok", delay));
    }
    let targets = TargetSet::from_names(names);

    let started = std::time::Instant::now();
    let results = dispatch(Arc::new(executor), &targets, "show clock", Duration::from_millis(100))
        .await
        .unwrap();

    assert_eq!(results.len(), 10);
    assert_eq!(results.failure_count(), 0);
    assert!(
        started.elapsed() < Duration::from_millis(800),
        "dispatch ran serially: {:?}",
        started.elapsed()
    );
}
