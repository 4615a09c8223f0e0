//! End-to-end tests through the session: selection, rendering and the
//! capability/banned-command gates.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use mrcli_common::error::SessionError;
use mrcli_common::model::OutputMode;
use mrcli_core::render::Normalizer;
use mrcli_core::session::Session;

use crate::fakes::{FakeInventory, FakeNormalizer, Script, ScriptedExecutor, TRANSCRIPT_DEVICES};

fn raw_session(executor: ScriptedExecutor) -> Session {
    Session::new(
        Arc::new(FakeInventory::transcript()),
        Arc::new(executor),
        Normalizer::Unavailable,
    )
}

#[tokio::test]
async fn transcript_selection_scenario() {
    let mut session = raw_session(ScriptedExecutor::new());

    let set = session.select_targets("^[abc]r.*").unwrap().clone();
    let names: Vec<&str> = set.iter().collect();
    assert_eq!(names, TRANSCRIPT_DEVICES);

    // Repeating the selection yields the identical set in the same order.
    let again = session.matches("^[abc]r.*").unwrap();
    assert_eq!(&again, session.targets());
}

#[tokio::test]
async fn invalid_pattern_keeps_previous_target_set() {
    let mut session = raw_session(ScriptedExecutor::new());
    session.select_targets("cr1.*").unwrap();
    let before = session.targets().clone();

    let err = session.select_targets("[broken").unwrap_err();
    assert!(matches!(err, SessionError::InvalidPattern { .. }));
    assert_eq!(session.targets(), &before);
}

#[tokio::test]
async fn inventory_failure_is_a_request_fault_and_keeps_targets() {
    let inventory = Arc::new(FakeInventory::transcript());
    let mut session = Session::new(
        inventory.clone(),
        Arc::new(ScriptedExecutor::new()),
        Normalizer::Unavailable,
    );
    session.select_targets("cr1.*").unwrap();
    let before = session.targets().clone();

    inventory.set_broken(true);
    let err = session.select_targets(".*").unwrap_err();
    assert!(matches!(err, SessionError::InventoryUnavailable(_)));
    assert_eq!(session.targets(), &before);

    // A restored inventory serves selections again.
    inventory.set_broken(false);
    assert!(session.select_targets(".*").is_ok());
}

#[tokio::test]
async fn raw_render_orders_blocks_and_marks_the_failure() {
    let executor = ScriptedExecutor::new()
        .script("cr1.mel", Script::output("IOS 15.2"))
        .script("ar1.mel", Script::Unreachable)
        .script("br1.mel", Script::output("IOS 12.4"));
    let mut session = raw_session(executor);
    session.select_targets("^[abc]r1\\.mel").unwrap();

    let body = session.run("show version").await.unwrap();

    assert_eq!(
        body,
        "ERROR: ar1.mel [Unreachable] device unreachable: ar1.mel: connect refused\n\
         br1.mel:\n\
         IOS 12.4\n\
         cr1.mel:\n\
         IOS 15.2\n"
    );

    // Rendering already happened; running again reproduces it byte for byte.
    let again = session.run("show version").await.unwrap();
    assert_eq!(body, again);
}

#[tokio::test]
async fn structured_mode_requires_the_normalizer() {
    let mut session = raw_session(ScriptedExecutor::new());

    let err = session.set_output(OutputMode::Structured).unwrap_err();
    assert!(matches!(err, SessionError::CapabilityUnavailable { .. }));
    assert_eq!(session.output_mode(), OutputMode::Raw);
}

#[tokio::test]
async fn structured_mode_normalizes_supported_commands() {
    let executor = ScriptedExecutor::new()
        .script("cr1.mel", Script::output("10.0.0.1 aa:bb"))
        .script("cr2.mel", Script::output("10.0.0.2 cc:dd"));
    let mut session = Session::new(
        Arc::new(FakeInventory::transcript()),
        Arc::new(executor),
        Normalizer::Available(Arc::new(FakeNormalizer {
            supported_command: "show arp".to_owned(),
        })),
    );
    session.set_output(OutputMode::Structured).unwrap();
    session.select_targets("cr[12]\\.mel").unwrap();

    let body = session.run("show arp").await.unwrap();
    assert_eq!(body, "cr1.mel,10.0.0.1,aa:bb\ncr2.mel,10.0.0.2,cc:dd\n");

    let body = session.run("show uptime").await.unwrap();
    assert_eq!(
        body,
        "cr1.mel: unsupported command for structured output\n\
         cr2.mel: unsupported command for structured output\n"
    );
}

#[tokio::test]
async fn banned_commands_never_reach_the_executor() {
    let executor = ScriptedExecutor::new();
    let calls = executor.call_counter();
    let mut session = raw_session(executor);
    session.select_targets(".*").unwrap();

    let err = session.run("reload").await.unwrap_err();
    assert!(matches!(err, SessionError::BannedCommand { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_target_set_fails_before_any_remote_call() {
    let executor = ScriptedExecutor::new();
    let calls = executor.call_counter();
    let session = raw_session(executor);

    let err = session.run("show version").await.unwrap_err();
    assert!(matches!(err, SessionError::EmptyTargetSet));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn timeout_floor_is_one_second() {
    let mut session = raw_session(ScriptedExecutor::new());
    let before = session.timeout();

    let err = session.set_timeout(Duration::from_millis(500)).unwrap_err();
    assert!(matches!(err, SessionError::TimeoutTooShort(1)));
    assert_eq!(session.timeout(), before);

    session.set_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(session.timeout(), Duration::from_secs(5));
}
