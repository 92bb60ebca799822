mod utils;

use g1_extension_ui::{
    account::KeyType,
    chain::ChainRegistry,
    import::{ValidationPhase, INVALID_CREDENTIALS},
};
use std::time::Duration;
use utils::test_utils::{drain, session_with, MockWalletApi, ALICE, BOB};

#[tokio::test(start_paused = true)]
async fn test_burst_of_edits_validates_once() {
    let mock = MockWalletApi::new(vec![]);
    let mut session = session_with(&mock, ChainRegistry::with_defaults());

    session.set_id("abc");
    session.set_password("x");
    session.set_password("xy");
    session.set_password("xyz");

    session
        .run_until(|wizard| wizard.credentials().phase() == ValidationPhase::Valid)
        .await
        .unwrap();

    let calls = mock.validate_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "abc");
    assert_eq!(calls[0].password, "xyz");
    assert_eq!(calls[0].key_type, KeyType::Ed25519);
}

#[tokio::test(start_paused = true)]
async fn test_no_call_before_quiescence() {
    let mock = MockWalletApi::new(vec![]);
    let mut session = session_with(&mock, ChainRegistry::with_defaults());

    session.set_id("abc");
    session.set_password("xyz");
    tokio::time::sleep(Duration::from_millis(599)).await;
    assert!(mock.validate_calls().is_empty());
    assert!(session.wizard().credentials().is_waiting());

    tokio::time::sleep(Duration::from_millis(2)).await;
    drain(&mut session);
    assert_eq!(mock.validate_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_field_never_calls_backend() {
    let mock = MockWalletApi::new(vec![]);
    let mut session = session_with(&mock, ChainRegistry::with_defaults());

    session.set_id("abc");
    session.set_password("");
    tokio::time::sleep(Duration::from_secs(2)).await;
    drain(&mut session);
    assert!(mock.validate_calls().is_empty());

    // clearing a field inside the window drops the pending validation
    session.set_password("xyz");
    tokio::time::sleep(Duration::from_millis(300)).await;
    session.set_id("");
    tokio::time::sleep(Duration::from_secs(2)).await;
    drain(&mut session);

    assert!(mock.validate_calls().is_empty());
    let form = session.wizard().credentials();
    assert_eq!(form.phase(), ValidationPhase::Idle);
    assert!(form.account().is_none());
    assert!(!form.can_proceed());
}

#[tokio::test(start_paused = true)]
async fn test_stale_failure_does_not_override_newer_success() {
    let mock = MockWalletApi::new(vec![]);
    mock.with_delay("slow", Duration::from_secs(2))
        .rejecting("slow")
        .with_address("abc", "fast", ALICE);
    let mut session = session_with(&mock, ChainRegistry::with_defaults());

    session.set_id("abc");
    session.set_password("slow");
    // let the slow validation reach the backend
    tokio::time::sleep(Duration::from_millis(700)).await;
    drain(&mut session);
    assert_eq!(mock.validate_calls().len(), 1);

    session.set_password("fast");
    session
        .run_until(|wizard| wizard.credentials().phase() == ValidationPhase::Valid)
        .await
        .unwrap();

    // the slow rejection lands afterwards and must be ignored
    tokio::time::sleep(Duration::from_secs(3)).await;
    drain(&mut session);

    assert_eq!(mock.validate_calls().len(), 2);
    let form = session.wizard().credentials();
    assert_eq!(form.address(), ALICE);
    assert!(form.error().is_none());
    assert!(form.can_proceed());
}

#[tokio::test(start_paused = true)]
async fn test_rejected_credentials_show_error() {
    let mock = MockWalletApi::new(vec![]);
    mock.rejecting("wrong");
    let mut session = session_with(&mock, ChainRegistry::with_defaults());

    session.set_id("abc");
    session.set_password("wrong");
    session
        .run_until(|wizard| wizard.credentials().phase() == ValidationPhase::Invalid)
        .await
        .unwrap();

    let form = session.wizard().credentials();
    assert_eq!(form.error(), Some(INVALID_CREDENTIALS));
    assert_eq!(form.address(), "");
    assert!(session.wizard().account().is_none());
    assert!(!session.wizard().can_go_next());
}

#[tokio::test(start_paused = true)]
async fn test_valid_credentials_publish_account_info() {
    let mock = MockWalletApi::new(vec![]);
    mock.with_address("abc", "xyz", BOB);
    let mut session = session_with(&mock, ChainRegistry::with_defaults());

    session.set_id("abc");
    session.set_password("xyz");
    session
        .run_until(|wizard| wizard.account().is_some())
        .await
        .unwrap();

    let account = session.wizard().account().unwrap();
    assert_eq!(account.address, BOB);
    assert_eq!(account.genesis_hash, "");
    assert_eq!(account.key_type, KeyType::Ed25519);
    assert!(session.wizard().can_go_next());

    // the address card shows the validated address
    let view = session.wizard().address_view();
    assert_eq!(view.recoded().formatted.as_deref(), Some(BOB));
    assert_eq!(view.display_name(), "<unknown>");
}
