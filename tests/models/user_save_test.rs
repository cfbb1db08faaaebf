/*!
 * User Save Tests
 * pre_save / post_save behaviour on a dedicated dispatcher
 */

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use signal_dispatch::{DispatchError, Dispatcher, EventId, Kwargs, ReceiverRegistry, User};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

type Seen = Arc<Mutex<Vec<(String, Option<u64>, Value)>>>;

/// Records (event, user id at dispatch time, kwargs) for every save signal
fn watch(signals: &Dispatcher<User>) -> Seen {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    for event in [EventId::PRE_SAVE, EventId::POST_SAVE] {
        let seen = seen.clone();
        signals
            .register(event, move |event: &EventId, user: &User, kwargs: &Kwargs| {
                let kwargs = serde_json::to_value(kwargs)?;
                seen.lock()
                    .push((event.to_string(), user.id(), kwargs));
                Ok(())
            })
            .unwrap();
    }
    seen
}

#[test]
fn test_first_save_is_created() {
    let signals = Dispatcher::<User>::new();
    let seen = watch(&signals);

    let mut user = User::new("test_user");
    user.save_with(&signals, None).unwrap();

    let seen = seen.lock();
    assert_eq!(seen.len(), 2);

    let (event, id, kwargs) = &seen[0];
    assert_eq!(event, "pre_save");
    assert_eq!(*id, None);
    assert_eq!(*kwargs, json!({ "sender": "User", "update_fields": null }));

    let (event, id, kwargs) = &seen[1];
    assert_eq!(event, "post_save");
    assert_eq!(*id, user.id());
    assert_eq!(
        *kwargs,
        json!({ "sender": "User", "created": true, "update_fields": null })
    );
}

#[test]
fn test_second_save_is_update() {
    let signals = Dispatcher::<User>::new();
    let mut user = User::new("test_user");
    user.save_with(&signals, None).unwrap();

    let seen = watch(&signals);
    user.set_username("renamed");
    user.save_with(&signals, Some(&["username"])).unwrap();

    let seen = seen.lock();
    let (_, _, kwargs) = &seen[1];
    assert_eq!(kwargs["created"], false);
    assert_eq!(kwargs["update_fields"], json!(["username"]));
}

#[test]
fn test_save_waits_for_post_save_receiver() {
    let signals = Dispatcher::<User>::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let receiver_log = log.clone();
    signals
        .register(
            EventId::POST_SAVE,
            move |_: &EventId, user: &User, _: &Kwargs| {
                receiver_log
                    .lock()
                    .push(format!("Signal received for User: {}", user.username()));
                thread::sleep(Duration::from_millis(100));
                receiver_log.lock().push("Signal processing done".to_string());
                Ok(())
            },
        )
        .unwrap();

    let mut user = User::new("test_user");
    user.save_with(&signals, None).unwrap();
    log.lock()
        .push("This line will only print after the signal has completed".to_string());

    assert_eq!(
        *log.lock(),
        vec![
            "Signal received for User: test_user",
            "Signal processing done",
            "This line will only print after the signal has completed",
        ]
    );
}

#[test]
fn test_pre_save_failure_leaves_user_unsaved() {
    let signals = Dispatcher::<User>::new();
    let seen = watch(&signals);
    signals
        .register(EventId::PRE_SAVE, |_: &EventId, user: &User, _: &Kwargs| {
            anyhow::ensure!(!user.username().is_empty(), "username required");
            Ok(())
        })
        .unwrap();

    let mut user = User::new("");
    let err = user.save_with(&signals, None).unwrap_err();

    assert!(matches!(err, DispatchError::ReceiverFailed { ref event, .. } if *event == EventId::PRE_SAVE));
    assert!(!user.is_saved());
    // Only the watcher's pre_save ran; post_save never fired
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_post_save_failure_fails_the_save() {
    let signals = Dispatcher::<User>::new();
    signals
        .register(EventId::POST_SAVE, |_: &EventId, _: &User, _: &Kwargs| {
            anyhow::bail!("mailer unavailable")
        })
        .unwrap();

    let mut user = User::new("test_user");
    let err = user.save_with(&signals, None).unwrap_err();

    assert!(matches!(err, DispatchError::ReceiverFailed { ref event, .. } if *event == EventId::POST_SAVE));
    assert!(user.is_saved());
}
