/*!
 * Global Dispatcher Tests
 * `User::save` goes through the process-wide dispatcher
 */

use serial_test::serial;
use signal_dispatch::{user_signals, EventId, Kwargs, ReceiverRegistry, User};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
#[serial]
fn test_save_uses_global_dispatcher() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let id = user_signals()
        .register(
            EventId::POST_SAVE,
            move |_: &EventId, _: &User, kwargs: &Kwargs| {
                assert_eq!(kwargs.str("sender"), Some("User"));
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .unwrap();

    let mut user = User::new("global_user");
    user.save().unwrap();
    user.save().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(user_signals().unregister(&EventId::POST_SAVE, id));
}

#[test]
#[serial]
fn test_global_dispatcher_is_shared() {
    assert!(std::ptr::eq(user_signals(), user_signals()));

    let uid = "shared-check";
    user_signals()
        .register_with_uid(EventId::PRE_SAVE, uid, |_: &EventId, _: &User, _: &Kwargs| Ok(()))
        .unwrap();
    assert!(user_signals().has_receivers(&EventId::PRE_SAVE));
    assert!(user_signals().unregister_uid(&EventId::PRE_SAVE, uid));
    assert!(!user_signals().has_receivers(&EventId::PRE_SAVE));
}
