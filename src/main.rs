/*!
 * Signal Demo - Main Entry Point
 *
 * Saves a user with one slow post_save receiver connected. The line printed
 * after `save` only appears once the receiver has finished, because signal
 * receivers run synchronously on the saving thread.
 */

use signal_dispatch::{
    init_tracing, user_signals, DemoConfig, EventId, Kwargs, ReceiverRegistry, User,
};
use std::thread;
use tracing::info;

fn main() -> miette::Result<()> {
    let config = DemoConfig::from_env()?;
    init_tracing(config.trace_json);
    info!(
        username = %config.username,
        delay_ms = config.delay.as_millis() as u64,
        fail = config.fail,
        "Signal demo starting"
    );

    let delay = config.delay;
    let fail = config.fail;
    user_signals().register(
        EventId::POST_SAVE,
        move |_event: &EventId, user: &User, _kwargs: &Kwargs| {
            println!("Signal received for User: {}", user.username());
            if fail {
                anyhow::bail!("receiver for {} gave up before finishing", user.username());
            }
            // Simulate long-running work
            thread::sleep(delay);
            println!("Signal processing done");
            Ok(())
        },
    )?;

    let mut user = User::new(config.username);
    user.save()?;

    println!("This line will only print after the signal has completed");
    info!(id = ?user.id(), "Signal demo finished");
    Ok(())
}
