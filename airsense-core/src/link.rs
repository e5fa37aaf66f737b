//! Waiting for the network at startup
//!
//! Before the loop starts, devices typically block until WiFi association
//! completes, printing a dot per poll. [`wait_for_link`] does the same
//! over the [`Transport`] trait so that the Reporter itself never has to
//! know about association. [`boot`] adds the splash frames around it.

use core::time::Duration;

use crate::errors::LinkTimeout;
use crate::status::StatusSink;
use crate::time::Delay;
use crate::traits::Transport;

/// Poll `transport.is_link_up()` every `poll` until it reports up
///
/// Returns the number of checks made. With `max_attempts` of `None` this
/// blocks until the link comes up.
pub fn wait_for_link<T, D>(
    transport: &T,
    delay: &mut D,
    poll: Duration,
    max_attempts: Option<u32>,
) -> Result<u32, LinkTimeout>
where
    T: Transport + ?Sized,
    D: Delay + ?Sized,
{
    log_info!("Waiting for link");
    let mut attempts = 0u32;

    loop {
        attempts = attempts.saturating_add(1);
        if transport.is_link_up() {
            log_info!("Link up after {} checks", attempts);
            return Ok(attempts);
        }

        if let Some(max) = max_attempts {
            if attempts >= max {
                log_warn!("Link still down after {} checks", attempts);
                return Err(LinkTimeout { attempts });
            }
        }

        log_debug!(".");
        delay.delay(poll);
    }
}

/// Splash, wait for the link, then confirm it on the display
///
/// The splash stays up while waiting. On timeout the display is left on
/// the splash and the first cycle will report the link state itself.
pub fn boot<T, S, D>(
    transport: &T,
    sink: &mut S,
    delay: &mut D,
    poll: Duration,
    max_attempts: Option<u32>,
) -> Result<u32, LinkTimeout>
where
    T: Transport + ?Sized,
    S: StatusSink + ?Sized,
    D: Delay + ?Sized,
{
    sink.show_boot();
    let attempts = wait_for_link(transport, delay, poll, max_attempts)?;
    sink.show_link_up();
    Ok(attempts)
}
