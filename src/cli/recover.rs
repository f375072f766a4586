//! Last-resort panic handling around dispatch
//!
//! A panic in the middle of dispatch leaves nothing safe to continue
//! with: it is logged with a backtrace and the process exits with
//! status 1.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::Once;
use tracing::error;

static HOOK: Once = Once::new();

thread_local! {
    static GUARDED: Cell<bool> = const { Cell::new(false) };
}

/// Install the process-wide panic hook once
///
/// Panics on threads currently inside [`catch_panic`] are logged with a
/// backtrace; every other panic goes to the hook that was installed
/// before.
fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARDED.with(Cell::get) {
                let backtrace = Backtrace::force_capture();
                error!(
                    "panic during command dispatch: {}\nstack backtrace:\n{}",
                    info, backtrace
                );
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, turning a panic into its message
///
/// While `f` runs, panics on the calling thread are logged through
/// `tracing` together with a captured backtrace instead of the default
/// stderr hook. Safe to call from several threads at once.
pub fn catch_panic<T, F>(f: F) -> Result<T, String>
where
    F: FnOnce() -> T,
{
    install_hook();

    let outer = GUARDED.with(|guarded| guarded.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    GUARDED.with(|guarded| guarded.set(outer));

    result.map_err(|payload| panic_message(payload.as_ref()))
}

/// Run `f`, exiting the process with status 1 if it panics
///
/// The panic message is always written to stderr, even when logging is
/// switched off.
pub fn run_with_recovery<T, F>(f: F) -> T
where
    F: FnOnce() -> T,
{
    match catch_panic(f) {
        Ok(value) => value,
        Err(message) => {
            eprintln!("Error: command panicked: {}", message);
            process::exit(1);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
