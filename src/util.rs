// Console logging helpers shared by the host glue.

use std::cell::Cell;

thread_local! {
    static DEBUG_LOG: Cell<bool> = const { Cell::new(false) };
}

/// Enables `clog` output; warnings and errors are always printed.
pub fn set_debug_log(on: bool) {
    DEBUG_LOG.with(|f| f.set(on));
}

pub fn clog(msg: &str) {
    if DEBUG_LOG.with(|f| f.get()) {
        gloo::console::log!(msg);
    }
}

pub fn cwarn(msg: &str) {
    gloo::console::warn!(msg);
}

pub fn cerror(msg: &str) {
    gloo::console::error!(msg);
}
