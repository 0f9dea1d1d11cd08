//! UI layer: terminal session, input and rendering.

mod event_source;
mod input_field;
pub mod shell;
mod styles;
mod terminal;
pub(crate) mod view;

pub(crate) use event_source::TerminalEventSource;
pub use terminal::install_panic_hook;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
