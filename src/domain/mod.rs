//! Domain layer: core entities and business rules.

pub mod chat_message;
pub mod events;
pub mod feed;
pub mod identity;
pub mod shell_state;
pub mod text_input_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
