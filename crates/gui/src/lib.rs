// Library crate: the panel logic and the JSON command interface, testable headlessly.
// Rendering (app, ui) stays in the binary crate.

pub mod actions;
pub mod command;
pub mod harness;
pub mod i18n;
pub mod state;
