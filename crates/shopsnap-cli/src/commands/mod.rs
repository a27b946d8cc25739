//! Command implementations for the shopsnap CLI
//!
//! Each subcommand lives in its own submodule.

mod probe;
mod profile;
mod render;

pub use probe::execute as probe_api;
pub use profile::execute as show_profile;
pub use render::execute as render_snapshot;
