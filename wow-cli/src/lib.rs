//! Command-line front end for [`wow_observations`].

pub mod cli;
pub mod colors;

pub use cli::{color_mode, command, resolve_config};
pub use colors::{ColorHelper, ColorMode};
