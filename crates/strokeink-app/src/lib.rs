//! StrokeInk Application
//!
//! Command-line host for the editor core: replays scripted sessions,
//! inspects documents and renders them to SVG.

pub mod commands;
pub mod script;

pub use commands::{DocumentInfo, Replay};
pub use script::{Script, Step};
