//! Sample documents generated by the CLI subcommands.
//!
//! Each builder fills a [`mxdraft::Document`] created by the caller, so the
//! configured style overrides apply to every registry shape.

pub mod activity;
pub mod notes;
pub mod state;

/// Default output file of `mxdraft state`.
pub const STATE_OUTPUT: &str = "atm_state_example.drawio";

/// Default output file of `mxdraft activity`.
pub const ACTIVITY_OUTPUT: &str = "atm_activity_examples.drawio";

/// Default output file of `mxdraft notes`.
pub const NOTES_OUTPUT: &str = "demarche_uml.md";
