//! Bot services module.
//!
//! Provides the registrar: the service behind the `REGISTER`, `ADD`,
//! `LIMITS`, and `HELP` commands.

pub mod registrar;

pub use registrar::{Outcome, Registrar};
