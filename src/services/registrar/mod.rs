//! Registrar - course registration and catalog service.
//!
//! Parses course tokens, runs each one through the registration decision
//! engine, and drives the catalog and chat-platform mutations each
//! outcome requires. Command handlers return reply lines; the gateway
//! delivers them to the requesting user.

mod commands;
mod engine;
mod locks;
mod outcome;

pub use commands::Registrar;
pub use engine::{Decision, decide};
pub use outcome::Outcome;
