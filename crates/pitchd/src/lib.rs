//! pitchd library - exposes modules for testing.

pub mod cli;
pub mod gateway;
pub mod orchestrator;
pub mod routes;
pub mod server;
