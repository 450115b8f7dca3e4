//! Structured log vocabulary shared by the connector and supervisor.

pub mod events;
pub mod fields;
