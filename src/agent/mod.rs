//! Agent configuration and the calls a runtime makes into it.

pub mod agent;

pub use agent::Agent;
