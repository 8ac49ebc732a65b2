//! Infrastructure layer - Store, synthesizer, encoder and service implementations

pub mod benchmark;
pub mod logging;
pub mod observability;
pub mod registry;
pub mod report;
pub mod services;
