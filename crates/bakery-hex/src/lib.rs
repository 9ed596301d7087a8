//! bakery-hex: hexagonal Bakery GET API library (core + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use bakery_types::{domain, ports};

pub mod inbound; // HTTP adapter (router + handlers)
