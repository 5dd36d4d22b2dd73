//! PIM Publishing - Catalog output customizations
//!
//! Hides internal attributes from product CSV exports and renders product
//! PDF sheets whose content depends on who is asking.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
