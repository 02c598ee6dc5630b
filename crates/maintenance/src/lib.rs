//! Maintenance helpers for the property dashboard.
//!
//! Pure, synchronous functions that derive each system's maintenance status
//! and translate maintenance records between the editor and the REST API.
//! The only async surface is [`sync::apply_sync_plan`], which drives a
//! caller-supplied [`sync::MaintenanceApi`].

pub mod config;
pub mod dates;
pub mod lifecycle;
pub mod record_mapping;
pub mod status;
pub mod sync;
