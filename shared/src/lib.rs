//! Shared types and models for the Clinic Cloud Admin Platform
//!
//! This crate contains types shared between the admin client, the clinical
//! data-entry module, and other components of the system.

pub mod models;
pub mod types;
pub mod validation;
pub mod vitals;

pub use models::*;
pub use types::*;
pub use validation::*;
