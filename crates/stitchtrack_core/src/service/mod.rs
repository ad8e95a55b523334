//! Core use-case services.
//!
//! # Responsibility
//! - Own canonical storage and expose the project store facade controllers
//!   drive.
//! - Keep controller code decoupled from SQL and filesystem details.

pub mod project_service;
