//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI layers decoupled from storage and ledger details.

pub mod alert_service;
pub mod inventory_service;
pub mod report_service;
pub mod session_service;
