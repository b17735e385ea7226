//! Change notification plumbing for presentation-layer subscribers.
//!
//! # Responsibility
//! - Deliver vendor/stock change events to registered listeners.
//! - Replace the legacy ambient-global update model with an explicit,
//!   service-owned subscription interface.
//!
//! # Invariants
//! - Events are delivered synchronously, after the triggering commit.
//! - Listener registration order is delivery order.

pub mod hub;
