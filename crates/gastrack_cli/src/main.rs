//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `gastrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("gastrack_core ping={}", gastrack_core::ping());
    println!("gastrack_core version={}", gastrack_core::core_version());
}
