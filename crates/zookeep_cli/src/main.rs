//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `zookeep_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("zookeep_core ping={}", zookeep_core::ping());
    println!("zookeep_core version={}", zookeep_core::core_version());
}
