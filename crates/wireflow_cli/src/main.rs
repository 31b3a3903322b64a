//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wireflow_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("wireflow_core ping={}", wireflow_core::ping());
    println!("wireflow_core version={}", wireflow_core::core_version());
    println!(
        "wireflow_core policies={}",
        wireflow_core::supported_policy_names().join("|")
    );
}
