//! Build script that captures the toolchain version for `program_info`.
//!
//! Sets `SLOGTOOL_RUSTC_VERSION` when `rustc --version` can be run. When it
//! cannot, nothing is emitted and the crate falls back to "unknown".

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");
    println!("cargo:rerun-if-changed=build.rs");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    if let Some(version) = rustc_version(&rustc) {
        println!("cargo:rustc-env=SLOGTOOL_RUSTC_VERSION={}", version);
    }
}

/// Extract "1.85.0" from "rustc 1.85.0 (4d91de4e4 2025-02-17)".
fn rustc_version(rustc: &str) -> Option<String> {
    let output = Command::new(rustc).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    stdout
        .split_whitespace()
        .nth(1)
        .map(|v| v.to_string())
        .filter(|v| !v.is_empty())
}
