//! Build script that stamps the binary with a version string.
//!
//! `triage --version` reports `git describe` output when built from a
//! checkout and the crate version otherwise.

use std::process::Command;

fn main() {
    // Rebuild when the checked-out commit or a tag moves
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = describe_checkout().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=TRIAGE_VERSION={version}");
}

fn describe_checkout() -> Option<String> {
    // Nearest tag, falling back to the short hash; marks uncommitted changes
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    if described.is_empty() {
        return None;
    }

    // Tags are written as v1.2.3
    Some(described.strip_prefix('v').unwrap_or(described).to_string())
}
