use std::path::Path;
use std::process::Command;

fn main() {
    // Prefer BIOLINK_VERSION env var if set (e.g., by CI release workflow),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("BIOLINK_VERSION") {
        println!("cargo:rustc-env=BIOLINK_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=BIOLINK_VERSION={version}");
    }

    // Watching a missing path makes cargo rerun the script on every build.
    for path in [".git/HEAD", ".git/refs"] {
        if Path::new(path).exists() {
            println!("cargo:rerun-if-changed={path}");
        }
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=BIOLINK_VERSION");
}
