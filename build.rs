//! Embeds the commit, build date and profile for `delve --version`.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let commit = String::from_utf8(output.stdout).ok()?;
    Some(commit.trim().to_string()).filter(|c| !c.is_empty())
}

fn main() -> io::Result<()> {
    // Release tarballs have no .git, so packagers can pass these in.
    let commit = env::var("DELVE_BUILD_COMMIT")
        .ok()
        .or_else(git_commit)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("DELVE_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    fs::write(
        Path::new(&out_dir).join("build_info.rs"),
        format!(
            "pub const BUILD_COMMIT: &str = {:?};\n\
             pub const BUILD_DATE: &str = {:?};\n\
             pub const BUILD_PROFILE: &str = {:?};\n",
            commit, date, profile
        ),
    )?;

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=DELVE_BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=DELVE_BUILD_DATE");
    Ok(())
}
