// Embeds the source revision shown by `hone --version`.
//
// Packagers building from a tarball can set HONE_BUILD_COMMIT; otherwise
// `git describe` is asked, and "unknown" is used outside a checkout.

use std::env;
use std::process::Command;

fn describe_head() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=7"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_string())
}

fn main() {
    println!("cargo:rerun-if-env-changed=HONE_BUILD_COMMIT");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");

    let commit = env::var("HONE_BUILD_COMMIT")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe_head)
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=GIT_COMMIT_HASH={commit}");
}
