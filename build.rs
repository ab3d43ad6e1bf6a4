use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let revision = command_output("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    emit("REVISION", &revision);

    let tree = match command_output("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    emit("TREE", tree);

    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    emit("BUILT_AT", &built_at);

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".to_string());
    emit("TARGET", &target);

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".to_string());
    emit("PROFILE", &profile);
}

fn emit(name: &str, value: &str) {
    println!("cargo:rustc-env=BUDGET_TRACKER_BUILD_{name}={value}");
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
