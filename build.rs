use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

fn embed_build_info() {
  // Short commit hash shown by `copyright version`. Skipped outside a git checkout.
  if let Ok(output) = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output()
    && output.status.success()
  {
    let git_hash = String::from_utf8(output.stdout).unwrap_or_default().trim().to_string();
    println!("cargo:rustc-env=COPYRIGHT_GIT_HASH={git_hash}");
  }

  if let Ok(output) = Command::new("git").args(["log", "-1", "--format=%cs"]).output()
    && output.status.success()
  {
    let git_date = String::from_utf8(output.stdout).unwrap_or_default().trim().to_string();
    println!("cargo:rustc-env=COPYRIGHT_GIT_DATE={git_date}");
  }
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}
