fn main() {
    // Pick up new commits and checkouts without a clean build.
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let git = |args: &[&str]| {
        std::process::Command::new("git")
            .args(args)
            .output()
            .ok()
            .filter(|out| out.status.success())
    };

    let hash = git(&["rev-parse", "--short", "HEAD"])
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_default();
    let on_tag = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    println!("cargo:rustc-env=GIT_HASH={hash}");
    println!("cargo:rustc-env=ON_RELEASE_TAG={on_tag}");
}
