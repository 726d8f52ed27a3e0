// File: crates/chart-render-skia/build.rs
// Summary: Link the Windows system libraries Skia's font manager needs.

fn main() {
    // Check the target, not the host, so cross builds link correctly.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW, ...
        println!("cargo:rustc-link-lib=advapi32");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
