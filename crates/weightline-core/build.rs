// File: crates/weightline-core/build.rs
// Summary: Links the Windows registry library Skia/ICU expect at runtime.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
