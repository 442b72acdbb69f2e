//! Build script for x18leak-core
//!
//! Checks system requirements before compilation:
//! - Minimum Rust version (Edition 2021 = Rust 1.56.0+)
//! - macOS version on Apple Silicon (the thread-state APIs this crate
//!   binds are only interesting on Big Sur and later hardware)

fn main()
{
    // Check minimum Rust version
    // Edition 2021 requires Rust 1.56.0
    if let Ok(rustc_version) = rustc_version::version() {
        let min_rust_version = rustc_version::Version::parse("1.56.0").unwrap();

        if rustc_version < min_rust_version {
            panic!(
                "x18leak-core requires Rust {} or newer (Edition 2021), found {}",
                min_rust_version, rustc_version
            );
        }
    } else {
        // If we can't get version (e.g., in some build environments), just warn
        println!("cargo:warning=could not verify Rust version");
    }

    #[cfg(target_arch = "aarch64")]
    #[cfg(target_os = "macos")]
    check_macos_arm64_requirements();
}

#[cfg(target_arch = "aarch64")]
#[cfg(target_os = "macos")]
fn check_macos_arm64_requirements()
{
    // Apple Silicon requires macOS 11.0+ (Big Sur)
    let min_macos_version = (11, 0, 0);

    if let Some(version) = get_macos_version() {
        if version < min_macos_version {
            panic!(
                "x18leak-core on Apple Silicon requires macOS {}.{}.{} or newer (Big Sur+), found {}.{}.{}",
                min_macos_version.0, min_macos_version.1, min_macos_version.2, version.0, version.1, version.2
            );
        }
    }
    // If we can't detect the macOS version, continue silently
    // (might be cross-compiling)
}

#[cfg(target_arch = "aarch64")]
#[cfg(target_os = "macos")]
fn get_macos_version() -> Option<(u32, u32, u32)>
{
    // Best-effort check - may not work in all build environments
    use std::process::Command;

    let output = Command::new("sw_vers").arg("-productVersion").output().ok()?;

    let version_str = String::from_utf8(output.stdout).ok()?;
    let version_str = version_str.trim();

    // Parse version string (e.g., "14.2.1" or "11.0.0")
    let parts: Vec<&str> = version_str.split('.').collect();
    if parts.len() < 2 {
        return None;
    }

    let major = parts[0].parse::<u32>().ok()?;
    let minor = parts[1].parse::<u32>().ok()?;
    let patch = parts.get(2).and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);

    Some((major, minor, patch))
}
