//! # Platform-Specific Host Implementations
//!
//! Real implementations of the thread-state seam live here, one module per
//! platform that actually exposes the weakness.
//!
//! Only macOS qualifies: the leaked pointer comes from an XNU exception
//! vector, so there is no Linux or Windows counterpart to add later. Other
//! platforms interact with this crate purely through substitute sources.

#[cfg(target_os = "macos")]
pub mod macos;
