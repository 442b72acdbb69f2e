//! # Error Types
//!
//! Failure kinds for the register-state probe.
//!
//! We use `thiserror` to generate `Error` trait implementations and
//! readable messages. Note that neither variant ever reaches the public
//! `leak()` surface: both collapse to the `0` sentinel there. The typed
//! variants exist for callers of `try_leak()` and for tests that need to
//! tell the two apart.

use thiserror::Error;

/// The two ways a probe invocation can come back empty.
///
/// ## Error Categories
///
/// 1. **Host errors**: `QueryFailed` (the register-state retrieval call
///    reported non-success)
/// 2. **Shape errors**: `ValidationFailed` (retrieval succeeded but the
///    inspected register does not look like a kernel address)
#[derive(Error, Debug)]
pub enum ProbeError
{
    /// The host's register-state retrieval reported a non-success status.
    ///
    /// Carries the raw status code so it can be logged or inspected. On
    /// macOS this is the `kern_return_t` from `thread_get_state()`; common
    /// values there are `KERN_INVALID_ARGUMENT` (4, e.g. the ARM64 flavor
    /// on Intel hardware) and `KERN_FAILURE` (14).
    #[error("thread state query failed with status {0}")]
    QueryFailed(i32),

    /// Retrieval succeeded but the extracted register value's high bits do
    /// not match the kernel address marker.
    ///
    /// This is the expected outcome on patched kernels, where `x18` holds
    /// whatever the thread last put there. The rejected value is carried
    /// for diagnostics.
    #[error("register value 0x{0:016x} does not carry the kernel address marker")]
    ValidationFailed(u64),
}

/// Convenience type alias for `Result<T, ProbeError>`
///
/// ```rust
/// use x18leak_core::error::ProbeResult;
/// fn foo() -> ProbeResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
