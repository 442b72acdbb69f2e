//! # Host Capability Seam
//!
//! The narrow interface between the probe and the operating system's
//! thread-introspection facility, plus the scoped-acquisition guard that
//! enforces the handle-release discipline.
//!
//! The host facility is exactly three operations: obtain a handle to the
//! calling thread, fetch that thread's saved register snapshot, release
//! the handle. Putting those behind a trait lets the validation logic run
//! against a substitute host in tests instead of real system calls.
//!
//! ## Why use a trait?
//!
//! - Swap implementations easily (a counting fake in tests, Mach in production)
//! - Keep the unsafe FFI confined to one implementor
//! - Compile and test the probe logic on platforms that have no Mach at all

use crate::error::ProbeResult;
use crate::types::ThreadState64;

/// Provider of saved register state for the calling thread.
///
/// Implementations are expected to be cheap to construct and stateless, or
/// at least interior-mutable: every probe call goes through the full
/// acquire / fetch / release cycle and nothing is cached between calls.
///
/// ## Contract
///
/// - `current_thread()` must return a handle for the **calling** thread,
///   not an arbitrary one; the leak is only present in a thread's own
///   post-syscall saved state.
/// - Every handle returned by `current_thread()` is released exactly once
///   via `release()`. [`ThreadHandleGuard`] enforces this for probe code.
/// - `thread_state()` must not consume the handle; fetching and releasing
///   are independent operations.
pub trait ThreadStateSource
{
    /// Opaque, releasable reference to a thread's kernel-side bookkeeping
    /// object. A Mach port on macOS; whatever a substitute wants in tests.
    type Handle;

    /// Acquire a handle referring to the currently executing thread.
    fn current_thread(&self) -> Self::Handle;

    /// Fetch the saved general-purpose register snapshot for the thread
    /// behind `handle`.
    ///
    /// ## Errors
    ///
    /// `QueryFailed` with the host's status code when the retrieval call
    /// does not report success.
    fn thread_state(&self, handle: &Self::Handle) -> ProbeResult<ThreadState64>;

    /// Release a handle previously returned by `current_thread()`.
    ///
    /// Release is best-effort and infallible from the caller's point of
    /// view; a host that can fail to release logs or swallows that failure
    /// internally.
    fn release(&self, handle: &Self::Handle);
}

/// RAII guard that acquires a thread handle and releases it exactly once
/// when dropped.
///
/// The probe's original shape released the handle *before* checking the
/// query's status, and the release must survive every exit path including
/// early returns. Scoping the acquisition to a guard keeps that property
/// structural instead of relying on straight-line control flow.
///
/// ## Example
///
/// ```rust
/// use x18leak_core::host::{ThreadHandleGuard, ThreadStateSource};
/// # use x18leak_core::error::ProbeResult;
/// # use x18leak_core::types::ThreadState64;
/// # struct NullSource;
/// # impl ThreadStateSource for NullSource {
/// #     type Handle = ();
/// #     fn current_thread(&self) {}
/// #     fn thread_state(&self, _handle: &()) -> ProbeResult<ThreadState64> { Ok(ThreadState64::default()) }
/// #     fn release(&self, _handle: &()) {}
/// # }
/// # let source = NullSource;
/// let fetched = {
///     let guard = ThreadHandleGuard::acquire(&source);
///     source.thread_state(guard.handle())
///     // guard drops here: the handle is released before the
///     // fetch outcome is even looked at
/// };
/// ```
pub struct ThreadHandleGuard<'a, S: ThreadStateSource>
{
    source: &'a S,
    handle: S::Handle,
}

impl<'a, S: ThreadStateSource> ThreadHandleGuard<'a, S>
{
    /// Acquire a handle to the calling thread from `source`.
    pub fn acquire(source: &'a S) -> Self
    {
        let handle = source.current_thread();
        Self { source, handle }
    }

    /// Borrow the guarded handle for a fetch call.
    pub fn handle(&self) -> &S::Handle
    {
        &self.handle
    }
}

impl<'a, S: ThreadStateSource> Drop for ThreadHandleGuard<'a, S>
{
    fn drop(&mut self)
    {
        self.source.release(&self.handle);
    }
}
