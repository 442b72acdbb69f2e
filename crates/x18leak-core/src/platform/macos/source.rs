//! # Mach Thread-State Source
//!
//! The production implementation of [`ThreadStateSource`], backed by the
//! Mach thread-introspection calls.

use libc::{mach_msg_type_number_t, natural_t, thread_act_t};
use mach2::kern_return::KERN_SUCCESS;
use mach2::mach_init::mach_thread_self;
use mach2::traps::mach_task_self;

use crate::error::{ProbeError, ProbeResult};
use crate::host::ThreadStateSource;
use crate::platform::macos::{constants, ffi};
use crate::types::ThreadState64;

/// Thread-state source backed by the real Mach APIs.
///
/// Stateless: each call goes straight to the kernel. Querying one's own
/// thread state requires no privilege or entitlement, which is precisely
/// the premise of the weakness this crate demonstrates.
pub struct MachThreadStateSource;

impl ThreadStateSource for MachThreadStateSource
{
    type Handle = thread_act_t;

    /// Acquire a port for the calling thread.
    ///
    /// `mach_thread_self()` allocates a new port right each time it is
    /// called, so every handle returned here must be matched by a
    /// `release()`.
    fn current_thread(&self) -> thread_act_t
    {
        unsafe { mach_thread_self() }
    }

    /// Fetch the saved ARM64 general-purpose register set.
    ///
    /// Supplies a [`ThreadState64`] as the flavor buffer, viewed as an
    /// array of `natural_t` words with the matching in/out count.
    ///
    /// ## Errors
    ///
    /// `QueryFailed` carrying the raw `kern_return_t` when the call does
    /// not report `KERN_SUCCESS` (for example the ARM64 flavor on Intel
    /// hardware, or an invalid port).
    fn thread_state(&self, handle: &thread_act_t) -> ProbeResult<ThreadState64>
    {
        let mut state = ThreadState64::default();
        let mut count: mach_msg_type_number_t = constants::ARM_THREAD_STATE64_COUNT;

        let kr = unsafe {
            ffi::thread_get_state(
                *handle,
                constants::ARM_THREAD_STATE64,
                &mut state as *mut ThreadState64 as *mut natural_t,
                &mut count,
            )
        };

        if kr != KERN_SUCCESS {
            return Err(ProbeError::QueryFailed(kr));
        }

        Ok(state)
    }

    /// Release the thread port.
    ///
    /// Best effort: the deallocate status is ignored, matching the
    /// infallible-release contract of the seam. There is nothing useful to
    /// do with a failed deallocate of our own port name.
    fn release(&self, handle: &thread_act_t)
    {
        unsafe {
            let _ = ffi::mach_port_deallocate(mach_task_self(), *handle);
        }
    }
}
