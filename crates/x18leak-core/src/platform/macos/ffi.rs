//! # macOS Mach API FFI Declarations
//!
//! The unsafe `extern "C"` declarations for the Mach calls the probe makes
//! directly. Keeping them in one place keeps the unsafe surface easy to
//! review; they are wrapped in a safe implementation of the thread-state
//! seam in [`super::source`].
//!
//! ## Safety Notes
//!
//! All functions here are `unsafe` because they:
//! - Interact directly with the kernel through raw port names
//! - Write through caller-supplied pointers
//! - Trust the caller to size the state buffer for the requested flavor

use libc::{c_int, kern_return_t, mach_msg_type_number_t, mach_port_t, natural_t, thread_act_t};

// Thread State Functions
#[link(name = "c", kind = "dylib")]
extern "C" {
    /// Read thread state (registers) from a thread
    ///
    /// Copies the saved CPU register values for `target_act` into the
    /// caller's buffer. The format depends on the requested flavor; for
    /// `ARM_THREAD_STATE64` the buffer is an `arm_thread_state64_t`
    /// viewed as an array of `natural_t` words.
    ///
    /// ## Parameters
    ///
    /// - `target_act`: Thread port to read from
    /// - `flavor`: Architecture flavor (`ARM_THREAD_STATE64` = 6)
    /// - `old_state`: Output buffer for register values
    /// - `old_state_count`: Input/output - capacity of the buffer in
    ///   words / number of words actually written
    ///
    /// ## Returns
    ///
    /// - `KERN_SUCCESS` (0) on success
    /// - `KERN_INVALID_ARGUMENT` if the flavor is invalid for this CPU
    /// - `KERN_FAILURE` if the thread port is invalid
    ///
    /// ## Safety
    ///
    /// This function is unsafe because:
    /// - It requires a valid thread port
    /// - The state buffer must be correctly sized for the flavor
    /// - It writes through both out-pointers unconditionally on success
    ///
    /// See: [thread_get_state documentation](https://developer.apple.com/documentation/kernel/1418576-thread_get_state/)
    pub fn thread_get_state(
        target_act: thread_act_t,
        flavor: c_int,
        old_state: *mut natural_t,
        old_state_count: *mut mach_msg_type_number_t,
    ) -> kern_return_t;

    /// Deallocate a Mach port
    ///
    /// Releases one user reference to a Mach port, here the thread port
    /// handed out by `mach_thread_self()`. That call allocates a new port
    /// right on every invocation, so skipping the matching deallocate
    /// leaks a port name per probe call.
    ///
    /// ## Parameters
    ///
    /// - `target_task`: Task whose port namespace holds the name (use
    ///   `mach_task_self()`)
    /// - `name`: The port to deallocate
    ///
    /// ## Returns
    ///
    /// - `KERN_SUCCESS` (0) on success
    /// - `KERN_INVALID_RIGHT` if the name is invalid or already released
    ///
    /// ## Safety
    ///
    /// This function is unsafe because:
    /// - It releases kernel resources
    /// - Double-deallocation of a name is undefined behavior at the Mach
    ///   level
    ///
    /// See: [mach_port_deallocate documentation](https://developer.apple.com/documentation/kernel/1578777-mach_port_deallocate/)
    pub fn mach_port_deallocate(target_task: mach_port_t, name: mach_port_t) -> kern_return_t;
}
