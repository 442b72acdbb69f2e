//! # macOS Platform Constants
//!
//! Constants for the Mach thread-state query.

use libc::{c_int, mach_msg_type_number_t};

// ============================================================================
// Thread State Flavors
// ============================================================================

/// ARM64 thread state flavor (flavor 6)
///
/// Used with `thread_get_state()` to read the ARM64 general-purpose
/// register set (x0-x28, FP, LR, SP, PC, CPSR).
///
/// Not gated on `target_arch`: the probe always requests the ARM64 flavor,
/// and on Intel hardware the kernel rejects it with
/// `KERN_INVALID_ARGUMENT`, which the probe folds into the sentinel.
pub const ARM_THREAD_STATE64: c_int = 6;

/// ARM64 thread state count (68 u32 values)
///
/// The number of `natural_t` (u32) values required to hold ARM64 thread
/// state. This is the in/out count supplied alongside the state buffer;
/// the buffer itself is a [`crate::types::ThreadState64`], whose 272-byte
/// layout yields exactly this word count.
pub const ARM_THREAD_STATE64_COUNT: mach_msg_type_number_t = 68;
