//! # Types
//!
//! The register snapshot read back from the host and the validated leak
//! value extracted from it.
//!
//! Both types are host-agnostic on purpose: substitute implementations of
//! the thread-state seam construct them directly, so the validation logic
//! can be exercised on any platform.

use std::fmt;

/// Index of `x18` within the general-purpose register array.
///
/// `x18` is the platform-reserved register in the Darwin ARM64 ABI. The
/// affected kernel exception path stores a kernel code pointer there before
/// the user register state is saved, which is what makes this slot (and no
/// other) interesting to the probe.
pub const X18: usize = 18;

/// Bitmask selecting the high-order bits checked by validation.
///
/// The top 28 bits (bit 36 through bit 63) of the candidate value are
/// compared against [`KERNEL_ADDRESS_MARKER`]. Bits 32 through 35 are
/// deliberately left out of the check; a historical variant of this check
/// used the wider mask `0xFFFF_FFFF_0000_0000`, which additionally requires
/// those four bits to be zero and rejects addresses the shipped check
/// accepts. The narrow form is canonical here.
pub const KERNEL_ADDRESS_MASK: u64 = 0xFFFF_FFF0_0000_0000;

/// High-bit pattern shared by addresses in the kernel's virtual address
/// range on the target platform.
///
/// This is a heuristic shape check, not a guarantee: anything whose top 28
/// bits are all set passes. It is exactly the pattern kernel text pointers
/// carry on the hardware this probe targets.
pub const KERNEL_ADDRESS_MARKER: u64 = 0xFFFF_FFF0_0000_0000;

/// Saved ARM64 general-purpose register state for one thread.
///
/// This mirrors XNU's `arm_thread_state64_t`: 29 general-purpose registers,
/// frame pointer, link register, stack pointer, program counter, and the
/// status word. The layout must match the kernel's exactly because the
/// structure is filled in-place by `thread_get_state()`.
///
/// 272 bytes total, which is 68 `natural_t` words, the in/out count the
/// flavor call expects.
///
/// The probe treats the snapshot as transient: populated by one query,
/// inspected at one index, discarded.
///
/// See: [ARM_THREAD_STATE64 structure](https://github.com/apple-oss-distributions/xnu/blob/main/osfmk/mach/arm/_structs.h)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ThreadState64
{
    /// General-purpose registers x0 through x28
    pub x: [u64; 29],
    /// Frame pointer (x29)
    pub fp: u64,
    /// Link register (x30)
    pub lr: u64,
    /// Stack pointer
    pub sp: u64,
    /// Program counter
    pub pc: u64,
    /// Current Program Status Register
    pub cpsr: u32,
    /// Flags field (padding in older kernels, pointer-authentication
    /// metadata in newer ones)
    pub flags: u32,
}

impl Default for ThreadState64
{
    fn default() -> Self
    {
        Self {
            x: [0; 29],
            fp: 0,
            lr: 0,
            sp: 0,
            pc: 0,
            cpsr: 0,
            flags: 0,
        }
    }
}

/// A register value that passed the kernel-address shape check.
///
/// ## Why use a newtype?
///
/// A `LeakedValue` can only be obtained through [`LeakedValue::from_register`],
/// so holding one proves the marker check already ran. There is no
/// half-validated state to represent: callers either have a value whose top
/// 28 bits match the marker, or they have nothing.
///
/// ## Example
///
/// ```rust
/// use x18leak_core::types::LeakedValue;
///
/// let leaked = LeakedValue::from_register(0xFFFF_FFF0_1234_5678).unwrap();
/// assert_eq!(leaked.value(), 0xFFFF_FFF0_1234_5678);
/// assert!(LeakedValue::from_register(0x1234_5678).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeakedValue(u64);

impl LeakedValue
{
    /// Validate a raw register value against the kernel address marker.
    ///
    /// Returns `Some` only when the masked high bits equal
    /// [`KERNEL_ADDRESS_MARKER`] exactly. The stored value is the full
    /// unmasked register content.
    pub fn from_register(value: u64) -> Option<Self>
    {
        if value & KERNEL_ADDRESS_MASK == KERNEL_ADDRESS_MARKER {
            Some(LeakedValue(value))
        } else {
            None
        }
    }

    /// Get the raw `u64` value of the leaked pointer.
    pub const fn value(self) -> u64
    {
        self.0
    }
}

impl From<LeakedValue> for u64
{
    fn from(leaked: LeakedValue) -> Self
    {
        leaked.0
    }
}

impl fmt::Display for LeakedValue
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:016x}", self.0)
    }
}
