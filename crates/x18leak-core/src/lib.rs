//! # x18leak-core
//!
//! Kernel pointer disclosure probe for the ARM64 `x18` thread-state leak on
//! macOS.
//!
//! On affected XNU builds, the synchronous exception path that handles a
//! system call from 64-bit userspace clobbers `x18` with the kernel address
//! of the `Lel0_synchronous_vector_64_long` vector entry before the saved
//! user state is written out. Reading back the calling thread's own saved
//! register state with `thread_get_state()` therefore discloses an
//! unslid-by-nothing kernel text pointer to unprivileged code.
//!
//! This crate packages exactly that primitive:
//!
//! 1. Acquire a Mach port for the calling thread
//! 2. Query the saved general-purpose register set (`ARM_THREAD_STATE64`)
//! 3. Release the thread port
//! 4. Validate that `x18` carries the kernel address marker in its high bits
//! 5. Return the full value, or `0` when nothing was leaked
//!
//! The only signal a caller gets is "non-zero or not". Absence of a leak is
//! a normal outcome on patched or unaffected systems, so every failure is
//! silent at the public surface. What a caller does with the pointer
//! (kernel-slide computation, symbolication, anything further) is out of
//! scope here.
//!
//! ## Platform Support
//!
//! - **macOS on Apple Silicon**: the real probe, via Mach APIs
//! - **macOS on Intel**: compiles and runs; the ARM64 state query is
//!   rejected by the kernel and the probe reports the sentinel
//! - **Everything else**: [`leak()`] is a sentinel-returning stub, and the
//!   validation logic remains fully testable through substitute hosts
//!
//! ## Why unsafe code is needed
//!
//! The probe calls low-level Mach APIs that interact directly with the
//! kernel. These calls are inherently unsafe because they operate on raw
//! port names and caller-supplied buffers. They are wrapped in safe
//! abstractions here; the validation logic itself is entirely safe code.

#![allow(unsafe_code)] // Required for low-level system APIs (Mach thread-state calls)

pub mod error;
pub mod host;
pub mod platform;
pub mod probe;
pub mod types;

// Re-export commonly used items
pub use error::{ProbeError, ProbeResult};
pub use host::ThreadStateSource;
#[cfg(target_os = "macos")]
pub use platform::macos::MachThreadStateSource;
pub use probe::{leak, RegisterLeakProbe};
pub use types::{LeakedValue, ThreadState64};
