//! # macOS Host Implementation
//!
//! The Mach-backed implementation of the thread-state seam.
//!
//! macOS exposes thread introspection through Mach ports: a thread port is
//! a communication channel to the kernel's bookkeeping object for one
//! thread, and `thread_get_state()` copies that thread's saved register
//! set out through it.
//!
//! ## Key Mach APIs Used
//!
//! - `mach_thread_self()`: acquire a port for the calling thread (from `mach2`)
//! - `thread_get_state()`: read saved registers (declared ourselves)
//! - `mach_port_deallocate()`: release the thread port (declared ourselves)
//!
//! ## Dependencies
//!
//! We use a hybrid approach:
//! - **mach2 crate**: for well-maintained trap wrappers (`mach_thread_self`,
//!   `mach_task_self`, `KERN_SUCCESS`)
//! - **libc crate**: for type definitions (`thread_act_t`, `natural_t`, etc.)
//! - **extern "C"**: for the raw state and port calls we declare directly
//!
//! ## References
//!
//! - [Apple Mach Kernel Programming](https://developer.apple.com/library/archive/documentation/Darwin/Conceptual/KernelProgramming/Mach/Mach.html)
//! - [thread_get_state(3) man page](https://developer.apple.com/library/archive/documentation/Darwin/Reference/ManPages/man3/thread_get_state.3.html)

pub mod constants;
pub mod ffi;
pub mod source;

pub use source::MachThreadStateSource;
