//! Build script that records the compiler version via vergen.

/// Emit `VERGEN_RUSTC_SEMVER` for the client diagnostics header.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use vergen::{Emitter, RustcBuilder};
    let rustc = RustcBuilder::default().semver(true).build()?;
    Emitter::default().add_instructions(&rustc)?.emit()?;

    Ok(())
}
