use anyhow::{Context, Result};

/// The external build tool invoked once per target.
pub const GO: &str = "go";

/// Ensure the Go toolchain is available on PATH.
pub fn ensure_go() -> Result<()> {
    which::which(GO).context(
        "go not found on PATH.\n\
         Install from https://go.dev/dl/ or via your package manager.",
    )?;
    Ok(())
}
