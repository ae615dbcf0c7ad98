use std::fmt;

/// One (platform, architecture) pair the driver builds for.
///
/// The full platform set is {darwin, linux, windows} and the architecture set
/// is {arm, amd64, 386}, but only the pairs in [`TARGETS`] are ever attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub platform: &'static str,
    pub arch: &'static str,
}

/// The fixed build matrix, in invocation order.
///
/// This is a deliberate subset of the platform × architecture cross-product:
/// darwin ships amd64 only and windows has no arm build.
pub const TARGETS: &[Target] = &[
    Target { platform: "darwin", arch: "amd64" },
    Target { platform: "linux", arch: "386" },
    Target { platform: "linux", arch: "amd64" },
    Target { platform: "linux", arch: "arm" },
    Target { platform: "windows", arch: "386" },
    Target { platform: "windows", arch: "amd64" },
];

impl Target {
    /// The file extension for compiled binaries on this platform.
    pub fn binary_ext(&self) -> &'static str {
        if self.platform == "windows" {
            "exe"
        } else {
            "bin"
        }
    }

    /// The artifact file name for this target, e.g. `linux-amd64.bin`.
    pub fn artifact_file_name(&self) -> String {
        format!("{}-{}.{}", self.platform, self.arch, self.binary_ext())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.arch)
    }
}
