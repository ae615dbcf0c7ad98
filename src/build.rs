use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{debug, info, warn};

use crate::target::{Target, TARGETS};
use crate::toolchain;

/// CLI options for a cross-build run.
#[derive(Args, Debug)]
pub struct BuildOpts {
    /// Go package or ./path to build (passed through to `go build`)
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Output directory for compiled binaries
    #[arg(long, default_value = "builds")]
    pub output_dir: PathBuf,

    /// Stop at the first failed build and exit non-zero
    #[arg(long)]
    pub fail_fast: bool,
}

/// Cross-compile the package for every target in the build matrix.
///
/// Targets are built strictly in matrix order, one `go build` child process
/// at a time. By default a failed target is logged and the remaining targets
/// are still attempted; with `--fail-fast` the first failure aborts the run.
pub fn run(opts: &BuildOpts) -> Result<()> {
    if opts.package.is_empty() {
        bail!("package must not be empty");
    }

    if opts.fail_fast {
        toolchain::ensure_go()?;
    }

    std::fs::create_dir_all(&opts.output_dir)
        .with_context(|| format!("creating output directory {}", opts.output_dir.display()))?;

    let mut failed: Vec<&Target> = Vec::new();

    for target in TARGETS {
        info!("--- {target} ---");

        match build_target(&opts.package, &opts.output_dir, target) {
            Ok(()) => {}
            Err(err) if opts.fail_fast => {
                return Err(err).with_context(|| format!("build failed for {target}"));
            }
            Err(err) => {
                warn!("{target}: {err:#}");
                failed.push(target);
            }
        }
    }

    if failed.is_empty() {
        info!(
            "Built {} artifacts in {}",
            TARGETS.len(),
            opts.output_dir.display()
        );
    } else {
        let names: Vec<String> = failed.iter().map(|t| t.to_string()).collect();
        warn!(
            "{} of {} targets failed: {}",
            failed.len(),
            TARGETS.len(),
            names.join(", ")
        );
    }

    Ok(())
}

/// Run one `go build` invocation, blocking until it exits.
fn build_target(package: &str, output_dir: &Path, target: &Target) -> Result<()> {
    let mut cmd = build_command(package, output_dir, target);
    debug!(
        "Running: GOOS={} GOARCH={} go build -o {}",
        target.platform,
        target.arch,
        output_dir.join(target.artifact_file_name()).display()
    );

    let status = cmd.status().context("failed to run go build")?;
    if !status.success() {
        bail!("go build failed with {status}");
    }

    info!(
        "Compiled: {}",
        output_dir.join(target.artifact_file_name()).display()
    );
    Ok(())
}

/// Construct the `go build` command for one target.
///
/// GOOS/GOARCH are set on the child command only, never on the parent
/// process environment. Stdout and stderr are inherited.
pub(crate) fn build_command(package: &str, output_dir: &Path, target: &Target) -> Command {
    let artifact = output_dir.join(target.artifact_file_name());

    let mut cmd = Command::new(toolchain::GO);
    cmd.arg("build").arg("-o").arg(&artifact).arg(package);
    cmd.env("GOOS", target.platform).env("GOARCH", target.arch);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(cmd: &Command, key: &str) -> Option<String> {
        cmd.get_envs()
            .find(|(k, _)| k.to_string_lossy() == key)
            .and_then(|(_, v)| v.map(|v| v.to_string_lossy().into_owned()))
    }

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_linux_amd64_command() {
        let target = Target {
            platform: "linux",
            arch: "amd64",
        };
        let cmd = build_command("./cmd/app", Path::new("builds"), &target);

        assert_eq!(cmd.get_program().to_string_lossy(), "go");
        assert_eq!(
            args_of(&cmd),
            vec!["build", "-o", "builds/linux-amd64.bin", "./cmd/app"]
        );
        assert_eq!(env_of(&cmd, "GOOS").as_deref(), Some("linux"));
        assert_eq!(env_of(&cmd, "GOARCH").as_deref(), Some("amd64"));
    }

    #[test]
    fn test_windows_amd64_output_path() {
        let target = Target {
            platform: "windows",
            arch: "amd64",
        };
        let cmd = build_command("./cmd/app", Path::new("builds"), &target);

        assert!(args_of(&cmd).contains(&"builds/windows-amd64.exe".to_string()));
        assert_eq!(env_of(&cmd, "GOOS").as_deref(), Some("windows"));
    }

    #[test]
    fn test_custom_output_dir() {
        let target = Target {
            platform: "darwin",
            arch: "amd64",
        };
        let cmd = build_command("./cmd/app", Path::new("dist"), &target);

        assert!(args_of(&cmd).contains(&"dist/darwin-amd64.bin".to_string()));
    }
}
