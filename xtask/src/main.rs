//! Build tasks for the birthday workspace.
//!
//! Usage: `cargo xtask <command>`

use std::path::{Path, PathBuf};
use std::process::Command as Process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "birthday build automation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the browser bundle into `dist/`
    Web {
        /// Build in release mode
        #[arg(long)]
        release: bool,
        /// Output directory, relative to the workspace root
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Web { release, out_dir } => web(release, &out_dir),
    }
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").context("CARGO_MANIFEST_DIR not set")?;
    Path::new(&manifest_dir)
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn run(command: &mut Process) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to spawn {command:?}"))?;
    if !status.success() {
        bail!("{command:?} exited with {status}");
    }
    Ok(())
}

fn web(release: bool, out_dir: &Path) -> Result<()> {
    let root = project_root()?;
    let out_dir = root.join(out_dir);
    let profile = if release { "release" } else { "debug" };

    println!("=== Building wasm ({profile}) ===");
    let mut cargo = Process::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".into()));
    let _ = cargo
        .current_dir(&root)
        .args(["rustc", "--lib", "--target", WASM_TARGET])
        .args(["--no-default-features", "--features", "web"])
        .args(["--crate-type", "cdylib"])
        .env("RUSTFLAGS", "--cfg getrandom_backend=\"wasm_js\"");
    if release {
        let _ = cargo.arg("--release");
    }
    run(&mut cargo)?;

    println!("=== Generating bindings ===");
    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join("birthday.wasm");
    run(Process::new("wasm-bindgen")
        .arg("--target")
        .arg("web")
        .arg("--no-typescript")
        .arg("--out-dir")
        .arg(&out_dir)
        .arg(&wasm))
    .context("wasm-bindgen failed (install with `cargo install wasm-bindgen-cli`)")?;

    println!("=== Copying page and assets ===");
    let _ = std::fs::copy(root.join("web/index.html"), out_dir.join("index.html"))
        .context("copying index.html")?;
    copy_dir(&root.join("assets"), &out_dir.join("assets"))?;

    println!("\nBundle written to {}", out_dir.display());
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    std::fs::create_dir_all(to).with_context(|| format!("creating {}", to.display()))?;
    for entry in std::fs::read_dir(from).with_context(|| format!("reading {}", from.display()))? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            let _ = std::fs::copy(entry.path(), &target)
                .with_context(|| format!("copying {}", entry.path().display()))?;
        }
    }
    Ok(())
}
