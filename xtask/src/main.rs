use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const EXTENSION_CRATE: &str = "solved-streak-extension";
const WASM_TARGET: &str = "wasm32-unknown-unknown";
const DIST_DIR: &str = "dist";
const STATIC_DIR: &str = "extension/static";

/// Binaries loaded by the service worker and the content script.
const WORKER_BINS: [&str; 2] = ["background", "content"];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "solved.ac streak checker task runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the wasm bundles and assemble the unpacked extension in dist/
    Pack {
        /// Optimized build
        #[arg(short, long)]
        release: bool,
    },

    /// Run tests
    Test {
        /// Only test this package
        #[arg(short, long)]
        package: Option<String>,
    },

    /// Run clippy linter
    Clippy,

    /// Remove dist/ and build artifacts
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack { release } => pack(release),
        Commands::Test { package } => test(package),
        Commands::Clippy => clippy(),
        Commands::Clean => clean(),
    }
}

fn pack(release: bool) -> Result<()> {
    let profile = if release { "release" } else { "debug" };

    println!("🔨 Building background and content binaries ({})...", profile);
    let mut args = vec![
        "build",
        "-p",
        EXTENSION_CRATE,
        "--bins",
        "--no-default-features",
        "--target",
        WASM_TARGET,
    ];
    if release {
        args.push("--release");
    }
    run_cmd("cargo", &args)?;

    for bin in WORKER_BINS {
        println!("🔗 Generating JS bindings for {}...", bin);
        let wasm = format!("target/{}/{}/{}.wasm", WASM_TARGET, profile, bin);
        let out_dir = format!("{}/{}", DIST_DIR, bin);
        run_cmd(
            "wasm-bindgen",
            &[
                &wasm,
                "--out-dir",
                &out_dir,
                "--target",
                "no-modules",
                "--no-typescript",
            ],
        )?;
    }

    println!("🔨 Building popup...");
    // wasm-pack resolves --out-dir relative to the crate
    let popup_out = format!("../{}/popup", DIST_DIR);
    run_cmd(
        "wasm-pack",
        &[
            "build",
            "extension",
            if release { "--release" } else { "--dev" },
            "--target",
            "web",
            "--out-dir",
            &popup_out,
            "--out-name",
            "popup",
            "--no-typescript",
            "--no-pack",
        ],
    )?;

    println!("📦 Copying static files...");
    copy_dir(Path::new(STATIC_DIR), Path::new(DIST_DIR))?;

    println!();
    println!("✅ Extension assembled in {}/", DIST_DIR);
    println!();
    println!("Next steps:");
    println!("  chrome://extensions → Developer mode → Load unpacked → {}/", DIST_DIR);

    Ok(())
}

fn test(package: Option<String>) -> Result<()> {
    match package {
        Some(package) => {
            println!("🧪 Running tests for {}...", package);
            run_cmd("cargo", &["test", "-p", &package])?;
        }
        None => {
            println!("🧪 Running all tests...");
            run_cmd("cargo", &["test", "--workspace"])?;
        }
    }
    Ok(())
}

fn clippy() -> Result<()> {
    println!("🔍 Running clippy on workspace (warnings as errors)...");
    run_cmd(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    Ok(())
}

fn clean() -> Result<()> {
    println!("🗑️  Removing {}/...", DIST_DIR);
    // Ignore error if it was never built
    let _ = fs::remove_dir_all(DIST_DIR);

    println!("🧹 Removing build artifacts...");
    run_cmd("cargo", &["clean"])?;

    Ok(())
}

// Helper functions
fn run_cmd(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to run: {} {}", program, args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("Command failed: {} {}", program, args.join(" "));
    }

    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;

    for entry in fs::read_dir(from).with_context(|| format!("Failed to read {}", from.display()))? {
        let entry = entry?;
        let target: PathBuf = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }

    Ok(())
}
