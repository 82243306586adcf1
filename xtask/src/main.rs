use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for demoscape")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Time terrain generation
    Bench,
    /// Export a demo terrain and particle run to target/demo
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Bench => run_bench()?,
        Commands::Demo => run_demo()?,
    }

    Ok(())
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {step} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    let args = [
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ];
    cargo("clippy", &args)
}

fn run_tests() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn run_bench() -> Result<()> {
    let args = [
        "bench",
        "-p",
        "demoscape-terrain",
        "--bench",
        "bench_terrain_generate",
    ];
    cargo("bench", &args)
}

fn run_demo() -> Result<()> {
    let cli = ["run", "--release", "-p", "demoscape-cli", "--"];

    let terrain_out = "target/demo/terrain.json";
    let terrain = ["terrain", "--seed", "7", "--out", terrain_out];
    cargo("run terrain", &[&cli[..], &terrain[..]].concat())?;

    let frames_out = "target/demo/frames.json";
    let simulate = [
        "simulate",
        "--particles",
        "25",
        "--frames",
        "300",
        "--out",
        frames_out,
    ];
    cargo("run simulate", &[&cli[..], &simulate[..]].concat())?;

    let logo = ["logo", "--frames", "1000", "--every", "250"];
    cargo("run logo", &[&cli[..], &logo[..]].concat())
}
