use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for trilab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests, doc and the headless smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Load the sample vertex file and simulate both exercises headless
    Smoke,
}

/// A cargo invocation and the label printed before it runs.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
}

const FMT: Step = Step {
    label: "cargo fmt --check",
    args: &["fmt", "--all", "--", "--check"],
};
const CLIPPY: Step = Step {
    label: "cargo clippy",
    args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
};
const TEST: Step = Step {
    label: "cargo test",
    args: &["test", "--workspace"],
};
const DOC: Step = Step {
    label: "cargo doc",
    args: &["doc", "--workspace", "--no-deps"],
};
const BUILD: Step = Step {
    label: "cargo build",
    args: &["build", "--workspace"],
};
const CHECK_VERTICES: Step = Step {
    label: "trilab-cli check-vertices",
    args: &[
        "run", "-q", "-p", "trilab-cli", "--", "check-vertices", "assets/triangle.txt",
    ],
};
const SIMULATE_ROTATE: Step = Step {
    label: "trilab-cli simulate rotate",
    args: &[
        "run", "-q", "-p", "trilab-cli", "--", "simulate", "--exercise", "rotate", "--script",
        "w*3 @20:10*5 s esc",
    ],
};
const SIMULATE_TINT: Step = Step {
    label: "trilab-cli simulate tint",
    args: &[
        "run",
        "-q",
        "-p",
        "trilab-cli",
        "--",
        "simulate",
        "--exercise",
        "tint",
        "--vertices",
        "assets/triangle.txt",
        "--script",
        "r*20 d*4 v x m",
    ],
};

impl Commands {
    fn steps(self) -> &'static [Step] {
        match self {
            Commands::Check => &[
                FMT,
                CLIPPY,
                TEST,
                DOC,
                CHECK_VERTICES,
                SIMULATE_ROTATE,
                SIMULATE_TINT,
            ],
            Commands::Fmt => &[FMT],
            Commands::Clippy => &[CLIPPY],
            Commands::Test => &[TEST],
            Commands::Doc => &[DOC],
            Commands::Build => &[BUILD],
            Commands::Smoke => &[CHECK_VERTICES, SIMULATE_ROTATE, SIMULATE_TINT],
        }
    }
}

fn run(step: &Step) -> Result<()> {
    println!("==> Running {}", step.label);
    let status = Command::new("cargo").args(step.args).status()?;
    if !status.success() {
        anyhow::bail!("{} failed", step.label);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    for step in cli.command.steps() {
        run(step)?;
    }
    Ok(())
}
