//! Zero-FAF-Builder CLI.
//!
//! Terminal front-end for the onboarding flows: print or copy the
//! `faf-cli` setup command, print the deploy deep-link, validate a GitHub
//! repository URL, and run the simulated "inject FAF" submission.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod clipboard;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use faf_builder_core::clipboard::{ClipboardOutcome, CopyHelper};
use faf_builder_core::config::SiteConfig;
use faf_builder_core::intake::{IntakeSession, SUBMITTING_LABEL};
use faf_builder_core::links;
use faf_builder_core::validate::{RepoRef, ValidationResult, clone_commands, validate};

use crate::clipboard::CommandClipboard;

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const ORANGE: &str = "\x1b[38;5;214m";

const BANNER_SMALL: &str = "● Zero-FAF-Builder";

// ── CLI structure ────────────────────────────────────────────────────

/// Zero-FAF-Builder — zero faff from day zero.
#[derive(Parser)]
#[command(
    name = "zero-faf",
    version,
    about = "Zero-FAF-Builder CLI — set up project.faf locally, deploy a fresh template, or bring a GitHub repo",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         FAF_MCP_SERVER_URL      MCP server embedded in the setup command\n  \
         FAF_TEMPLATE_REPO_URL   Template repository for the deploy link\n  \
         FAF_SUBMIT_DELAY_MS     Simulated submission duration (default: 1500)\n\n\
         {DIM}Examples:{RESET}\n  \
         zero-faf command --copy\n  \
         zero-faf deploy-link\n  \
         zero-faf validate https://github.com/vercel/next.js\n  \
         zero-faf submit https://github.com/vercel/next.js"
    ),
)]
struct Cli {
    /// MCP server URL embedded in the setup command.
    #[arg(long, env = "FAF_MCP_SERVER_URL", global = true)]
    mcp_server_url: Option<String>,

    /// Template repository URL used by the deploy link.
    #[arg(long, env = "FAF_TEMPLATE_REPO_URL", global = true)]
    template_repo_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the command that adds project.faf to a local folder.
    Command {
        /// Also copy the command to the system clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Print the deploy link that clones the starter template.
    DeployLink,
    /// Check whether a URL is accepted as a GitHub repository URL.
    Validate {
        /// Candidate URL.
        url: String,
    },
    /// Validate a GitHub URL and run the FAF injection.
    Submit {
        /// GitHub repository URL.
        url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SiteConfig::from_env();
    if let Some(url) = cli.mcp_server_url {
        config = config.with_mcp_server_url(url);
    }
    if let Some(url) = cli.template_repo_url {
        config = config.with_template_repo_url(url);
    }

    match run(&config, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &SiteConfig, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Command { copy } => cmd_command(config, copy).await,
        Commands::DeployLink => {
            println!("{}", links::deploy_link(config));
            Ok(())
        }
        Commands::Validate { url } => cmd_validate(&url),
        Commands::Submit { url } => cmd_submit(config, url).await,
    }
}

// ── Output helpers ───────────────────────────────────────────────────

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn print_clone_preview(result: &ValidationResult) {
    let ValidationResult::Valid(url) = result else {
        return;
    };
    if let Some(RepoRef { owner, name }) = RepoRef::from_url(url) {
        println!("  {DIM}repository{RESET}  {owner}/{name}");
    }
    println!();
    for line in clone_commands(url) {
        println!("  {ORANGE}${RESET} {line}");
    }
}

// ── Commands ─────────────────────────────────────────────────────────

async fn cmd_command(config: &SiteConfig, copy: bool) -> Result<()> {
    let command = links::setup_command(config);
    println!("{command}");
    if !copy {
        return Ok(());
    }

    let helper = CopyHelper::new(Arc::new(CommandClipboard), command, config.copy_feedback);
    match helper.copy().await {
        ClipboardOutcome::Copied => success("Command copied to clipboard!"),
        ClipboardOutcome::Denied => warning("Clipboard access was refused; copy the command above manually."),
        ClipboardOutcome::Unsupported => {
            warning("No clipboard tool found (pbcopy, wl-copy, xclip, clip); copy the command above manually.");
        }
    }
    Ok(())
}

fn cmd_validate(url: &str) -> Result<()> {
    let result = validate(url);
    if let Some(message) = result.message() {
        bail!("{message}");
    }
    success("Valid GitHub URL");
    print_clone_preview(&result);
    Ok(())
}

async fn cmd_submit(config: &SiteConfig, url: String) -> Result<()> {
    let session = IntakeSession::new(config.submit_delay);
    let accepted = session.submit_input(url).await?;

    println!();
    println!("  {BANNER_SMALL} {DIM}{SUBMITTING_LABEL}{RESET}");

    tokio::select! {
        () = session.wait() => {}
        _ = tokio::signal::ctrl_c() => {
            session.close().await;
            println!();
            bail!("submission cancelled");
        }
    }

    println!();
    success(&format!("{accepted} is ready with project.faf"));
    println!();
    Ok(())
}
