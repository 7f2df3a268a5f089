use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use git_promote::cli::{run_workflow, WorkflowCommand};
use git_promote::git::GitCli;
use git_promote::{config, logging, ui, WorkflowManager};

#[derive(Parser)]
#[command(
    name = "git-promote",
    version,
    about = "Promote branches through feature → Development → Nightly/Release → main"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Skip confirmation prompts")]
    yes: bool,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update a feature branch with the latest Development changes
    #[command(visible_alias = "ub")]
    UpdateFeature {
        /// Feature branch to update, e.g. feature/login
        branch: String,
    },
    /// Update Development with the latest remote changes
    #[command(visible_alias = "ud")]
    UpdateDevelopment,
    /// Promote Development to Nightly (basic version)
    #[command(visible_alias = "fmd")]
    PromoteBasic,
    /// Create a new feature branch from Development
    #[command(visible_alias = "cfb")]
    CreateFeature {
        /// Feature name; the branch is feature/<name>
        name: String,
    },
    /// Consume a feature branch into Development
    #[command(visible_alias = "cf")]
    ConsumeFeature {
        /// Feature branch to merge, e.g. feature/login
        branch: String,
    },
    /// Promote Development to Nightly with validation
    Promote,
    /// Promote Development to Release, optionally tagging it
    #[command(visible_alias = "dr")]
    Release {
        /// Version tag to create on Release, e.g. v1.4.0
        tag: Option<String>,
    },
    /// Back up Development and reset it to main (rewrites remote history)
    #[command(visible_alias = "m")]
    SyncDevelopment,
    /// Create a hotfix branch from main
    #[command(visible_alias = "ch")]
    CreateHotfix {
        /// Hotfix name; the branch is hotfix/<name>
        name: String,
    },
    /// Merge a hotfix into main and forward-port it to Development
    #[command(visible_alias = "um")]
    UpdateMain {
        /// Hotfix branch to merge, e.g. hotfix/crash
        branch: String,
    },
}

impl From<Commands> for WorkflowCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::UpdateFeature { branch } => WorkflowCommand::UpdateFeature { branch },
            Commands::UpdateDevelopment => WorkflowCommand::UpdateDevelopment,
            Commands::PromoteBasic => WorkflowCommand::PromoteBasic,
            Commands::CreateFeature { name } => WorkflowCommand::CreateFeature { name },
            Commands::ConsumeFeature { branch } => WorkflowCommand::ConsumeFeature { branch },
            Commands::Promote => WorkflowCommand::Promote,
            Commands::Release { tag } => WorkflowCommand::Release { tag },
            Commands::SyncDevelopment => WorkflowCommand::SyncDevelopment,
            Commands::CreateHotfix { name } => WorkflowCommand::CreateHotfix { name },
            Commands::UpdateMain { branch } => WorkflowCommand::UpdateMain { branch },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!();
            ui::display_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let command = WorkflowCommand::from(args.command);

    if command.is_destructive()
        && !args.yes
        && !ui::confirm_action(&format!(
            "This backs up {dev} and hard resets it to {remote}/{main}, overwriting remote {dev}. Continue?",
            dev = config.branches.development,
            remote = config.remote,
            main = config.branches.main,
        ))?
    {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    let git = GitCli::discover(".", config.git.program.clone())
        .map_err(|e| anyhow::anyhow!("Not in a git repository: {}", e))?;
    let manager = WorkflowManager::with_branches(git, config.branches, config.remote);

    let report = run_workflow(&manager, &command)?;
    tracing::debug!(workflow = report.workflow, warnings = report.warnings.len(), "workflow finished");

    println!();
    ui::display_success("Operation completed successfully!");
    Ok(())
}
