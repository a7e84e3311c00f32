// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::config::{self, QvConfig};
use crate::error::{GitError, QvError, Result, StorageError};
use crate::github::{parse_repo_url, GitHubClient};
use crate::ledger::{db_path, Ledger};
use crate::plan::Plan;
use crate::semver;

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};

use super::args::{Cli, Commands, DeployArgs, PlanArgs, PrArgs, VetArgs};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Init => run_init(&cli),
        Commands::Plan(args) => run_plan(&cli, args),
        Commands::Deploy(args) => run_deploy(&cli, args),
        Commands::Pr(args) => run_pr(&cli, args),
        Commands::Status => run_status(&cli),
        Commands::Vet(args) => run_vet(&cli, args),
    }
}

/// Load configuration, honoring the global --config override.
fn load_config(cli: &Cli) -> Result<QvConfig> {
    match &cli.config {
        Some(path) => QvConfig::load_from(path),
        None => QvConfig::load(),
    }
}

/// Path the configuration is read from and written to.
fn config_file(cli: &Cli) -> std::path::PathBuf {
    cli.config.clone().unwrap_or_else(config::config_path)
}

/// Open the ledger, failing when it was never initialized.
fn open_ledger(config: &QvConfig) -> Result<Ledger> {
    if !Ledger::exists(config) {
        return Err(QvError::Storage(StorageError::NotInitialized));
    }
    Ledger::open(config)
}

/// Run the init command.
fn run_init(cli: &Cli) -> Result<()> {
    tracing::debug!("Running init command");

    let theme = ColorfulTheme::default();
    let config_path = config_file(cli);

    // Confirm before touching an existing configuration
    if config_path.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Skipping config creation.");
            return Ok(());
        }
    }

    let git_url: String = Input::with_theme(&theme)
        .with_prompt("Git URL (e.g., https://github.com/user/repo)")
        .interact_text()?;

    let token = Password::with_theme(&theme)
        .with_prompt("GitHub token (leave empty to use GITHUB_TOKEN)")
        .allow_empty_password(true)
        .interact()?;

    let save_token = if token.is_empty() {
        false
    } else {
        Confirm::with_theme(&theme)
            .with_prompt("Save token to config file?")
            .default(false)
            .interact()?
    };

    let db_dir: String = Input::with_theme(&theme)
        .with_prompt("Database directory (leave empty for current directory)")
        .allow_empty(true)
        .interact_text()?;

    let mut config = QvConfig::default();
    config.version.git_url = git_url.trim().to_string();
    if save_token {
        config.version.token = Some(token);
    }
    if !db_dir.trim().is_empty() {
        config.storage.db_path = Some(std::path::PathBuf::from(db_dir.trim()));
    }

    config::store_config(&config, &config_path)?;
    println!("Created {}", config_path.display());

    // Confirm before replacing an existing ledger
    if Ledger::exists(&config) {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} already exists. Overwrite?", db_path(&config).display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Skipping database creation.");
            return Ok(());
        }
        std::fs::remove_file(db_path(&config))?;
    }

    let ledger = Ledger::open(&config)?;
    ledger.initialize()?;
    ledger.set_sync_state(&config.version.git_url)?;

    println!("Created {}", db_path(&config).display());
    println!("Initialization complete!");

    Ok(())
}

/// Run the plan command.
fn run_plan(cli: &Cli, args: PlanArgs) -> Result<()> {
    tracing::debug!("Running plan command with args: {:?}", args);

    // Flag conflicts fail before the ledger is touched
    let kind = args.increment_kind()?;

    let config = load_config(cli)?;
    let git_url = config.git_url()?;
    let ledger = open_ledger(&config)?;

    let plan = Plan::build(&ledger, git_url, kind)?;
    plan.store()?;

    println!("Plan created:");
    println!("---");
    println!("Repository: {}", plan.git_url);
    println!("Current Version: v{}", plan.current_version);
    println!("Next Version: v{}", plan.next_version);
    println!("Increment Type: {}", plan.increment_type);
    println!();
    println!("Plan saved to {}", crate::plan::PLAN_FILE);
    println!("Run 'qv deploy' to apply this plan.");

    Ok(())
}

/// Run the deploy command.
fn run_deploy(cli: &Cli, args: DeployArgs) -> Result<()> {
    tracing::debug!("Running deploy command with args: {:?}", args);

    let plan = Plan::load()?;
    let config = load_config(cli)?;
    let git_url = config.git_url()?;
    let ledger = open_ledger(&config)?;

    let (owner, repo) = parse_repo_url(git_url)?;
    println!("Deploying v{} to {}/{}...", plan.next_version, owner, repo);
    println!("---");

    let client = GitHubClient::new(&config)?;

    println!("Getting latest commit on '{}'...", args.branch);
    let outcome = crate::deploy::execute(&config, &ledger, &client, &plan, &args.branch)?;

    if let Some(warning) = &outcome.cleanup_warning {
        println!("{} {}", style("Warning:").yellow(), warning);
    }

    println!();
    println!("{}", style("Deploy successful!").green());
    println!("---");
    println!("Version: v{}", outcome.version);
    println!("Tag: {}", outcome.tag_name);
    println!("Commit: {}", outcome.sha);

    Ok(())
}

/// Run the pr command.
fn run_pr(cli: &Cli, args: PrArgs) -> Result<()> {
    tracing::debug!("Running pr command with args: {:?}", args);

    let plan = Plan::load()?;

    let current_branch = crate::git::current_branch()?;
    if current_branch == args.base {
        return Err(QvError::Git(GitError::SameBranch {
            branch: args.base.clone(),
        }));
    }

    let config = load_config(cli)?;
    let git_url = config.git_url()?;
    let (owner, repo) = parse_repo_url(git_url)?;

    let client = GitHubClient::new(&config)?;

    let title = format!("Release v{}", plan.next_version);
    let body = format!(
        "## Version Bump\n\n\
         **Current Version:** v{}\n\
         **Next Version:** v{}\n\
         **Increment Type:** {}\n\n\
         ---\n\
         *Created by qv*\n",
        plan.current_version, plan.next_version, plan.increment_type
    );

    println!("Creating PR from '{}' to '{}'...", current_branch, args.base);

    let pr = client.create_pull_request(&owner, &repo, &title, &body, &current_branch, &args.base)?;

    println!();
    println!("Pull request created:");
    println!("---");
    println!("Title: {}", pr.title);
    println!("Number: #{}", pr.number);
    println!("URL: {}", pr.url);

    Ok(())
}

/// Run the status command.
fn run_status(cli: &Cli) -> Result<()> {
    tracing::debug!("Running status command");

    let config = load_config(cli)?;
    let git_url = config.git_url()?;
    let ledger = open_ledger(&config)?;

    println!("Repository: {}", git_url);
    if let Some(state) = ledger.sync_state()? {
        if let Some(synced) = state.last_synced_at {
            println!("Last synced: {}", synced);
        }
    }
    println!("---");

    match ledger.latest_version(git_url)? {
        None => {
            println!("No versions recorded yet.");
            println!();
            println!("Next version (if plan is run):");
            println!("  Minor: v0.1.0");
            println!("  Major: v1.0.0");
            println!("  Patch: v0.0.1");
        }
        Some(latest) => {
            println!("Current Version: {}", latest.version);
            println!("Tag: {}", latest.tag_name);
            println!("Commit SHA: {}", latest.git_sha);
            println!("Created: {}", latest.created_at);

            println!();
            println!("Next version (if plan is run):");
            println!("  Minor (default): v{}", semver::increment_minor(&latest.version));
            println!("  Major (--major): v{}", semver::increment_major(&latest.version));
            println!("  Patch (--patch): v{}", semver::increment_patch(&latest.version));
        }
    }

    if Plan::exists() {
        let plan = Plan::load()?;
        println!();
        println!("---");
        println!("PENDING PLAN:");
        println!("  Current: {}", plan.current_version);
        println!("  Next: {}", plan.next_version);
        println!("  Type: {}", plan.increment_type);
        println!();
        println!("Run 'qv deploy' to apply this plan.");
    }

    Ok(())
}

/// Run the vet command.
fn run_vet(cli: &Cli, args: VetArgs) -> Result<()> {
    tracing::debug!("Running vet command with args: {:?}", args);

    let config = load_config(cli)?;
    let git_url = config.git_url()?;
    let ledger = open_ledger(&config)?;

    let (owner, repo) = parse_repo_url(git_url)?;
    println!("Repository: {}/{}", owner, repo);
    println!("---");

    let client = GitHubClient::new(&config)?;

    println!("Fetching remote tags...");
    let remote_tags = client.list_tags(&owner, &repo)?;
    let local_records = ledger.all_versions(git_url)?;

    let discrepancies = crate::vet::classify(&remote_tags, &local_records);

    println!();
    println!("Remote tags: {}", remote_tags.len());
    println!("Local versions: {}", local_records.len());
    println!();

    if discrepancies.in_sync() {
        println!("{} Ledger is in sync with remote.", style("✓").green());
        return Ok(());
    }

    if !discrepancies.remote_only.is_empty() {
        println!(
            "Tags on remote but not in local ledger ({}):",
            discrepancies.remote_only.len()
        );
        for tag in &discrepancies.remote_only {
            println!("  {} {}", style("+").green(), tag);
        }
        println!();
    }

    if !discrepancies.local_only.is_empty() {
        println!(
            "Tags in local ledger but not on remote ({}):",
            discrepancies.local_only.len()
        );
        for tag in &discrepancies.local_only {
            println!("  {} {}", style("-").red(), tag);
        }
        println!();
    }

    if !discrepancies.mismatched.is_empty() {
        println!(
            "Tags with mismatched SHAs ({}):",
            discrepancies.mismatched.len()
        );
        for tag in &discrepancies.mismatched {
            println!("  {} {}", style("!").yellow(), tag);
        }
        println!();
    }

    if !discrepancies.remote_only.is_empty() {
        let merge = if args.yes {
            true
        } else if console::user_attended() {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Sync remote tags to local ledger?")
                .default(false)
                .interact()?
        } else {
            println!("Not a terminal; re-run with --yes to sync remote tags.");
            false
        };

        if merge {
            let outcomes = crate::vet::merge_remote_only(
                &ledger,
                git_url,
                &remote_tags,
                &discrepancies.remote_only,
            );

            for outcome in &outcomes {
                match &outcome.result {
                    Ok(()) => println!("  Added {}", outcome.tag_name),
                    Err(e) => println!("  Failed to add {}: {}", outcome.tag_name, e),
                }
            }

            ledger.set_sync_state(git_url)?;
            println!("Sync complete.");
        }
    }

    Ok(())
}
