// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use crate::error::{Result, UsageError};
use crate::semver::IncrementKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// QV - Semantic Version Release Manager
///
/// Plans, records, and publishes semantic-version releases of GitHub
/// repositories.
#[derive(Parser, Debug)]
#[command(name = "qv")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Semantic version release manager", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize qv configuration and the version ledger
    Init,

    /// Generate a version bump plan
    Plan(PlanArgs),

    /// Deploy the planned version
    Deploy(DeployArgs),

    /// Create a pull request with version info
    Pr(PrArgs),

    /// Display current version status
    Status,

    /// Validate remote tags against the local ledger
    Vet(VetArgs),
}

/// Arguments for the plan command.
#[derive(Parser, Debug, Default, Clone)]
pub struct PlanArgs {
    /// Increment the major version (reset minor and patch)
    #[arg(long)]
    pub major: bool,

    /// Increment the patch version only
    #[arg(long)]
    pub patch: bool,
}

impl PlanArgs {
    /// The requested increment kind; minor unless exactly one of the flags
    /// asks otherwise.
    pub fn increment_kind(&self) -> Result<IncrementKind> {
        match (self.major, self.patch) {
            (true, true) => Err(UsageError::ConflictingIncrements.into()),
            (true, false) => Ok(IncrementKind::Major),
            (false, true) => Ok(IncrementKind::Patch),
            (false, false) => Ok(IncrementKind::Minor),
        }
    }
}

/// Arguments for the deploy command.
#[derive(Parser, Debug, Clone)]
pub struct DeployArgs {
    /// Branch to tag
    #[arg(long, default_value = "main")]
    pub branch: String,
}

/// Arguments for the pr command.
#[derive(Parser, Debug, Clone)]
pub struct PrArgs {
    /// Base branch for the PR
    #[arg(long, default_value = "main")]
    pub base: String,
}

/// Arguments for the vet command.
#[derive(Parser, Debug, Default, Clone)]
pub struct VetArgs {
    /// Merge remote-only tags without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_flags() {
        let args = Cli::parse_from(["qv", "plan", "--major"]);
        if let Commands::Plan(plan_args) = args.command {
            assert!(plan_args.major);
            assert!(!plan_args.patch);
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_increment_kind_selection() {
        let kind = |major, patch| PlanArgs { major, patch }.increment_kind();
        assert_eq!(kind(false, false).unwrap(), IncrementKind::Minor);
        assert_eq!(kind(true, false).unwrap(), IncrementKind::Major);
        assert_eq!(kind(false, true).unwrap(), IncrementKind::Patch);
    }

    #[test]
    fn test_major_and_patch_conflict() {
        let err = PlanArgs {
            major: true,
            patch: true,
        }
        .increment_kind()
        .unwrap_err();
        assert!(err.to_string().contains("--major"));
    }

    #[test]
    fn test_parse_deploy_branch() {
        let args = Cli::parse_from(["qv", "deploy", "--branch", "release"]);
        if let Commands::Deploy(deploy_args) = args.command {
            assert_eq!(deploy_args.branch, "release");
        } else {
            panic!("Expected Deploy command");
        }
    }

    #[test]
    fn test_deploy_branch_defaults_to_main() {
        let args = Cli::parse_from(["qv", "deploy"]);
        if let Commands::Deploy(deploy_args) = args.command {
            assert_eq!(deploy_args.branch, "main");
        } else {
            panic!("Expected Deploy command");
        }
    }

    #[test]
    fn test_parse_pr_base() {
        let args = Cli::parse_from(["qv", "pr", "--base", "develop"]);
        if let Commands::Pr(pr_args) = args.command {
            assert_eq!(pr_args.base, "develop");
        } else {
            panic!("Expected Pr command");
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["qv", "--debug", "status"]);
        assert!(args.debug);
        assert!(matches!(args.command, Commands::Status));
    }

    #[test]
    fn test_parse_vet_yes() {
        let args = Cli::parse_from(["qv", "vet", "-y"]);
        if let Commands::Vet(vet_args) = args.command {
            assert!(vet_args.yes);
        } else {
            panic!("Expected Vet command");
        }
    }
}
