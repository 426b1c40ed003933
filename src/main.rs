//! Command-line entry point of repo-bootstrap

use std::env;
use std::process::ExitCode;

use anyhow::{anyhow, bail};
use clap::Parser as _;
use colored::Colorize as _;

use repo_bootstrap::args::Args;
use repo_bootstrap::config::Config;
use repo_bootstrap::pipeline::{self, FailurePolicy, Plan};
use repo_bootstrap::provisioner::{BaseName, RepoProvisioner};
use repo_bootstrap::transport::{HttpTransport, Token};
use repo_bootstrap::{TOKEN_VAR, note};

fn main_impl(args: Args) -> anyhow::Result<ExitCode> {
    log::debug!("Arguments passed in: {args:?}");

    // nothing may reach the network before both of these are known
    let token = env::var(TOKEN_VAR)
        .ok()
        .and_then(|token| Token::try_new(token).ok())
        .ok_or_else(|| anyhow!("{TOKEN_VAR} not in environment"))?;
    let Some(name) = args.name else {
        bail!("Repository name required, pass it with --name");
    };
    let name =
        BaseName::try_new(name).map_err(|err| anyhow!("Invalid repository name: {err}"))?;

    let config = args
        .config
        .as_deref()
        .map(Config::load)
        .transpose()?
        .unwrap_or_default();

    let policy = if args.fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::BestEffort
    };

    let transport = HttpTransport::new(&args.api_url, &token)?;
    let mut provisioner = RepoProvisioner::new(args.organization, &name, transport);

    let plan = Plan {
        description: &args.description,
        default_branch: &args.defbranch,
        config: &config,
    };

    let report = pipeline::run(&mut provisioner, &plan, policy)?;

    if report.is_success() {
        note!("Success!");
    } else {
        log::warn!(
            "{} of the steps failed, see above",
            report.failed.len().to_string().bright_red()
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose {
            "repo_bootstrap=trace"
        } else {
            "info"
        }),
    )
    .format_timestamp(None)
    .init();

    match main_impl(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {err}", "error".bright_red().bold());
            ExitCode::FAILURE
        },
    }
}
