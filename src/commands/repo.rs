//! Repository commands: converge to a desired state, list registered.

use anyhow::Result;

use crate::Context;
use crate::cli::{ListArgs, RepoApplyArgs, RepoCommand};
use crate::commands::{print_report, spinner};
use crate::config;
use crate::ui;
use karafkit::{Client, Disposition};

pub fn run(ctx: &Context, cmd: RepoCommand) -> Result<()> {
    match cmd {
        RepoCommand::Apply(args) => apply(ctx, args),
        RepoCommand::List(args) => list(ctx, args),
    }
}

fn apply(ctx: &Context, args: RepoApplyArgs) -> Result<()> {
    let connection = config::resolve(&args.connection)?;
    let client = Client::connect(&connection.client_bin, connection.options)?;
    let want = Disposition::from(args.state);

    let pb = spinner(
        ctx.quiet || args.json,
        &format!("Reconciling repository {}", args.url),
    );
    let outcome = client.reconcile_repo(&args.url, want, args.dry_run);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    print_report(ctx, &args.url, want, &outcome?, args.json)
}

fn list(ctx: &Context, args: ListArgs) -> Result<()> {
    let connection = config::resolve(&args.connection)?;
    let client = Client::connect(&connection.client_bin, connection.options)?;

    let pb = spinner(ctx.quiet || args.json, "Querying registered repositories");
    let repos = client.repositories();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let repos = repos?;

    if args.json {
        let records: Vec<_> = repos.values().collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    ui::header("Registered repositories");
    for repo in repos.values() {
        println!("  {:<30} {}", repo.name, repo.url);
    }
    println!();
    ui::info(&format!("{} repositories", repos.len()));
    Ok(())
}
