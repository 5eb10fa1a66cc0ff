//! Feature commands: converge to a desired state, list installed.

use anyhow::Result;
use colored::Colorize;

use crate::Context;
use crate::cli::{FeatureApplyArgs, FeatureCommand, ListArgs};
use crate::commands::{print_report, spinner};
use crate::config;
use crate::ui;
use karafkit::{Client, Disposition, FEATURE_STATE_UNINSTALLED};

pub fn run(ctx: &Context, cmd: FeatureCommand) -> Result<()> {
    match cmd {
        FeatureCommand::Apply(args) => apply(ctx, args),
        FeatureCommand::List(args) => list(ctx, args),
    }
}

fn apply(ctx: &Context, args: FeatureApplyArgs) -> Result<()> {
    let connection = config::resolve(&args.connection)?;
    let client = Client::connect(&connection.client_bin, connection.options)?;
    let want = Disposition::from(args.state);

    let resource = match &args.version {
        Some(version) => format!("{}/{}", args.name, version),
        None => args.name.clone(),
    };

    let pb = spinner(
        ctx.quiet || args.json,
        &format!("Reconciling feature {}", resource),
    );
    let outcome =
        client.reconcile_feature(&args.name, args.version.as_deref(), want, args.dry_run);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    print_report(ctx, &resource, want, &outcome?, args.json)
}

fn list(ctx: &Context, args: ListArgs) -> Result<()> {
    let connection = config::resolve(&args.connection)?;
    let client = Client::connect(&connection.client_bin, connection.options)?;

    let pb = spinner(ctx.quiet || args.json, "Querying installed features");
    let features = client.features();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let features = features?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&features)?);
        return Ok(());
    }

    ui::header("Installed features");
    for feature in &features {
        let state = if feature.state == FEATURE_STATE_UNINSTALLED {
            feature.state.red()
        } else {
            feature.state.green()
        };
        println!("  {:<40} {:<20} {}", feature.name, feature.version, state);
    }
    println!();
    ui::info(&format!("{} features", features.len()));
    Ok(())
}
