use anyhow::Result;
use marathonkit::transport::http::HttpTransport;
use marathonkit::{
    GroupDefinition, MarathonSync, SyncOptions, SyncPlan, SyncSummary, Transport,
    TransportConfig,
};
use std::time::Duration;

use crate::Context;
use crate::cli::Cli;
use crate::config;
use crate::ui;

pub fn run(ctx: &Context, args: &Cli) -> Result<()> {
    let groups = config::load_config_groups(&args.config)?;
    if !ctx.quiet {
        ui::info(&format!(
            "Loaded {} from {}",
            ui::plural(groups.len(), "group definition", "group definitions"),
            args.config.display()
        ));
    }

    let transport = HttpTransport::new(args.marathon.clone(), transport_config(ctx, args));
    let options = SyncOptions {
        jobs: usize::from(args.jobs),
        dry_run: args.dry_run,
    };

    reconcile(ctx, transport, groups, options)
}

fn transport_config(ctx: &Context, args: &Cli) -> TransportConfig {
    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    TransportConfig::default()
        .timeout(timeout)
        .log_requests(ctx.verbose >= 2)
}

fn reconcile<T: Transport>(
    ctx: &Context,
    transport: T,
    groups: Vec<GroupDefinition>,
    options: SyncOptions,
) -> Result<()> {
    let dry_run = options.dry_run;
    let engine = MarathonSync::new(transport, groups).with_options(options);

    if dry_run {
        let plan = engine.plan()?;
        print_plan(&plan, engine.groups());
        return Ok(());
    }

    let summary = engine.run()?;
    if !ctx.quiet {
        print_summary(&summary);
    }
    Ok(())
}

fn print_plan(plan: &SyncPlan, groups: &[GroupDefinition]) {
    ui::kv("Apps in config", &plan.known_apps.len().to_string());
    ui::kv("Apps in Marathon", &plan.present_apps.len().to_string());

    ui::section("Apps to delete");
    if plan.has_deletions() {
        for app_id in &plan.unknown_apps {
            ui::dim(app_id);
        }
    } else {
        ui::dim("none");
    }

    ui::section("Groups to sync");
    for group in groups {
        ui::dim(&group.canonical_id());
    }

    println!();
    ui::warn("Dry run, nothing was changed");
}

fn print_summary(summary: &SyncSummary) {
    ui::success(&format!(
        "Deleted {}, synced {}",
        ui::plural(summary.deleted, "unknown app", "unknown apps"),
        ui::plural(summary.synced, "group", "groups")
    ));
}
