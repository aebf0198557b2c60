use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use refscope_cli::demo::build_demo_page;
use refscope_cli::{generate_snapshot, locate, set_value, PageSession, SnapshotFilter};

#[derive(Parser)]
#[command(
    name = "refscope",
    about = "Stable element references and DOM snapshots for automation drivers",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ", built ", env!("BUILD_DATE"), ")")
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the snapshot of the built-in demo page
    Snapshot {
        /// Filter: "all", "interactive", or "default"
        #[arg(long, default_value = "default")]
        filter: String,
    },
    /// Drive snapshot, locate and set_value end to end on the demo page
    Exercise,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Snapshot { filter } => run_snapshot(&filter),
        Command::Exercise => run_exercise(),
    }
}

fn run_snapshot(filter: &str) -> Result<()> {
    let filter: SnapshotFilter = filter.parse()?;
    let page = build_demo_page();
    let mut session = PageSession::new();
    let snapshot = generate_snapshot(&page.document, &mut session, filter)?;
    println!("{}", snapshot.content);
    println!(
        "\nviewport: {}x{}",
        snapshot.viewport.width, snapshot.viewport.height
    );
    Ok(())
}

fn run_exercise() -> Result<()> {
    let page = build_demo_page();
    let mut session = PageSession::new();

    let snapshot = generate_snapshot(&page.document, &mut session, SnapshotFilter::Standard)?;
    println!("--- snapshot ---\n{}\n", snapshot.content);

    // The pass above already allocated references for these controls;
    // allocate_or_reuse hands the same ids back.
    let checkbox_ref = session.registry.allocate_or_reuse(&page.subscribe_checkbox);
    let select_ref = session.registry.allocate_or_reuse(&page.color_select);
    let range_ref = session.registry.allocate_or_reuse(&page.volume_range);

    println!("--- locate {checkbox_ref} ---");
    let located = locate(&page.document, &mut session, &checkbox_ref);
    println!("{}\n", serde_json::to_string_pretty(&located)?);

    println!("--- set_value ---");
    for (reference, value) in [
        (&checkbox_ref, json!(true)),
        (&select_ref, json!("Blue")),
        (&range_ref, json!(8)),
        (&select_ref, json!("Purple")), // deliberately unmatched
    ] {
        let outcome = set_value(&page.document, &mut session, reference, &value);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    // A detached element turns its reference stale.
    let stale_ref = session.registry.allocate_or_reuse(&page.offscreen_link);
    page.offscreen_link.detach();
    println!("\n--- locate after removal ---");
    let gone = locate(&page.document, &mut session, &stale_ref);
    println!("{}", serde_json::to_string_pretty(&gone)?);

    Ok(())
}
