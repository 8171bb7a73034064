//! List command - show the showcase apps grouped by stage

use crate::cli::style::{bullet, Stylize};
use anstream::println;
use vibe_funnel::catalog::Catalog;
use vibe_funnel::types::{AppEntry, AppStage};

/// Run the list command
pub fn run_list() {
    let catalog = Catalog::seeded();

    for (idx, stage) in AppStage::ALL.into_iter().enumerate() {
        if idx > 0 {
            println!();
        }
        println!("{}", stage.to_string().emphasis());
        for entry in catalog.by_stage(stage) {
            print_entry(entry);
        }
    }
}

fn print_entry(entry: &AppEntry) {
    let metric = match entry.stage {
        AppStage::Vibe => format!("{} likes", entry.likes),
        AppStage::Building => format!("{} contributors", entry.contributors.unwrap_or_default()),
        AppStage::Scaling => format!("{} users", entry.user_count.unwrap_or_default()),
    };
    println!(
        "  {} {} by {} {}",
        bullet(),
        entry.name.accent(),
        entry.author,
        format!("(vibe {}, {metric})", entry.vibe_score).muted()
    );
    println!("    {}", entry.description.muted());
}
