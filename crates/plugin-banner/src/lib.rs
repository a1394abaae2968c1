//! Banner plugin for Stagehand: prints a separator before each printed item.

use stagehand_plugin_sdk::prelude::*;

export_plugin! {
    name: "banner",
    stage: LifecycleStage::PrintItem,
    phase: Phase::Before,
    entry_point: banner_run => run,
}

/// Line printed ahead of every item.
pub const BANNER: &str = "==== item ====";

fn run() {
    println!("{BANNER}");
}
