//! Timestamp plugin for Stagehand.
//!
//! Runs after the host's print step: reports whether the current second is
//! even or odd, then lists the files below the working directory.

use chrono::{Local, Timelike};

use stagehand_plugin::discovery;
use stagehand_plugin_sdk::prelude::*;

export_plugin! {
    name: "timestamp",
    stage: LifecycleStage::DoPrint,
    phase: Phase::After,
    entry_point: timestamp_run => run,
}

/// Marker printed for a given second of the minute.
pub fn parity_marker(second: u32) -> &'static str {
    if second % 2 == 0 { "even" } else { "odd" }
}

fn run() {
    let second = Local::now().second();
    println!("[timestamp] second {second} is {}", parity_marker(second));

    for file in discovery::find_files(".") {
        println!("[timestamp] {}", file.display());
    }
}
