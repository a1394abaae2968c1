//! Integration tests for lifecycle dispatch.

mod helpers;

use stagehand_plugin::{DispatchSummary, LifecycleStage, Phase};

use helpers::{Entry, Fixture};

#[test]
fn test_single_plugin_runs_only_for_its_phase() {
    let harness = Fixture::new()
        .plugin("c.mod", LifecycleStage::DoPrint, Phase::Before, "F")
        .into_loader();
    let dispatcher = harness.dispatcher(&["a.mod", "b.txt", "c.mod"]);

    let summary = dispatcher.dispatch(LifecycleStage::DoPrint, Phase::Before);
    assert_eq!(harness.calls(), vec!["F"]);
    assert_eq!(
        summary,
        DispatchSummary {
            matched: 1,
            invoked: 1,
            failed: 0
        }
    );

    let summary = dispatcher.dispatch(LifecycleStage::DoPrint, Phase::After);
    assert_eq!(harness.calls(), vec!["F"]);
    assert_eq!(summary, DispatchSummary::default());
}

#[test]
fn test_shared_key_runs_all_in_load_order() {
    let harness = Fixture::new()
        .plugin("one.mod", LifecycleStage::DoPrint, Phase::After, "F1")
        .plugin("two.mod", LifecycleStage::DoPrint, Phase::After, "F2")
        .into_loader();

    let dispatcher = harness.dispatcher(&["one.mod", "two.mod"]);
    dispatcher.dispatch(LifecycleStage::DoPrint, Phase::After);
    assert_eq!(harness.calls(), vec!["F1", "F2"]);

    harness.clear_calls();
    let reversed = harness.dispatcher(&["two.mod", "one.mod"]);
    reversed.dispatch(LifecycleStage::DoPrint, Phase::After);
    assert_eq!(harness.calls(), vec!["F2", "F1"]);
}

#[test]
fn test_dispatch_selects_exact_key() {
    let harness = Fixture::new()
        .plugin("t_before.mod", LifecycleStage::GetTime, Phase::Before, "time_before")
        .plugin("t_after.mod", LifecycleStage::GetTime, Phase::After, "time_after")
        .plugin("p_before.mod", LifecycleStage::DoPrint, Phase::Before, "print_before")
        .plugin("i_after.mod", LifecycleStage::PrintItem, Phase::After, "item_after")
        .into_loader();
    let dispatcher = harness.dispatcher(&[
        "t_before.mod",
        "t_after.mod",
        "p_before.mod",
        "i_after.mod",
    ]);

    let expected = [
        (LifecycleStage::GetTime, Phase::Before, vec!["time_before"]),
        (LifecycleStage::GetTime, Phase::After, vec!["time_after"]),
        (LifecycleStage::DoPrint, Phase::Before, vec!["print_before"]),
        (LifecycleStage::DoPrint, Phase::After, vec![]),
        (LifecycleStage::PrintItem, Phase::Before, vec![]),
        (LifecycleStage::PrintItem, Phase::After, vec!["item_after"]),
    ];

    for (stage, phase, calls) in expected {
        harness.clear_calls();
        dispatcher.dispatch(stage, phase);
        assert_eq!(harness.calls(), calls, "{stage}:{phase}");
    }
}

#[test]
fn test_dispatch_is_repeatable() {
    let harness = Fixture::new()
        .plugin("a.mod", LifecycleStage::PrintItem, Phase::Before, "A")
        .plugin("b.mod", LifecycleStage::PrintItem, Phase::Before, "B")
        .into_loader();
    let dispatcher = harness.dispatcher(&["a.mod", "b.mod"]);

    let first = dispatcher.dispatch(LifecycleStage::PrintItem, Phase::Before);
    let second = dispatcher.dispatch(LifecycleStage::PrintItem, Phase::Before);

    assert_eq!(first, second);
    assert_eq!(harness.calls(), vec!["A", "B", "A", "B"]);
}

#[test]
fn test_missing_entry_point_does_not_block_siblings() {
    let harness = Fixture::new()
        .plugin("one.mod", LifecycleStage::DoPrint, Phase::After, "F1")
        .missing_entry("broken.mod", LifecycleStage::DoPrint, Phase::After, "Gone")
        .plugin("two.mod", LifecycleStage::DoPrint, Phase::After, "F2")
        .plugin("three.mod", LifecycleStage::DoPrint, Phase::After, "F3")
        .into_loader();
    let dispatcher = harness.dispatcher(&["one.mod", "broken.mod", "two.mod", "three.mod"]);

    let summary = dispatcher.dispatch(LifecycleStage::DoPrint, Phase::After);

    assert_eq!(harness.calls(), vec!["F1", "F2", "F3"]);
    assert_eq!(
        summary,
        DispatchSummary {
            matched: 4,
            invoked: 3,
            failed: 1
        }
    );

    // Skipped for that call only; the next call tries again.
    let again = dispatcher.dispatch(LifecycleStage::DoPrint, Phase::After);
    assert_eq!(again, summary);
}

#[test]
fn test_non_callable_entry_point_is_skipped() {
    let harness = Fixture::new()
        .module(
            "data.mod",
            LifecycleStage::GetTime,
            Phase::Before,
            "not_a_fn",
            Some(Entry::NotCallable),
        )
        .plugin("ok.mod", LifecycleStage::GetTime, Phase::Before, "ok")
        .into_loader();
    let dispatcher = harness.dispatcher(&["data.mod", "ok.mod"]);

    let summary = dispatcher.before(LifecycleStage::GetTime);

    assert_eq!(harness.calls(), vec!["ok"]);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.invoked, 1);
}

#[test]
fn test_panicking_plugin_is_isolated() {
    let harness = Fixture::new()
        .module(
            "panics.mod",
            LifecycleStage::PrintItem,
            Phase::After,
            "explode",
            Some(Entry::Panics),
        )
        .plugin("after.mod", LifecycleStage::PrintItem, Phase::After, "survivor")
        .into_loader();
    let dispatcher = harness.dispatcher(&["panics.mod", "after.mod"]);

    let summary = dispatcher.after(LifecycleStage::PrintItem);

    assert_eq!(harness.calls(), vec!["explode", "survivor"]);
    assert_eq!(
        summary,
        DispatchSummary {
            matched: 2,
            invoked: 1,
            failed: 1
        }
    );
}

#[test]
fn test_around_brackets_host_work() {
    let harness = Fixture::new()
        .plugin("after.mod", LifecycleStage::DoPrint, Phase::After, "after")
        .plugin("before.mod", LifecycleStage::DoPrint, Phase::Before, "before")
        .plugin("inner.mod", LifecycleStage::PrintItem, Phase::Before, "inner")
        .into_loader();
    let dispatcher = harness.dispatcher(&["after.mod", "before.mod", "inner.mod"]);

    let output = dispatcher.around(LifecycleStage::DoPrint, || {
        dispatcher.around(LifecycleStage::PrintItem, || harness.mark("work"));
        "printed"
    });

    assert_eq!(output, "printed");
    assert_eq!(harness.calls(), vec!["before", "inner", "work", "after"]);
}
