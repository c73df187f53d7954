//! Run command implementation.

use actionarea_core::action_bar::ActionBar;
use actionarea_core::content::StackRole;
use actionarea_core::controller::{ControllerState, PresentationController};
use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::{load_config, RunArgs};
use crate::host::{DemoHost, HostRecord};
use crate::scenario::{self, Scenario, StepFailure};

/// Outcome of a scenario run.
#[derive(Debug, Serialize)]
struct RunReport {
    scenario: String,
    steps: usize,
    completed: usize,
    failure: Option<StepFailure>,
    state: ControllerState,
    host: Vec<HostRecord>,
}

/// Run the run command.
pub async fn run(args: RunArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let config = load_config();
    let mut controller = scenario
        .controller(&config)
        .context("Failed to create controller")?;

    tracing::debug!(
        scenario = %args.scenario.display(),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let verbose = args.verbose && !args.json;
    let outcome = scenario::run(&mut controller, &scenario.steps, |index, step, controller| {
        if verbose {
            println!("  [{}] {}", index, step.op());
            for record in controller.host_mut().take_unread() {
                println!("        {}", record);
            }
        }
    });
    let failure = outcome.err();

    let report = RunReport {
        scenario: args.scenario.display().to_string(),
        steps: scenario.steps.len(),
        completed: failure.as_ref().map_or(scenario.steps.len(), |f| f.index),
        failure,
        state: controller.snapshot_state(),
        host: controller.host().records().to_vec(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &controller);
    }

    if let Some(failure) = report.failure {
        bail!(
            "Step {} ({}) failed: {} [{}]",
            failure.index,
            failure.op,
            failure.message,
            failure.rule
        );
    }

    Ok(())
}

fn print_report(report: &RunReport, controller: &PresentationController<DemoHost>) {
    let state = &report.state;

    println!();
    println!("Scenario {}", report.scenario);
    println!("{}", "─".repeat(50));
    println!(
        "  Steps:       {}/{} completed",
        report.completed, report.steps
    );
    println!("  Layout:      {}", state.layout);
    println!("  Transition:  {}", state.transition);
    println!("  Mode:        {}", state.mode);
    println!(
        "  Regions:     master {} / detail {} cells",
        state.metrics.master_width, state.metrics.detail_width
    );
    println!(
        "  Master:      {}",
        join_titles(&controller.master_stack().titles())
    );
    println!(
        "  Detail:      {}",
        join_titles(&controller.detail_stack().titles())
    );
    println!(
        "  Master bar:  {}",
        describe_bar(controller.master_bar())
    );
    println!(
        "  Detail bar:  {}",
        describe_bar(controller.detail_bar())
    );
    println!("  Overrides:   {}", state.overrides);
    if state.animating {
        println!("  Animating:   yes ({} snapshot(s))", state.snapshots);
    }

    let dispatched = controller.host().dispatched();
    if !dispatched.is_empty() {
        let bindings: Vec<String> = dispatched.iter().map(ToString::to_string).collect();
        println!("  Back:        {}", bindings.join(", "));
    }
    if let Some(top) = controller.top(StackRole::Master) {
        println!("  Top:         {} ({})", top.title(), top.id());
    }
    println!();
}

fn join_titles(titles: &[String]) -> String {
    if titles.is_empty() {
        "(empty)".to_string()
    } else {
        titles.join(" > ")
    }
}

fn describe_bar(bar: &ActionBar) -> String {
    let mut text = bar.state().to_string();
    let descriptor = bar.descriptor();
    if let Some(primary) = &descriptor.primary {
        text.push_str(&format!("  primary={}", primary.id));
    }
    let items: Vec<&str> = descriptor
        .visible_items(bar.max_items())
        .iter()
        .map(|action| action.id.as_str())
        .collect();
    if !items.is_empty() {
        text.push_str(&format!("  items={}", items.join(",")));
    }
    if !bar.is_enabled() {
        text.push_str("  (disabled)");
    }
    if bar.is_elevated() {
        text.push_str("  (elevated)");
    }
    text
}
