//! Terminal rendering for predictions.

use colored::{ColoredString, Colorize};
use orchestrator::{PredictionResult, PrepLevel};
use planner::OperatingContext;

const BAR_WIDTH: f64 = 40.0;

/// Color-coded prep level, padded to `width` before coloring
fn prep_badge(level: PrepLevel, width: usize) -> ColoredString {
    let text = format!("{:<width$}", level.as_str(), width = width);
    match level {
        PrepLevel::High => text.red().bold(),
        PrepLevel::Medium => text.yellow().bold(),
        PrepLevel::Low => text.green().bold(),
    }
}

fn context_line(context: &OperatingContext) -> String {
    let mut line = format!(
        "{} {} | weather {} | queue {} | counters {} | staff {}",
        context.day_of_week,
        context.time_slot,
        context.weather,
        context.queue_length,
        context.active_counters,
        context.staff_count
    );
    if context.is_exam_week {
        line.push_str(" | exam week");
    }
    if context.special_event_flag {
        line.push_str(" | special event");
    }
    line
}

pub fn print_metrics(result: &PredictionResult) {
    println!("{}Expected demand: {:.1} plates", "• ".cyan(), result.demand);
    println!("{}Expected wait: {:.1} min", "• ".cyan(), result.wait_time);
    println!("{}Prep level: {}", "• ".cyan(), prep_badge(result.prep_level, 0));
}

pub fn print_result(context: &OperatingContext, result: &PredictionResult) {
    println!("{}", format!("Recommendation for {}", result.item).bold().blue());
    println!("{}", context_line(context).dimmed());
    print_metrics(result);
}

pub fn print_overview(context: &OperatingContext, results: &[PredictionResult]) {
    println!("{}", "Menu overview".bold().blue());
    println!("{}", context_line(context).dimmed());
    println!();

    let name_width = results
        .iter()
        .map(|r| r.item.as_str().len())
        .max()
        .unwrap_or(0)
        .max("Item".len());

    println!(
        "{:<name_width$}  {:>8}  {:>9}  {}",
        "Item",
        "Demand",
        "Wait min",
        "Prep",
        name_width = name_width
    );
    for result in results {
        println!(
            "{:<name_width$}  {:>8.1}  {:>9.1}  {}",
            result.item.as_str(),
            result.demand,
            result.wait_time,
            prep_badge(result.prep_level, 6),
            name_width = name_width
        );
    }

    println!();
    println!("{}", "Demand by item".bold());
    let max_demand = results.iter().map(|r| r.demand).fold(0.0_f64, f64::max);
    for result in results {
        println!(
            "{:<name_width$}  {} {:.1}",
            result.item.as_str(),
            bar(result.demand, max_demand).cyan(),
            result.demand,
            name_width = name_width
        );
    }
}

/// Bar proportional to `value / max`; non-positive values draw nothing
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH).round() as usize;
    "█".repeat(cells)
}
