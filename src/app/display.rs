//! Table rendering for command output

use crate::app::commands::DemoReport;
use crate::queue::{Priority, QueueStats};
use crate::runner::{CommandOutput, CommandSpec, RunnerResult};
use crate::text::{is_ascii_punctuation, is_cjk_char, is_cjk_punctuation, is_digit};
use prettytable::format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR;
use prettytable::{row, Table};
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_BORDER_LINE_SEPARATOR);
    table
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "-"
    }
}

pub fn queue_stats_table(stats: &QueueStats) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Statistic", "Value"]);
    table.add_row(row!["capacity", stats.capacity]);
    table.add_row(row!["queued", stats.len]);
    table.add_row(row!["unfinished", stats.unfinished]);
    table.add_row(row!["accepted", stats.accepted]);
    table.add_row(row!["rejected", stats.rejected]);
    table.add_row(row!["closed", stats.closed]);
    table
}

/// One row per consumer with its delivery count per priority
pub fn demo_table(report: &DemoReport) -> Table {
    let mut table = new_table();
    let mut titles = row!["Consumer"];
    for priority in Priority::iter() {
        titles.add_cell(prettytable::Cell::new(priority.as_ref()));
    }
    titles.add_cell(prettytable::Cell::new("total"));
    table.set_titles(titles);

    for consumer in &report.consumers {
        let mut row = row![consumer.consumer_id];
        for priority in Priority::iter() {
            row.add_cell(prettytable::Cell::new(
                &consumer.count_for(priority).to_string(),
            ));
        }
        row.add_cell(prettytable::Cell::new(&consumer.received.len().to_string()));
        table.add_row(row);
    }
    table
}

pub fn run_results_table(specs: &[CommandSpec], results: &[RunnerResult<CommandOutput>]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["#", "Command", "Status", "Time", "Output"]);

    for (index, (spec, result)) in specs.iter().zip(results).enumerate() {
        match result {
            Ok(output) => {
                let status = match output.status_code {
                    Some(code) => code.to_string(),
                    None => "signal".to_string(),
                };
                let first_line = output.stdout.lines().next().unwrap_or("");
                table.add_row(row![
                    index,
                    spec,
                    status,
                    format!("{:.2}s", output.elapsed.as_secs_f64()),
                    first_line
                ]);
            }
            Err(e) => {
                table.add_row(row![index, spec, "error", "-", e]);
            }
        }
    }
    table
}

pub fn classify_table(text: &str) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Char", "Code", "CJK", "CJK punct", "ASCII punct", "Digit"]);

    for c in text.chars() {
        table.add_row(row![
            c.escape_debug(),
            format!("U+{:04X}", c as u32),
            yes_no(is_cjk_char(c)),
            yes_no(is_cjk_punctuation(c)),
            yes_no(is_ascii_punctuation(c)),
            yes_no(is_digit(c))
        ]);
    }
    table
}
