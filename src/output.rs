use chrono::{Local, TimeZone};
use console::{measure_text_width, Style};
use serde::Serialize;

use alertwatch::matcher::{AlertDetail, MatchResult};

/// Print a value as pretty JSON or use the provided human formatter
pub fn print_value<T, F>(value: &T, json_mode: bool, human_formatter: F)
where
    T: Serialize,
    F: FnOnce(&T),
{
    if json_mode {
        match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => tracing::error!(error = %e, "failed to serialize output"),
        }
    } else {
        human_formatter(value);
    }
}

/// Print rows as an aligned table. Cells may contain ANSI styling.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Calculate column widths (minimum = header length)
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let header: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad(&h.to_uppercase(), widths[i]))
        .collect();
    println!("{}", header.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", sep.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .take(widths.len())
            .map(|(i, cell)| pad(cell, widths[i]))
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

pub fn status_style(status: &str) -> Style {
    match status {
        "CRITICAL" => Style::new().red().bold(),
        "WARNING" => Style::new().yellow(),
        "OK" => Style::new().green(),
        _ => Style::new().dim(),
    }
}

/// Render an epoch-seconds timestamp in local time; 0 and out-of-range values render as "-".
pub fn format_epoch(secs: i64) -> String {
    if secs <= 0 {
        return "-".to_string();
    }
    match Local.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// One-line count summary, e.g. "CRITICAL 1  WARNING 0  OK 3".
pub fn summary_line(result: &MatchResult) -> String {
    format!(
        "{} {}  {} {}  {} {}",
        status_style("CRITICAL").apply_to("CRITICAL"),
        result.critical_count,
        status_style("WARNING").apply_to("WARNING"),
        result.warning_count,
        status_style("OK").apply_to("OK"),
        result.ok_count,
    )
}

pub fn print_details(details: &[AlertDetail]) {
    if details.is_empty() {
        println!("No alerts.");
        return;
    }
    let rows: Vec<Vec<String>> = details
        .iter()
        .map(|d| {
            vec![
                status_style(&d.status).apply_to(&d.status).to_string(),
                d.host_name.clone(),
                d.service_name.clone(),
                d.description.clone(),
                format_epoch(d.status_time),
                d.output.clone(),
            ]
        })
        .collect();
    print_table(
        &["status", "host", "service", "description", "since", "output"],
        &rows,
    );
}
