//! CLI output formatting for `render` and `check`.
//!
//! # Page-First Display
//!
//! Every page is shown by its navigation label first, with the written file
//! (if any) after an arrow, and one indented line per data slot saying where
//! the rendered content came from. This makes the output readable as a
//! content inventory: a `fallback` line means the API did not supply that
//! piece of the page.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! 001 Home → index.html
//!     church info: remote
//!     services: remote
//!     featured events: fallback
//! 002 About → about/index.html
//!     church info: remote
//!     staff: fallback
//! ...
//! Rendered 5 pages (6 slots remote, 2 from fallback) into dist
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 Home
//!     church info: remote
//!     ...
//! Checked 5 pages (6 slots remote, 2 from fallback)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::PageReport;
use crate::loader::{SlotReport, Source};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 Home → index.html`, or just `001 Home` when nothing was written.
fn page_header(index: usize, report: &PageReport) -> String {
    match &report.file {
        Some(file) => format!(
            "{} {} → {}",
            format_index(index),
            report.page.label(),
            file.display()
        ),
        None => format!("{} {}", format_index(index), report.page.label()),
    }
}

fn slot_line(slot: &SlotReport) -> String {
    format!("{}{}: {}", indent(1), slot.endpoint, slot.source.label())
}

/// `(6 slots remote, 2 from fallback)`
fn slot_totals(reports: &[PageReport]) -> String {
    let (remote, fallback) = reports
        .iter()
        .flat_map(|r| &r.slots)
        .fold((0, 0), |(remote, fallback), slot| match slot.source {
            Source::Remote => (remote + 1, fallback),
            Source::Fallback => (remote, fallback + 1),
        });
    format!("({} slots remote, {} from fallback)", remote, fallback)
}

fn page_lines(reports: &[PageReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        lines.push(page_header(i + 1, report));
        lines.extend(report.slots.iter().map(slot_line));
    }
    lines
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "page" } else { "pages" }
}

pub fn format_render_output(reports: &[PageReport], output_dir: &Path) -> Vec<String> {
    let mut lines = page_lines(reports);
    lines.push(format!(
        "Rendered {} {} {} into {}",
        reports.len(),
        plural(reports.len()),
        slot_totals(reports),
        output_dir.display()
    ));
    lines
}

pub fn print_render_output(reports: &[PageReport], output_dir: &Path) {
    for line in format_render_output(reports, output_dir) {
        println!("{}", line);
    }
}

pub fn format_check_output(reports: &[PageReport]) -> Vec<String> {
    let mut lines = page_lines(reports);
    lines.push(format!(
        "Checked {} {} {}",
        reports.len(),
        plural(reports.len()),
        slot_totals(reports)
    ));
    lines
}

pub fn print_check_output(reports: &[PageReport]) {
    for line in format_check_output(reports) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;
    use crate::types::Page;
    use std::path::PathBuf;

    fn slot(endpoint: Endpoint, source: Source) -> SlotReport {
        SlotReport { endpoint, source }
    }

    fn reports(written: bool) -> Vec<PageReport> {
        vec![
            PageReport {
                page: Page::Home,
                file: written.then(|| PathBuf::from("index.html")),
                slots: vec![
                    slot(Endpoint::ChurchInfo, Source::Remote),
                    slot(Endpoint::Services, Source::Remote),
                    slot(Endpoint::FeaturedEvents, Source::Fallback),
                ],
            },
            PageReport {
                page: Page::Events,
                file: written.then(|| PathBuf::from("events/index.html")),
                slots: vec![slot(Endpoint::Events, Source::Fallback)],
            },
        ]
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn render_output_lists_files_and_slots() {
        let lines = format_render_output(&reports(true), Path::new("dist"));
        assert_eq!(
            lines,
            vec![
                "001 Home → index.html",
                "    church info: remote",
                "    services: remote",
                "    featured events: fallback",
                "002 Events → events/index.html",
                "    events: fallback",
                "Rendered 2 pages (2 slots remote, 2 from fallback) into dist",
            ]
        );
    }

    #[test]
    fn check_output_omits_files() {
        let lines = format_check_output(&reports(false));
        assert_eq!(lines[0], "001 Home");
        assert_eq!(lines[4], "002 Events");
        assert_eq!(
            lines.last().unwrap(),
            "Checked 2 pages (2 slots remote, 2 from fallback)"
        );
    }

    #[test]
    fn single_page_summary_is_singular() {
        let one = &reports(false)[1..];
        assert_eq!(
            format_check_output(one).last().unwrap(),
            "Checked 1 page (0 slots remote, 1 from fallback)"
        );
    }
}
