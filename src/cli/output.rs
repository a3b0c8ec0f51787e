//! Output formatting for the result table.
//!
//! Rendering is a pure projection of the [`ResultTable`]; nothing here
//! touches the store.

use crate::cli::args::{OutputFormat, SearchBenchArgs};
use crate::suite::ResultTable;

const LABEL_HEADER: &str = "Index Structure";
const OBJECT_HEADER: &str = "Object Size(b)";
const INDEX_HEADER: &str = "Index Size(mb)";

/// Render the table in the requested format.
pub fn render(table: &ResultTable, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(table),
        OutputFormat::Html => render_html(table),
        OutputFormat::Markdown => render_markdown(table),
    }
}

/// Print the consolidated header followed by the rendered table.
pub fn print_report(args: &SearchBenchArgs, table: &ResultTable) {
    println!();
    println!(
        "Consolidated Results - Num Keys:{}, Num Fields:{}, Text Field Size:{}, Numeric Field Size:{}",
        args.nkeys, args.nfields, args.textsize, args.numericsize
    );
    println!("{}", render(table, args.format));
}

fn render_text(table: &ResultTable) -> String {
    let label_width = table
        .rows()
        .iter()
        .map(|(label, _)| label.len())
        .chain([LABEL_HEADER.len()])
        .max()
        .unwrap_or(LABEL_HEADER.len());

    let mut out = String::new();
    out.push_str(&format!(
        "{LABEL_HEADER:<label_width$}  {OBJECT_HEADER:>14}  {INDEX_HEADER:>14}\n"
    ));

    for (label, stats) in table.rows() {
        let object = stats.object_size_bytes.to_string();
        let index = format!("{:.2}", stats.index_size_mb);
        out.push_str(&format!(
            "{label:<label_width$}  {object:>14}  {index:>14}\n"
        ));
    }

    out
}

fn render_markdown(table: &ResultTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "| {LABEL_HEADER} | {OBJECT_HEADER} | {INDEX_HEADER} |\n"
    ));
    out.push_str("|:---|---:|---:|\n");

    for (label, stats) in table.rows() {
        out.push_str(&format!(
            "| {label} | {} | {:.2} |\n",
            stats.object_size_bytes, stats.index_size_mb
        ));
    }

    out
}

fn render_html(table: &ResultTable) -> String {
    let mut out = String::new();
    out.push_str("<table>\n");
    out.push_str("  <thead>\n");
    out.push_str(&format!(
        "    <tr><th>{LABEL_HEADER}</th><th>{OBJECT_HEADER}</th><th>{INDEX_HEADER}</th></tr>\n"
    ));
    out.push_str("  </thead>\n");
    out.push_str("  <tbody>\n");

    for (label, stats) in table.rows() {
        out.push_str(&format!(
            "    <tr><td>{label}</td><td>{}</td><td>{:.2}</td></tr>\n",
            stats.object_size_bytes, stats.index_size_mb
        ));
    }

    out.push_str("  </tbody>\n");
    out.push_str("</table>\n");
    out
}
