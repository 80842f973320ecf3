//! Plain-text rendering of section panels

use flowfm_inspector_core::api::RecentProject;
use flowfm_inspector_core::{PanelState, SectionForm};

const HEADERS: [&str; 3] = ["Key", "Value", "Comment"];

/// Render a section panel: a header line and, unless collapsed, its
/// Key / Value / Comment table.
pub fn render_panel(form: &SectionForm, panel: &PanelState) -> String {
    let marker = if panel.is_collapsed() { '+' } else { '-' };
    let mut out = format!("[{}] {} ({})\n", marker, form.title, form.section);
    if panel.is_collapsed() {
        return out;
    }

    let rows: Vec<[String; 3]> = form
        .rows
        .iter()
        .map(|row| [row.key().to_string(), row.input.display(), row.comment.clone()])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = HEADERS.map(String::from);
    out.push_str(&render_line(&header, &widths));
    out.push_str(&render_line(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        out.push_str(&render_line(row, &widths));
    }
    out
}

fn render_line(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}

/// One line per project: file name, directory and when it was opened
pub fn render_recent_projects(projects: &[RecentProject]) -> String {
    projects
        .iter()
        .map(|p| {
            format!(
                "{}  {}  {}\n",
                p.file_name(),
                p.directory(),
                p.last_opened.format("%-d-%-m-%Y %H:%M")
            )
        })
        .collect()
}
