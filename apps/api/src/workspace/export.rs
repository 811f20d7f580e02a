//! CSV export of a workspace's profiles.

use crate::workspace::models::Workspace;

const HEADER: [&str; 3] = ["Name", "Job Title", "Link"];

/// Every field is double-quoted with inner quotes doubled; rows end with `\n`
/// separators (no trailing newline). Job titles arrive HTML-escaped from
/// search metadata and are decoded here.
pub fn workspace_csv(workspace: &Workspace) -> String {
    let header = csv_row(HEADER.iter().copied());
    let rows = workspace.profiles.iter().map(|p| {
        let job_title = html_escape::decode_html_entities(&p.job_title);
        csv_row([p.name.as_str(), &*job_title, p.link.as_str()])
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `<id>_<title>.csv` with anything outside `[A-Za-z0-9_]` in the title replaced by `_`.
pub fn export_filename(workspace: &Workspace) -> String {
    let title: String = workspace
        .row
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{}_{}.csv", workspace.row.id, title)
}

fn csv_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
