//! Output rendering for collected milestone items.

use shipnotes_github::{Issue, Milestone};

/// Renders a markdown changelog section for `milestone`.
///
/// Pull requests and issues are listed separately, each in the order they
/// were collected. Empty groups are left out.
pub fn render_markdown(milestone: &Milestone, items: &[Issue]) -> String {
    let mut out = format!("## {}\n", milestone.title);

    if items.is_empty() {
        out.push_str("\n_No matching items._\n");
        return out;
    }

    let (pulls, issues): (Vec<&Issue>, Vec<&Issue>) =
        items.iter().partition(|item| item.is_pull_request());

    for (heading, group) in [("Pull requests", pulls), ("Issues", issues)] {
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {heading}\n\n"));
        for item in group {
            out.push_str(&format!("- {} (#{})\n", item.title, item.number));
        }
    }

    out
}

/// Renders the collected records as a pretty-printed JSON array.
pub fn render_json(items: &[Issue]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}
