//! HTML escaping and the standalone HTML review report.
//!
//! Summary and flag text come from an external model and must never be
//! interpreted as markup: every interpolated string goes through
//! [`escape_html`].

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::review::{NormalizedResult, ReviewReport};

/// Escape `&`, `<`, `>` and `"` for interpolation into HTML text or
/// attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
.summary{white-space:pre-wrap}\
.meta{color:#666;font-size:.9em}\
.note{font-style:italic}\
pre{background:#f4f4f4;padding:1rem;overflow:auto}";

/// Render a self-contained HTML report for an export.
pub fn html_report(
    result: &NormalizedResult,
    source_name: Option<&str>,
    generated_at: DateTime<Local>,
) -> String {
    let title = match source_name {
        Some(name) => format!("Review of {}", name),
        None => "Review".to_string(),
    };

    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&title));
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&title));
    let _ = writeln!(
        html,
        "<p class=\"meta\">Generated {}</p>",
        escape_html(&generated_at.format("%Y-%m-%d %H:%M").to_string())
    );

    match result {
        NormalizedResult::Report(report) => write_report(&mut html, report),
        NormalizedResult::Opaque(value) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            let _ = writeln!(html, "<h2>Raw response</h2>");
            let _ = writeln!(html, "<pre>{}</pre>", escape_html(&pretty));
        }
    }

    let _ = writeln!(html, "</body>\n</html>");
    html
}

fn write_report(html: &mut String, report: &ReviewReport) {
    let _ = writeln!(html, "<h2>Summary</h2>");
    let _ = writeln!(
        html,
        "<p class=\"summary\">{}</p>",
        escape_html(&report.summary)
    );

    let _ = writeln!(html, "<h2>Flags</h2>");
    if report.flags.is_empty() {
        let _ = writeln!(html, "<p class=\"meta\">No flags raised.</p>");
    } else {
        let _ = writeln!(html, "<ol>");
        for flag in &report.flags {
            let _ = write!(
                html,
                "<li><strong>{}</strong><div class=\"meta\">{}</div>",
                escape_html(flag.issue_or_placeholder()),
                escape_html(&flag.meta_line())
            );
            if let Some(note) = &flag.note {
                let _ = write!(html, "<div class=\"note\">{}</div>", escape_html(note));
            }
            let _ = writeln!(html, "</li>");
        }
        let _ = writeln!(html, "</ol>");
    }

    let pairs = report.meta_pairs();
    if !pairs.is_empty() {
        let _ = writeln!(html, "<h2>Details</h2>\n<ul class=\"meta\">");
        for (key, value) in pairs {
            let _ = writeln!(html, "<li>{}: {}</li>", key, escape_html(&value));
        }
        let _ = writeln!(html, "</ul>");
    }
}
