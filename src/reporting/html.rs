//! Static HTML rendering for the profiling report.
//!
//! The report is a single self-contained document: inline CSS, no external
//! assets, no scripts. Rendering is a pure string function so it can be
//! tested without touching the filesystem.

use crate::types::{ColumnProfile, DatasetProfile};

/// Render the full profiling report document.
pub(crate) fn render_profile_report(profile: &DatasetProfile, generated_at: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Profiling Report</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>Profiling Report</h1>
        <p class="meta">Generated at {generated_at} &middot; {rows} rows &times; {cols} columns</p>
        {columns_table}
        {correlations_table}
    </div>
</body>
</html>"#,
        css = inline_css(),
        generated_at = escape_html(generated_at),
        rows = profile.shape.0,
        cols = profile.shape.1,
        columns_table = render_columns_table(&profile.column_profiles),
        correlations_table = render_correlations_table(profile),
    )
}

fn render_columns_table(columns: &[ColumnProfile]) -> String {
    let mut rows = String::new();
    for col in columns {
        let stats = render_characteristics(col);
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&col.name),
            escape_html(&col.dtype),
            escape_html(&col.inferred_type),
            col.null_count,
            col.null_percentage,
            col.unique_count,
            stats,
        ));
    }

    format!(
        r#"<h2>Columns</h2>
<table>
<thead><tr><th>Column</th><th>Dtype</th><th>Type</th><th>Missing</th><th>Missing %</th><th>Unique</th><th>Distribution</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    )
}

fn render_characteristics(col: &ColumnProfile) -> String {
    let mut parts = Vec::new();
    for key in ["mean", "std", "min", "max", "skewness"] {
        if let Some(value) = col.characteristics.get(key).and_then(|v| v.as_f64()) {
            parts.push(format!("{} = {:.2}", key, value));
        }
    }
    if let Some(tokens) = col.characteristics.get("distinct_tokens").and_then(|v| v.as_u64()) {
        parts.push(format!("distinct tokens = {}", tokens));
    }
    if let Some(mode) = col.characteristics.get("most_frequent").and_then(|v| v.as_str()) {
        parts.push(format!("mode = {}", escape_html(mode)));
    }
    parts.join(", ")
}

fn render_correlations_table(profile: &DatasetProfile) -> String {
    if profile.correlations.is_empty() {
        return "<h2>Correlations</h2>\n<p>No numeric column pairs.</p>".to_string();
    }

    let mut rows = String::new();
    for entry in &profile.correlations {
        let strength_class = if entry.pearson_r.abs() >= 0.6 {
            "strong"
        } else if entry.pearson_r.abs() >= 0.3 {
            "moderate"
        } else {
            "weak"
        };
        rows.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{:.3}</td></tr>\n",
            strength_class,
            escape_html(&entry.left),
            escape_html(&entry.right),
            entry.pearson_r,
        ));
    }

    format!(
        r#"<h2>Correlations</h2>
<table>
<thead><tr><th>Column</th><th>Column</th><th>Pearson r</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    )
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
       background: #f6f8fa; color: #1f2328; line-height: 1.5; }
.container { max-width: 1100px; margin: 0 auto; padding: 2rem; }
h1 { margin-bottom: 0.25rem; }
.meta { color: #656d76; margin-bottom: 1.5rem; }
table { border-collapse: collapse; width: 100%; margin-bottom: 2rem; background: #fff; }
th, td { border: 1px solid #d0d7de; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #eaeef2; }
tr.strong td { background: #dafbe1; }
tr.moderate td { background: #fff8c5; }
"#
}

/// Minimal HTML escaping for text content.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
