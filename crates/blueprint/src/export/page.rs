//! The HTML page wrapping a rendered view.

use blueprint_core::diagnostic::Diagnostic;

use crate::graph::escape_html;

const STYLE: &str = r#"
        body {
            font-family: Sans;
        }
        .panel-margin {
            margin: 16px 22px 16px 16px;
        }
        .panel {
            margin-top: 16px;
            margin-bottom: 16px;
            overflow: hidden;
        }
        .danger {
            background-color: #ffdddd;
            border-left: 6px solid #f44336;
        }
        .warning {
            background-color: #ffffcc;
            border-left: 6px solid #ffeb3b;
        }"#;

/// Everything shown on a view page.
#[derive(Debug, Clone, Default)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Diagnostics collected while reading the project.
    pub model_errors: &'a [Diagnostic],
    /// Why the layout engine produced no diagram.
    pub render_error: Option<String>,
    /// Diagnostics of an otherwise successful layout run.
    pub render_warnings: Option<&'a str>,
    /// Rendered diagram markup, embedded as is.
    pub svg: &'a str,
}

fn panel(out: &mut String, class: &str, heading: &str, lines: &[String]) {
    out.push_str(&format!(
        r#"
    <div><div class="{class} panel"><div class="panel-margin">
        {heading}
        <pre>"#
    ));
    for line in lines {
        out.push_str(&escape_html(line));
        out.push_str("<br/>");
    }
    out.push_str("</pre>\n    </div></div></div>");
}

/// Render the page of one view.
///
/// Text fields are escaped; the diagram is embedded verbatim.
pub fn render_page(page: &PageContext<'_>) -> String {
    let title = escape_html(page.title);
    let mut panels = String::new();

    if !page.model_errors.is_empty() {
        let lines: Vec<String> = page.model_errors.iter().map(ToString::to_string).collect();
        panel(&mut panels, "danger", "Model Errors", &lines);
    }
    if let Some(error) = &page.render_error {
        panel(&mut panels, "danger", "Graphviz Errors", &[error.clone()]);
    }
    if let Some(warnings) = page.render_warnings {
        panel(&mut panels, "warning", "Graphviz Warnings", &[warnings.to_string()]);
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{STYLE}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p>{description}</p>
{panels}
    <div>{svg}</div>
</body>
</html>
"#,
        description = escape_html(page.description),
        svg = page.svg,
    )
}
