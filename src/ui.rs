use crate::columns::input_columns;
use crate::config::GroupLabels;
use crate::models::{Report, ReportEntry};

pub fn render_index(date: &str, labels: &GroupLabels, report: &Report) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &escape(date))
        .replace("{{FIELDS}}", &render_fields(labels))
        .replace("{{REPORT}}", &render_report(report))
}

fn render_fields(labels: &GroupLabels) -> String {
    let mut out = String::new();
    for column in input_columns(labels) {
        let column = escape(&column);
        out.push_str(&format!(
            r#"<label>{column}<input name="{column}" inputmode="decimal" autocomplete="off" /></label>"#
        ));
    }
    out
}

fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let mut open = false;
    for entry in &report.entries {
        match entry {
            ReportEntry::Header { label } => {
                if open {
                    out.push_str("</tbody>");
                }
                out.push_str(&format!(
                    r#"<tbody><tr class="section"><th colspan="2">{}</th></tr>"#,
                    escape(label)
                ));
                open = true;
            }
            ReportEntry::Datum { label, value } => {
                out.push_str(&format!(
                    r#"<tr><td>{}</td><td class="value">{}</td></tr>"#,
                    escape(label),
                    escape(value)
                ));
            }
        }
    }
    if open {
        out.push_str("</tbody>");
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="sv">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Scenstatistik</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px 16px 48px;
    }

    main {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 18px;
      padding: 24px;
      box-shadow: 0 12px 32px rgba(47, 72, 88, 0.14);
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: #5f5c57;
    }

    input {
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td {
      padding: 4px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    td.value {
      text-align: right;
      font-variant-numeric: tabular-nums;
    }

    tr.section th {
      text-align: left;
      padding: 18px 8px 6px;
      color: var(--accent-2);
    }
  </style>
</head>
<body>
  <main>
    <section>
      <h1>Ny scen – {{DATE}}</h1>
      <form method="post" action="/rows">
        {{FIELDS}}
        <button type="submit">Spara rad</button>
      </form>
    </section>
    <section>
      <h2>Statistik</h2>
      <table>{{REPORT}}</table>
    </section>
  </main>
</body>
</html>
"#;
