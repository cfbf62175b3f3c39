//! HTML rendering for the lookup page
//!
//! The page is rendered on the server for every state so it works without
//! JavaScript; `app.js` swaps in the error/result panels returned by
//! `/api/lookup` for in-place updates.

use crate::session::{LookupSession, LookupState};
use ztr_common::grading::Grade;

const CONFETTI_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/canvas-confetti@1.9.3/dist/confetti.browser.min.js";

const STYLES: &str = r#"
body { margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
       background: #f8fafc; font-family: system-ui, sans-serif; color: #111827; }
.container { width: 100%; max-width: 960px; padding: 24px; }
.header { text-align: center; margin-bottom: 32px; }
.header h1 { font-size: 1.875rem; margin: 0 0 8px; }
.header p { color: #6b7280; font-size: 0.875rem; margin: 0; }
.columns { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 24px; align-items: start; }
.card { background: #fff; border-radius: 12px; box-shadow: 0 10px 15px rgba(0,0,0,0.08); padding: 24px; }
label { display: block; font-size: 0.875rem; font-weight: 600; color: #374151; margin-bottom: 8px; }
input { box-sizing: border-box; width: 100%; height: 48px; padding: 0 16px; font-size: 1rem;
        border: 1px solid #d1d5db; border-radius: 8px; }
button { margin-top: 16px; width: 100%; height: 48px; border: 0; border-radius: 8px;
         background: #2563eb; color: #fff; font-weight: 600; cursor: pointer; }
button:disabled { background: #9ca3af; cursor: not-allowed; }
.error { margin-top: 16px; padding: 12px; background: #fef2f2; border: 1px solid #fecaca;
         border-radius: 8px; color: #b91c1c; font-size: 0.875rem; text-align: center; }
.result-header { display: flex; justify-content: space-between; align-items: center;
                 border-bottom: 1px solid #e5e7eb; padding-bottom: 16px; margin-bottom: 24px; }
.result-header h2 { font-size: 1.125rem; margin: 0; }
.badge { padding: 4px 12px; border-radius: 9999px; border: 2px solid; font-weight: 700; font-size: 0.875rem; }
.grade-a { border-color: #22c55e; color: #15803d; background: #f0fdf4; }
.grade-b { border-color: #3b82f6; color: #1d4ed8; background: #eff6ff; }
.grade-c { border-color: #eab308; color: #a16207; background: #fefce8; }
.grade-d { border-color: #f97316; color: #c2410c; background: #fff7ed; }
.grade-f { border-color: #ef4444; color: #b91c1c; background: #fef2f2; }
.details { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
.details .wide { grid-column: span 2; }
.field-label { font-size: 0.75rem; color: #6b7280; text-transform: uppercase; letter-spacing: 0.05em; margin: 0 0 4px; }
.field-value { font-size: 0.875rem; font-weight: 700; margin: 0; }
.marks { margin-top: 24px; background: #eff6ff; border: 2px solid #dbeafe; border-radius: 8px; padding: 20px; }
.marks div { display: flex; justify-content: space-between; align-items: center; }
.marks div + div { margin-top: 12px; }
.obtained { font-size: 1.5rem; font-weight: 900; }
.total { font-size: 1.25rem; font-weight: 700; color: #374151; }
.grade-message { margin-top: 24px; padding-top: 16px; border-top: 1px solid #e5e7eb; text-align: center;
                 font-size: 0.875rem; color: #374151; }
.placeholder { display: flex; align-items: center; justify-content: center; min-height: 400px;
               border: 2px dashed #d1d5db; border-radius: 12px; color: #9ca3af; }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn badge_class(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "grade-a",
        Grade::B => "grade-b",
        Grade::C => "grade-c",
        Grade::D => "grade-d",
        Grade::F => "grade-f",
    }
}

/// Inline error panel, empty when there is nothing to report
pub fn error_panel(state: &LookupState) -> String {
    match state.message() {
        Some(message) => format!(r#"<div class="error" role="alert">{}</div>"#, escape(message)),
        None => String::new(),
    }
}

/// Result card for `Found`, placeholder otherwise
pub fn result_panel(state: &LookupState) -> String {
    let LookupState::Found { student, grade } = state else {
        return r#"<div class="placeholder"><p>Result will appear here</p></div>"#.to_string();
    };

    format!(
        r#"<div class="card">
  <div class="result-header">
    <h2>Result Summary</h2>
    <span class="badge {badge}">Grade {grade}</span>
  </div>
  <div class="details">
    <div><p class="field-label">Student Name</p><p class="field-value">{name}</p></div>
    <div><p class="field-label">Father Name</p><p class="field-value">{father_name}</p></div>
    <div class="wide"><p class="field-label">Roll Number</p><p class="field-value">{roll_number}</p></div>
  </div>
  <div class="marks">
    <div><span>Obtained Marks</span><span class="obtained">{obtained}</span></div>
    <div><span>Total Marks</span><span class="total">{total}</span></div>
  </div>
  <p class="grade-message">{message}</p>
</div>"#,
        badge = badge_class(grade.grade),
        grade = grade.grade,
        name = escape(&student.name),
        father_name = escape(&student.father_name),
        roll_number = escape(&student.roll_number),
        obtained = student.obtained_marks,
        total = student.total_marks,
        message = escape(&grade.message),
    )
}

/// Full lookup page for the session's current state
pub fn page(session: &LookupSession) -> String {
    let state = session.state();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Zero Test Result</title>
<style>{styles}</style>
</head>
<body>
<div class="container">
  <div class="header">
    <h1>Zero Test Result</h1>
    <p>Enter your roll number to view your result</p>
  </div>
  <div class="columns">
    <div class="card">
      <form id="search-form" method="get" action="/">
        <label for="roll-number">Roll Number</label>
        <input id="roll-number" name="roll_number" type="text" placeholder="Enter Roll Number" value="{input}" autocomplete="off">
        <button id="search-button" type="submit">Search Result</button>
      </form>
      <div id="error-panel">{error}</div>
    </div>
    <div id="result-panel" data-celebrate="{celebrate}">{result}</div>
  </div>
</div>
<script src="{confetti}"></script>
<script src="/static/app.js"></script>
</body>
</html>
"#,
        styles = STYLES,
        input = escape(session.input()),
        error = error_panel(state),
        celebrate = session.celebrate(),
        result = result_panel(state),
        confetti = CONFETTI_SCRIPT,
    )
}
