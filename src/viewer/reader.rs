//! Log file tailing and HTML rendering.

use std::io;
use std::path::Path;

/// Last `n` lines of the file at `path`.
///
/// Invalid UTF-8 is replaced rather than rejected. A file that does not
/// exist (yet) has no lines.
pub async fn read_tail(path: &Path, n: usize) -> io::Result<Vec<String>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    Ok(lines[start..].iter().map(|line| line.to_string()).collect())
}

/// Render lines as one HTML fragment, colouring errors and warnings.
pub fn render_lines(lines: &[String]) -> String {
    lines.iter().map(|line| render_line(line)).collect()
}

pub fn render_line(line: &str) -> String {
    let escaped = escape_html(line);
    if line.contains("ERROR") || line.contains("CRITICAL") {
        format!("<span class=\"text-red-400\">{escaped}</span><br/>")
    } else if line.contains("WARNING") {
        format!("<span class=\"text-orange-300\">{escaped}</span><br/>")
    } else {
        format!("{escaped}<br/>")
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
