//! The HTML log viewer page.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::viewer::reader::escape_html;

const TEMPLATE: &str = include_str!("../../assets/log_viewer.html");

pub const TITLE: &str = "Streaming Log Viewer over WebSockets";

/// Render the page with one option per logger that writes a file.
pub fn render(loggers: &BTreeMap<String, PathBuf>, ws_path: &str) -> String {
    let options: String = loggers
        .keys()
        .map(|name| {
            let name = escape_html(name);
            format!("      <option value=\"{name}\">{name}</option>\n")
        })
        .collect();

    TEMPLATE
        .replace("{{title}}", TITLE)
        .replace("{{ws_path}}", ws_path)
        .replace("{{options}}", options.trim_end())
}
