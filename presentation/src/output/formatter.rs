//! Start-up report formatting

use colored::Colorize;
use keybow_domain::{ConfigIssue, KeyTable, Severity};
use std::path::Path;

/// One configuration issue, coloured by severity.
pub fn format_issue(issue: &ConfigIssue) -> String {
    let label = match issue.severity {
        Severity::Error => "error:".red().bold(),
        Severity::Warning => "warning:".yellow().bold(),
    };
    format!("{} {}", label, issue)
}

/// Summary of what is about to run.
pub fn format_session_banner(script: &Path, keys: &KeyTable, simulate: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} {}\n", "Script:".cyan().bold(), script.display()));

    let mode = if simulate { "simulated" } else { "hardware" };
    output.push_str(&format!("{} {}\n", "Devices:".cyan().bold(), mode));

    output.push_str(&format!("{} ", "Keys:".cyan().bold()));
    let keys: Vec<String> = keys
        .iter()
        .map(|k| match k.hid_code {
            Some(code) => format!("{}→{:#04x}", k.index, code),
            None => k.index.to_string(),
        })
        .collect();
    output.push_str(&keys.join(" "));
    output.push('\n');
    output
}
