//! Output rendering for lint results.
//!
//! Supports `human` (default) and `json`. Human output streams each
//! violation as it is found and ends with a one-line summary; JSON output
//! is a single document printed once the run completes.

use crate::models::{LintResult, Violation};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Render one violation as the located header followed by the expected names.
pub fn format_violation(v: &Violation, color: bool) -> String {
    let location = format!("{}:{}", v.file, v.line);
    let location = if color {
        location.yellow().bold().to_string()
    } else {
        location
    };
    let label = v.label.trim_matches('"');
    let label = if label.is_empty() {
        String::new()
    } else if color {
        format!(" {}", format!("\"{}\"", label).blue().bold())
    } else {
        format!(" \"{}\"", label)
    };

    let mut out = format!("{} {}{} expected order:", location, v.kind, label);
    for entry in &v.expected {
        out.push_str("\n    ");
        if entry.out_of_order && color {
            out.push_str(&entry.name.red().bold().to_string());
        } else if entry.out_of_order {
            // keep the mark visible without colours
            out.push_str(&format!("{} *", entry.name));
        } else {
            out.push_str(&entry.name);
        }
    }
    out
}

/// Print a violation immediately in human mode; JSON waits for `print_lint`.
pub fn print_violation(v: &Violation, output: &str) {
    if output == "json" {
        return;
    }
    println!("{}", format_violation(v, use_colors(output)));
}

/// Closing line for human output.
pub fn summary_line(res: &LintResult, program: &str) -> String {
    if res.sorted {
        format!("{}: No lints found", program)
    } else {
        format!(
            "{}: {} container(s) out of order in {} file(s)",
            program,
            res.violations.len(),
            res.files_with_violations()
        )
    }
}

/// Print the end-of-run output in the requested format.
pub fn print_lint(res: &LintResult, output: &str, program: &str) {
    match output {
        "json" => println!("{:#}", compose_lint_json(res)),
        _ => {
            let line = summary_line(res, program);
            if use_colors(output) {
                if res.sorted {
                    println!("{}", line.green().bold());
                } else {
                    println!("{}", line.bold());
                }
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    json!(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpectedEntry, Summary};

    fn violation() -> Violation {
        Violation {
            file: "modules/app/main.tf".into(),
            line: 12,
            kind: "Block".into(),
            label: "resource web".into(),
            expected: vec![
                ExpectedEntry {
                    name: "count".into(),
                    out_of_order: true,
                },
                ExpectedEntry {
                    name: "source".into(),
                    out_of_order: false,
                },
                ExpectedEntry {
                    name: "b".into(),
                    out_of_order: true,
                },
            ],
        }
    }

    #[test]
    fn test_format_violation_plain() {
        let out = format_violation(&violation(), false);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[0],
            "modules/app/main.tf:12 Block \"resource web\" expected order:"
        );
        assert_eq!(lines[1], "    count *");
        assert_eq!(lines[2], "    source");
        assert_eq!(lines[3], "    b *");
    }

    #[test]
    fn test_format_violation_without_label() {
        let mut v = violation();
        v.kind = "variable".into();
        v.label = String::new();
        v.line = 1;
        let out = format_violation(&v, false);
        assert!(out.starts_with("modules/app/main.tf:1 variable expected order:"));
    }

    #[test]
    fn test_format_violation_colored_marks_names() {
        let out = format_violation(&violation(), true);
        assert!(out.contains("\u{1b}["));
        assert!(!out.contains(" *"));
    }

    #[test]
    fn test_summary_line() {
        let mut res = LintResult {
            violations: Vec::new(),
            summary: Summary::default(),
            sorted: true,
        };
        assert_eq!(summary_line(&res, "tfsort"), "tfsort: No lints found");

        res.violations.push(violation());
        res.violations.push(violation());
        res.sorted = false;
        assert_eq!(
            summary_line(&res, "tfsort"),
            "tfsort: 2 container(s) out of order in 1 file(s)"
        );
    }

    #[test]
    fn test_compose_lint_json_shape() {
        let res = LintResult {
            violations: vec![violation()],
            summary: Summary {
                files: 3,
                containers: 9,
                violations: 1,
            },
            sorted: false,
        };
        let out = compose_lint_json(&res);
        assert_eq!(out["summary"]["containers"], 9);
        assert_eq!(out["sorted"], false);
        assert_eq!(out["violations"][0]["line"], 12);
        assert_eq!(out["violations"][0]["expected"][0]["name"], "count");
        assert_eq!(out["violations"][0]["expected"][1]["out_of_order"], false);
    }
}
