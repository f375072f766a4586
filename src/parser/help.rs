//! Help text rendering

use crate::option::CmdOption;

/// Render the help block of a command
pub fn render_help(name: &str, description: &str, usage: &str, options: &[CmdOption]) -> String {
    let mut out = String::new();
    out.push_str(description);
    out.push_str("\n\n");
    out.push_str(&format!("usage: {} {}\n", name, usage));

    if !options.is_empty() {
        out.push_str("\nOptions:\n");
        out.push_str(&render_option_table(options));
    }

    out
}

/// Render options as an aligned table, one option per line
///
/// ```text
///   -c, --count    Number of items (default: 10)
///       --name     Who to greet (required)
/// ```
pub fn render_option_table(options: &[CmdOption]) -> String {
    let spellings: Vec<String> = options.iter().map(CmdOption::spelling).collect();
    let width = spellings.iter().map(|s| s.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (option, spelling) in options.iter().zip(&spellings) {
        let mut line = format!("  {:<width$}", spelling, width = width);

        let detail = match (option.description(), option.annotation()) {
            ("", None) => String::new(),
            ("", Some(annotation)) => annotation,
            (description, None) => description.to_string(),
            (description, Some(annotation)) => format!("{} {}", description, annotation),
        };
        if !detail.is_empty() {
            line.push_str("    ");
            line.push_str(&detail);
        }

        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
