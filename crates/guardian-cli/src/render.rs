use owo_colors::OwoColorize;

use guardian_syntax::error::Error;

/// Print an error with the offending source line and a caret under its column.
pub fn render_error(kind: &str, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line.saturating_sub(1)) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);
            eprintln!("{}", caret_line(line_num_str.len(), col).red());
            eprintln!("     |");
        }
    }
    if let Some(help) = suggestion(&err.msg) {
        eprintln!("{}", format!("Help: {}", help).yellow());
    }
}

fn caret_line(gutter: usize, col: usize) -> String {
    let mut marker = " ".repeat(gutter + col.saturating_sub(1));
    marker.push_str("^ error here");
    marker
}

fn suggestion(msg: &str) -> Option<&'static str> {
    let help = if msg.starts_with("cannot build call statement") {
        "'defer' and 'run' must be followed by a function call, e.g. defer unlock(m)"
    } else if msg.starts_with("cannot build if statement") {
        "An 'if' needs a condition before its block: if ready { ... }"
    } else if msg.starts_with("cannot build") {
        "The statement is missing a required part."
    } else if msg.contains("Unclosed block") || msg.contains("Unterminated switch") {
        "Check that every '{' has a matching '}'."
    } else if msg.contains("after for-loop initializer") {
        "A three-part loop is written: for i = 0; i < n; i++ { ... }"
    } else if msg.contains("outside of switch") {
        "'case' and 'default' may only appear inside a switch body."
    } else if msg.contains("or newline after statement") {
        "Put each statement on its own line, or separate them with ';'."
    } else if msg.contains("is not a statement") {
        "Only assignments and calls can stand alone; did you mean '=' instead of '=='?"
    } else if msg.contains("Unterminated string") {
        "Make sure every \" has a matching closing \" on the same line."
    } else if msg.contains("Invalid number") {
        "Integer literals must fit in 64 bits."
    } else {
        return None;
    };
    Some(help)
}
