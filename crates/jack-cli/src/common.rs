use std::path::Path;

use owo_colors::OwoColorize;
use jack_syntax::error::Error;

pub fn render_error(kind: &str, path: &Path, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    match err.line {
        Some(line) if line >= 1 => {
            eprintln!("  --> {}:{}", path.display(), line);
            if let Some(src_line) = source.lines().nth(line - 1) {
                let line_num_str = format!("{:4} | ", line);
                eprintln!("     |");
                eprintln!("{}{}", line_num_str.bright_black(), src_line.trim_end());
                eprintln!("     |");
            }
        }
        _ => eprintln!("  --> {}", path.display()),
    }
    provide_suggestions(&err.msg);
}

pub fn warn(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub fn note(msg: &str) {
    eprintln!("{}: {}", "note".cyan().bold(), msg.bright_black());
}

fn provide_suggestions(err_msg: &str) {
    if err_msg.contains("end of input") {
        eprintln!("{}", "Help: The file ended in the middle of a declaration.".yellow());
        eprintln!("    {}", "Check that every '{' and '(' has a matching '}' or ')'".bright_black());
    } else if err_msg.starts_with("Expected ;") {
        eprintln!("{}", "Help: Statements and declarations end with ';'.".yellow());
        eprintln!("    {}", "Example: let x = x + 1;".bright_black());
    } else if err_msg.starts_with("Expected =") {
        eprintln!("{}", "Help: A let statement needs '=' between the target and the value.".yellow());
        eprintln!("    {}", "Example: let a[i] = 0;".bright_black());
    } else if err_msg.starts_with("Expected term") {
        eprintln!("{}", "Help: An expression operand is missing.".yellow());
        eprintln!("    {}", "Terms are constants, names, calls, a[i], (expr), -x or ~x".bright_black());
    } else if err_msg.starts_with("Expected type") {
        eprintln!("{}", "Help: Types are int, char, boolean or a class name.".yellow());
    } else if err_msg.starts_with("Expected '(' or '.'") {
        eprintln!("{}", "Help: 'do' must be followed by a subroutine call.".yellow());
        eprintln!("    {}", "Example: do Output.printInt(x);".bright_black());
    } else if err_msg.starts_with("Expected identifier") {
        eprintln!("{}", "Help: A name was expected here; keywords cannot be used as names.".yellow());
    }
}
