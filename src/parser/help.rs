//! Usage and help text

use crate::registry::Registry;

/// Pad `s` the way the help layout expects: strings shorter than `width`
/// end up `width - 1` characters long, longer ones are left untouched.
fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len < width {
        format!("{}{}", s, " ".repeat(width - len - 1))
    } else {
        s.to_string()
    }
}

/// Render the help block, including its trailing newlines
pub fn render_help(program: &str, registry: &Registry) -> String {
    let mut buf = String::new();
    buf.push_str("\n  Usage: ");
    buf.push_str(program);
    buf.push_str(" [options]");
    buf.push('\n');
    buf.push_str("\n  Options:\n");

    let width = registry
        .iter()
        .map(|o| o.usage.chars().count())
        .max()
        .unwrap_or(0)
        + 5;

    let options: Vec<String> = registry
        .iter()
        .map(|o| format!("    {}\t- {}", pad(&o.usage, width), o.description))
        .collect();
    buf.push_str(&options.join("\n"));

    let shorthands = registry.shorthands();
    if !shorthands.is_empty() {
        buf.push_str("\n\n  Shorthands:\n");

        let width = shorthands.keys().map(|k| k.chars().count()).max().unwrap_or(0) + 1;
        let lines: Vec<String> = shorthands
            .iter()
            .map(|(key, value)| format!("    --{}\t\t{}", pad(key, width), value))
            .collect();
        buf.push_str(&lines.join("\n"));
    }

    buf.push('\n');
    // terminator of the printed line
    buf.push('\n');
    buf
}
