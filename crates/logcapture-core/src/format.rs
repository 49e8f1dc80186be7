//! Placeholder substitution for human-readable rendering
//!
//! Templates use `{}` as a positional placeholder. `\{}` renders a literal
//! `{}` without consuming an argument. Placeholders without a matching argument
//! are kept verbatim and surplus arguments are ignored.

use crate::arg::Arg;

const PLACEHOLDER: &str = "{}";

/// Substitute `args` into `template`
pub fn format_message(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find(PLACEHOLDER) {
        let (before, after) = rest.split_at(pos);
        rest = &after[PLACEHOLDER.len()..];

        if let Some(stripped) = before.strip_suffix('\\') {
            // `\\{}` is an escaped backslash followed by a real placeholder
            if stripped.ends_with('\\') {
                out.push_str(stripped);
                push_next(&mut out, &mut args);
            } else {
                out.push_str(stripped);
                out.push_str(PLACEHOLDER);
            }
            continue;
        }

        out.push_str(before);
        push_next(&mut out, &mut args);
    }

    out.push_str(rest);
    out
}

fn push_next<'a>(out: &mut String, args: &mut impl Iterator<Item = &'a Arg>) {
    match args.next() {
        Some(arg) => out.push_str(&arg.to_string()),
        None => out.push_str(PLACEHOLDER),
    }
}
