//! POSIX quoting and `printf` format helpers used by the wrapping nodes.

/// Characters that never need quoting in a POSIX shell word.
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c)
}

/// Quote `s` so a POSIX shell reads it back as exactly one word equal to `s`.
///
/// Safe words are returned bare, the empty string becomes `''`, and anything
/// else is single-quoted with embedded `'` written as `'"'"'`. Inside single
/// quotes nothing is special, so this is total over every input.
pub fn quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(is_safe) {
        return s.to_string();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        if c == '\'' {
            quoted.push_str("'\"'\"'");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Escape `%` so the text survives being used as a `printf` format string.
pub fn escape_printf(s: &str) -> String {
    s.replace('%', "%%")
}

/// Wrap one line in bold cyan escapes, written as `printf` escape text.
fn colorize(line: &str) -> String {
    format!("\\x1b[36;1m{line}\\x1b[0m")
}

/// Build the `printf` format string that echoes `script` as a terminal transcript.
///
/// The first line gets a `$ ` prompt and every following line a `> `
/// continuation prompt. Newlines are emitted as `printf` escapes, so the
/// result is a single line of text.
pub fn transcript(script: &str) -> String {
    let escaped = escape_printf(script);
    let lines: Vec<String> = escaped.split('\n').map(colorize).collect();
    format!("$ {}\\n", lines.join("\\n> "))
}
