//! Splitting of compile and link command fragments into arguments.
//!
//! CMake reports command lines as fragments such as `-O2 -DFOO="bar baz"`.
//! Splitting follows shell quoting closely enough that a quoted multi-word
//! argument stays one token, while leaving Windows paths alone:
//!
//! - whitespace separates tokens;
//! - `'...'` is taken literally;
//! - `"..."` groups, with `\"` and `\\` as its only escapes;
//! - outside quotes, `\` escapes whitespace, a quote or `\`, and is kept
//!   as-is before anything else;
//! - an unterminated quote runs to the end of the fragment.

/// Split one fragment into arguments.
pub fn split_fragment(fragment: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = fragment.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\'' => {
                in_token = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    current.push(q);
                }
            }
            '"' => {
                in_token = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' if matches!(chars.peek(), Some('"') | Some('\\')) => {
                            if let Some(escaped) = chars.next() {
                                current.push(escaped);
                            }
                        }
                        _ => current.push(q),
                    }
                }
            }
            '\\' => {
                in_token = true;
                match chars.peek() {
                    Some(&next) if next.is_whitespace() || matches!(next, '"' | '\'' | '\\') => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                }
            }
            _ => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}
