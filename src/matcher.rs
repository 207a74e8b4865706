//! Name selection for test classes and test methods.
//!
//! A pattern selects a name when the name starts with the pattern, or when
//! the pattern carries glob metacharacters and matches the whole name with
//! shell-glob semantics (`*`, `?`, `[...]`). Matching is case-sensitive.
use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

const GLOB_METACHARACTERS: [char; 3] = ['*', '?', '['];

#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: String,
    glob: Option<GlobMatcher>,
}

impl NamePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let glob = if has_glob_metacharacters(&pattern) {
            compile_glob(&pattern)
        } else {
            None
        };
        Self { pattern, glob }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, name: &str) -> bool {
        if name.starts_with(&self.pattern) {
            return true;
        }
        match &self.glob {
            Some(glob) => glob.is_match(name),
            None => false,
        }
    }
}

/// One-shot form of [`NamePattern::is_match`].
pub fn matches(pattern: &str, name: &str) -> bool {
    NamePattern::new(pattern).is_match(name)
}

fn has_glob_metacharacters(pattern: &str) -> bool {
    pattern.chars().any(|c| GLOB_METACHARACTERS.contains(&c))
}

fn compile_glob(pattern: &str) -> Option<GlobMatcher> {
    let translated = to_glob_syntax(pattern);
    match GlobBuilder::new(&translated)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            debug!(pattern, error = %e, "pattern is not a valid glob, using prefix match only");
            None
        }
    }
}

/// Rewrites a shell glob into globset syntax. Braces are plain characters in
/// shell globs but alternations in globset, and an unclosed `[` is a literal.
/// Only `[!...]` negates a class; a leading `^` is a member.
fn to_glob_syntax(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i + 1..end]);
                    i = end + 1;
                    continue;
                }
                None => out.push_str("[[]"),
            },
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            c => out.push(c),
        }
        i += 1;
    }

    out
}

/// globset reads a leading `^` as negation. Repeating the last member up
/// front keeps the member set and moves the `^` off the first position.
fn push_class(out: &mut String, members: &[char]) {
    match members {
        ['^'] => out.push('^'),
        ['^', .., last] if *last != '!' => {
            out.push('[');
            out.push(*last);
            out.extend(members);
            out.push(']');
        }
        ['^', rest @ ..] => {
            out.push('[');
            out.extend(rest);
            out.push_str("^]");
        }
        _ => {
            out.push('[');
            out.extend(members);
            out.push(']');
        }
    }
}

/// Index of the `]` closing the class opened at `start`. A leading `!` and a
/// `]` right after the opening bracket belong to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}
