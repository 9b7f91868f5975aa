//! Restricted glob patterns translated to anchored regular expressions.
//!
//! The glob dialect knows two operators: `*` (any run of characters) and
//! `?` (exactly one character), either of which a backslash escapes back
//! to a literal. Every other character passes through *unescaped*. This
//! is deliberate, not an oversight: regex metacharacters embedded in a
//! pattern behave as regex, and downstream callers rely on that
//! pass-through. Use [`compile_pattern`] to find out whether a given
//! pattern still forms a valid expression.

use regex::Regex;

/// Translate a glob pattern into an anchored regular expression.
///
/// The result is wrapped in `\A`/`\z` so the whole subject must match,
/// not merely contain, the pattern. The empty pattern translates to the
/// empty string, which callers interpret as "no constraint"
/// (match-anything), not as match-nothing.
pub fn pattern_to_regex(pattern: &str) -> String {
    if pattern.is_empty() {
        return String::new();
    }

    // A leading sentinel gives a pattern-initial `*`/`?` a preceding
    // non-backslash character to match against; the trim below removes
    // it together with any other edge whitespace.
    let padded = format!(" {pattern}");
    let expanded = replace_unescaped(&padded, '*', ".*");
    let expanded = replace_unescaped(&expanded, '?', ".");

    format!(r"\A{}\z", expanded.trim())
}

/// Translate and compile a glob pattern in one step.
///
/// Returns `None` for the empty "no constraint" pattern. Patterns whose
/// passed-through metacharacters do not form a valid expression surface
/// the compile error instead of matching silently wrong.
pub fn compile_pattern(pattern: &str) -> Result<Option<Regex>, regex::Error> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(&pattern_to_regex(pattern)).map(Some)
}

/// Replace every `op` preceded by a non-backslash character with `rep`.
///
/// Matches are non-overlapping over the input, like sequential regex
/// replacement: a character consumed as the preceding half of one match
/// cannot anchor the next, so `**` expands to `.**`.
fn replace_unescaped(input: &str, op: char, rep: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len() && chars[i] != '\\' && chars[i + 1] == op {
            out.push(chars[i]);
            out.push_str(rep);
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}
