//! Locating a reported string and replacing it with a translation call.
//!
//! Reported line numbers drift as earlier edits shift the file, so the
//! claimed line is only a starting point: nearby lines are tried next, then
//! the whole file.

use std::sync::LazyLock;

use regex::Regex;

/// Text ending in `name="`, i.e. the start of a quoted attribute value.
static ATTRIBUTE_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[A-Za-z_][\w-]*="$"#).unwrap());

/// A single successful substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// 0-based index of the rewritten line.
    pub line_index: usize,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone)]
pub struct LineRewriter {
    translate_fn: String,
    search_radius: usize,
}

impl LineRewriter {
    pub fn new(translate_fn: impl Into<String>, search_radius: usize) -> Self {
        Self {
            translate_fn: translate_fn.into(),
            search_radius,
        }
    }

    /// `t("key")` for the configured translation function.
    pub fn translation_call(&self, key: &str) -> String {
        let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{}(\"{}\")", self.translate_fn, escaped)
    }

    /// Replace the first occurrence of `needle` on the best matching line.
    ///
    /// Returns `None` and leaves `lines` untouched when the string is not in
    /// the file at all, or only as part of a longer attribute value.
    pub fn replace(
        &self,
        lines: &mut [String],
        claimed_line: usize,
        needle: &str,
        key: &str,
    ) -> Option<Replacement> {
        let line_index = locate_line(lines, claimed_line, needle, self.search_radius)?;
        let before = lines[line_index].clone();
        let after = rewrite_line(&before, needle, &self.translation_call(key))?;
        lines[line_index] = after.clone();

        Some(Replacement {
            line_index,
            before,
            after,
        })
    }
}

/// Find the index of the line to rewrite.
///
/// Order: the claimed (1-based) line, then `+1, -1, +2, -2, ...` up to
/// `radius`, then every line from the top.
pub fn locate_line(
    lines: &[String],
    claimed_line: usize,
    needle: &str,
    radius: usize,
) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    // Candidates are 1-based; anything outside the file is a miss.
    let contains = |line: Option<usize>| -> Option<usize> {
        let index = line?.checked_sub(1)?;
        lines
            .get(index)
            .filter(|line| line.contains(needle))
            .map(|_| index)
    };

    if let Some(found) = contains(Some(claimed_line)) {
        return Some(found);
    }

    // Outside these offsets both candidates fall outside the file.
    let first = claimed_line.saturating_sub(lines.len()).max(1);
    let last = radius.min(claimed_line.max(lines.len()));
    for offset in first..=last {
        let found = contains(claimed_line.checked_add(offset))
            .or_else(|| contains(claimed_line.checked_sub(offset)));
        if found.is_some() {
            return found;
        }
    }

    lines.iter().position(|line| line.contains(needle))
}

/// Rewrite the first occurrence of `needle` in `line` as `{call}`.
///
/// When the match is a quoted attribute value (`label="Click me"`), the
/// quotes are replaced too so the attribute becomes an expression. A match
/// that only covers part of an attribute value is not rewritten.
pub fn rewrite_line(line: &str, needle: &str, call: &str) -> Option<String> {
    let start = line.find(needle)?;
    let end = start + needle.len();
    let replacement = format!("{{{}}}", call);

    if ATTRIBUTE_VALUE_REGEX.is_match(&line[..start]) {
        if !line[end..].starts_with('"') {
            return None;
        }
        return Some(format!(
            "{}{}{}",
            &line[..start - 1],
            replacement,
            &line[end + 1..]
        ));
    }

    Some(format!("{}{}{}", &line[..start], replacement, &line[end..]))
}
