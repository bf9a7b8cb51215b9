//! Version-aware ordering for arbitrary tag strings
//!
//! Tags are split into text and numeric runs so that `1.2 < 1.11` and
//! `v1.2 == 1.2`, even for tags that are not valid semantic versions.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit-run pattern is valid"));

/// A run of decimal digits compared by numeric value.
///
/// Stored without leading zeros, so runs of any length compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeric(String);

impl Numeric {
    /// Build from a digit-only string
    pub fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Numeric("0".to_string())
        } else {
            Numeric(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One element of a [SortKey].
///
/// Variant order is the cross-type ordering: marker < number < text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyElement {
    Marker(bool),
    Number(Numeric),
    Text(String),
}

impl KeyElement {
    /// Marker value for the element that follows it
    fn priority(&self) -> bool {
        match self {
            // digits are word characters
            KeyElement::Number(_) | KeyElement::Marker(_) => false,
            KeyElement::Text(text) => match text.chars().next() {
                None => true,
                Some(c) => !(c.is_ascii_alphanumeric() || c == '_'),
            },
        }
    }
}

impl fmt::Display for KeyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyElement::Marker(b) => write!(f, "{}", b),
            KeyElement::Number(n) => write!(f, "{}", n.as_str()),
            KeyElement::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Ordered comparison key for a tag string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey(Vec<KeyElement>);

impl SortKey {
    /// Build the key for `tag`.
    ///
    /// Examples:
    /// - `1.2b1` -> `[false, 1, ".", false, 2, "b", false, 1, ""]`
    /// - `1.2`   -> `[false, 1, ".", false, 2, ""]`
    /// - `1.2-1` -> `[false, 1, ".", false, 2, "-", false, 1, ""]`
    /// - `v1.3`  -> `[false, 1, ".", false, 3, ""]`
    pub fn new(tag: &str) -> Self {
        let mut elements = Vec::new();
        let mut last = 0;
        for run in DIGIT_RUN.find_iter(tag) {
            elements.push(KeyElement::Text(tag[last..run.start()].to_string()));
            elements.push(KeyElement::Number(Numeric::from_digits(run.as_str())));
            last = run.end();
        }
        elements.push(KeyElement::Text(tag[last..].to_string()));

        // v1.23 and 1.23 are the same release
        if matches!(elements.first(), Some(KeyElement::Text(s)) if s.is_empty() || s == "v") {
            elements.remove(0);
        }

        let mut i = 0;
        while i < elements.len() {
            let marker = elements[i].priority();
            elements.insert(i, KeyElement::Marker(marker));
            i += 3;
        }

        SortKey(elements)
    }

    pub fn elements(&self) -> &[KeyElement] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

/// Comparison key for a tag string
pub fn sort_key(tag: &str) -> SortKey {
    SortKey::new(tag)
}

/// Total order over tag strings.
///
/// Usable directly with `sort_by`: `tags.sort_by(|a, b| cmp_tags(a, b))`.
pub fn cmp_tags(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Sort tags ascending (oldest first)
pub fn sort_tags<S: AsRef<str>>(tags: &mut [S]) {
    tags.sort_by_cached_key(|t| sort_key(t.as_ref()));
}

/// Greatest tag under [cmp_tags]; on ties the later tag wins
pub fn max_tag<I, S>(tags: I) -> Option<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| (sort_key(t.as_ref()), t))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, t)| t)
}
