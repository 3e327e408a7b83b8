//! Display-name resolution
//!
//! Every column in a model needs a human-readable label that is unique across
//! the whole document. The first column with a given collision key keeps its
//! plain title; later ones are prefixed with their table's title.

use std::collections::HashSet;

const SEPARATORS: [char; 2] = ['_', '-'];

/// Collision key: trimmed, lower-cased, separators and inner whitespace
/// removed. `ORDER_ID`, `order-id` and `Order Id` share one key.
pub fn normalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !SEPARATORS.contains(c) && !c.is_whitespace())
        .collect()
}

/// Replace separators with spaces and capitalise each word.
///
/// A letter is upper-cased when it follows a non-letter and lower-cased
/// otherwise, so `CUSTOMER_ID` becomes `Customer Id` and `sku2code` becomes
/// `Sku2Code`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_letter = false;
    for c in name.trim().chars() {
        let c = if SEPARATORS.contains(&c) { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Assigns unique display labels in processing order
///
/// Callers feed `(table, column)` pairs in dataset order, then column order.
///
/// # Example
///
/// ```rust
/// use dataset_model_sdk::inference::DisplayNameResolver;
///
/// let mut resolver = DisplayNameResolver::new();
/// assert_eq!(resolver.resolve("ORDERS", "STATUS"), "Status");
/// assert_eq!(resolver.resolve("RETURNS", "STATUS"), "Returns Status");
/// ```
#[derive(Debug, Default)]
pub struct DisplayNameResolver {
    seen_keys: HashSet<String>,
    used_labels: HashSet<String>,
}

impl DisplayNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the label for one column.
    ///
    /// If prefixing still collides (two source tables cleaning to the same
    /// identifier), a numeric suffix is appended until the label is free.
    pub fn resolve(&mut self, table: &str, column: &str) -> String {
        let key = normalize_column_name(column);
        let title = title_case(column);

        let candidate = if self.seen_keys.insert(key) {
            title
        } else {
            format!("{} {}", title_case(table), title)
        };

        let mut label = candidate.clone();
        let mut n = 2;
        while !self.used_labels.insert(label.to_lowercase()) {
            label = format!("{} {}", candidate, n);
            n += 1;
        }
        label
    }
}

/// Resolve labels for a whole ordered sequence of `(table, column)` pairs
pub fn resolve_display_names<'a, I>(pairs: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut resolver = DisplayNameResolver::new();
    pairs
        .into_iter()
        .map(|(table, column)| resolver.resolve(table, column))
        .collect()
}
