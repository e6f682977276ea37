//! Term parsing and truncation for region text.
//!
//! A raw region string is a free-form list of terms separated by commas
//! and/or newlines. [`TermList`] holds the trimmed, non-empty terms in input
//! order; [`TermList::display`] fits them into a fixed number of visible
//! lines, summarising the overflow as `+N more`.

/// Trimmed, non-empty terms of one region, in input order.
///
/// Duplicates are kept and nothing is sorted.
///
/// ```
/// # use venndraw::terms::TermList;
/// let terms = TermList::parse(" alpha, beta\n\n gamma ,");
/// assert_eq!(terms.as_slice(), ["alpha", "beta", "gamma"]);
/// assert_eq!(terms.display(2), "alpha\nbeta\n+1 more");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermList {
    terms: Vec<String>,
}

impl TermList {
    /// Splits `raw` on commas and newlines, trims every piece and drops
    /// the empty ones.
    pub fn parse(raw: &str) -> Self {
        let terms = raw
            .split([',', '\n'])
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect();
        Self { terms }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Display string showing at most `max_visible` terms, one per line.
    ///
    /// When terms are hidden a final `+<hidden> more` line is appended.
    /// An empty list yields an empty string.
    pub fn display(&self, max_visible: usize) -> String {
        let visible = self.terms.len().min(max_visible);
        let mut lines: Vec<String> = self.terms[..visible].to_vec();

        let hidden = self.terms.len() - visible;
        if hidden > 0 {
            lines.push(overflow_marker(hidden));
        }

        lines.join("\n")
    }
}

fn overflow_marker(hidden: usize) -> String {
    format!("+{hidden} more")
}

/// Parses `raw` and renders it for a region with `max_visible` lines.
pub fn format_region_terms(raw: &str, max_visible: usize) -> String {
    TermList::parse(raw).display(max_visible)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Raw strings built from words, separators and padding.
    fn raw_terms_strategy() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            "[a-zA-Z0-9]{1,8}( [a-z]{1,5})?",
            Just(String::new()),
            Just("  ".to_string()),
        ];
        let separator = prop_oneof![Just(","), Just("\n"), Just(" , "), Just(",\n")];
        prop::collection::vec((piece, separator), 0..30).prop_map(|parts| {
            parts
                .into_iter()
                .map(|(piece, sep)| format!("{piece}{sep}"))
                .collect()
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Display lines are a prefix of the terms plus at most one marker.
    fn check_display_is_prefix_plus_marker(raw: &str, k: usize) -> Result<(), TestCaseError> {
        let terms = TermList::parse(raw);
        let display = terms.display(k);

        if terms.is_empty() {
            prop_assert_eq!(display, "");
            return Ok(());
        }

        let lines: Vec<&str> = display.split('\n').collect();
        if terms.len() <= k {
            prop_assert_eq!(lines.len(), terms.len());
            prop_assert_eq!(&lines[..], terms.as_slice());
        } else {
            prop_assert_eq!(lines.len(), k + 1);
            prop_assert_eq!(&lines[..k], &terms.as_slice()[..k]);
            prop_assert_eq!(lines[k], overflow_marker(terms.len() - k));
        }
        Ok(())
    }

    /// Parsed terms are trimmed and never empty.
    fn check_terms_trimmed_non_empty(raw: &str) -> Result<(), TestCaseError> {
        for term in TermList::parse(raw).as_slice() {
            prop_assert!(!term.is_empty());
            prop_assert_eq!(term.trim(), term.as_str());
            prop_assert!(!term.contains(',') && !term.contains('\n'));
        }
        Ok(())
    }

    /// K terms fit exactly; K + 1 terms hide exactly one.
    fn check_marker_boundary(k: usize) -> Result<(), TestCaseError> {
        let exact: Vec<String> = (0..k).map(|i| format!("t{i}")).collect();
        let display = format_region_terms(&exact.join(","), k);
        prop_assert!(!display.contains("more"));
        prop_assert_eq!(display.lines().count(), k);

        let over: Vec<String> = (0..=k).map(|i| format!("t{i}")).collect();
        let display = format_region_terms(&over.join("\n"), k);
        prop_assert!(display.ends_with("\n+1 more"));
        prop_assert_eq!(display.lines().count(), k + 1);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn display_is_prefix_plus_marker(raw in raw_terms_strategy(), k in 1usize..10) {
            check_display_is_prefix_plus_marker(&raw, k)?;
        }

        #[test]
        fn terms_trimmed_non_empty(raw in raw_terms_strategy()) {
            check_terms_trimmed_non_empty(&raw)?;
        }

        #[test]
        fn marker_boundary(k in 1usize..12) {
            check_marker_boundary(k)?;
        }
    }
}
