//! Region formatter: writes user terms into the region text handles.

use log::{debug, trace};

use venndraw_core::draw::FontStyle;

use crate::{canvas::TextHandle, terms::TermList};

/// Styling and capacity of region text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionFormatter {
    max_visible: usize,
    font_size: u16,
    font_style: FontStyle,
}

impl RegionFormatter {
    /// Creates a formatter showing at most `max_visible` terms per region.
    pub fn new(max_visible: usize, font_size: u16) -> Self {
        Self {
            max_visible,
            font_size,
            font_style: FontStyle::Italic,
        }
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Fills `handles` from the parallel `raw_terms`, both in canonical
    /// region order.
    ///
    /// Missing handles are skipped. A handle whose raw string has no terms
    /// is cleared, so the engine's placeholder never shows. Returns the
    /// number of regions that received text.
    pub fn apply(&self, handles: &mut [Option<TextHandle>], raw_terms: &[&str]) -> usize {
        let mut filled = 0;

        for (ordinal, (handle, raw)) in handles.iter_mut().zip(raw_terms).enumerate() {
            let Some(handle) = handle else {
                debug!(ordinal; "Region has no label handle, skipping");
                continue;
            };

            let terms = TermList::parse(raw);
            if terms.is_empty() {
                handle.clear();
                continue;
            }

            let display = terms.display(self.max_visible);
            trace!(ordinal, term_count = terms.len(), display:?; "Region text set");

            let definition = handle.definition_mut();
            definition.set_font_size(self.font_size);
            definition.set_font_style(self.font_style);
            handle.set_text(display);
            filled += 1;
        }

        filled
    }
}

#[cfg(test)]
mod tests {
    use venndraw_core::{draw::TextDefinition, geometry::Point};

    use super::*;

    fn placeholder_handles(count: usize) -> Vec<Option<TextHandle>> {
        (0..count)
            .map(|i| {
                Some(TextHandle::new(
                    "1",
                    Point::new(i as f32, 0.0),
                    TextDefinition::new(),
                ))
            })
            .collect()
    }

    fn texts(handles: &[Option<TextHandle>]) -> Vec<Option<&str>> {
        handles
            .iter()
            .map(|handle| handle.as_ref().map(TextHandle::text))
            .collect()
    }

    #[test]
    fn test_empty_raw_clears_placeholder() {
        let mut handles = placeholder_handles(3);
        let filled = RegionFormatter::new(7, 10).apply(&mut handles, &["x,y,z", "", "q"]);

        assert_eq!(filled, 2);
        assert_eq!(texts(&handles), [Some("x\ny\nz"), Some(""), Some("q")]);
    }

    #[test]
    fn test_whitespace_only_raw_clears() {
        let mut handles = placeholder_handles(2);
        RegionFormatter::new(5, 9).apply(&mut handles, &["  , \n ", "a"]);
        assert_eq!(texts(&handles), [Some(""), Some("a")]);
    }

    #[test]
    fn test_missing_handle_is_skipped() {
        let mut handles = placeholder_handles(3);
        handles[1] = None;
        let filled = RegionFormatter::new(5, 9).apply(&mut handles, &["a", "b", "c"]);

        assert_eq!(filled, 2);
        assert_eq!(texts(&handles), [Some("a"), None, Some("c")]);
    }

    #[test]
    fn test_region_styling_applied() {
        let mut handles = placeholder_handles(1);
        RegionFormatter::new(5, 9).apply(&mut handles, &["a"]);

        let definition = handles[0].as_ref().unwrap().definition();
        assert_eq!(definition.font_size(), 9);
        assert_eq!(definition.font_style(), FontStyle::Italic);
    }

    #[test]
    fn test_truncates_to_capacity() {
        let mut handles = placeholder_handles(1);
        RegionFormatter::new(5, 9).apply(&mut handles, &["1,2,3,4,5,6,7"]);
        assert_eq!(texts(&handles), [Some("1\n2\n3\n4\n5\n+2 more")]);
    }
}
