//! Flat request parameters, as a form or command line supplies them.
//!
//! [`RequestParams`] carries one string per input, with the usual defaults.
//! [`RequestParams::into_request`] validates the selectors and reads only
//! the inputs of the selected mode, so 3-circle inputs never leak into a
//! 2-circle diagram and vice versa.

use std::collections::BTreeMap;

use log::debug;

use crate::{
    VennError,
    request::{CircleCount, DiagramRequest, ExportFormat, Region, Resolution},
};

/// Every input of a render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    /// `"2"` or `"3"`
    pub mode: String,
    pub left_label: String,
    /// Ignored in 2-circle mode
    pub middle_label: String,
    pub right_label: String,

    pub left_only_2: String,
    pub right_only_2: String,
    pub both: String,

    pub left_only: String,
    pub middle_only: String,
    pub right_only: String,
    pub left_middle: String,
    pub left_right: String,
    pub middle_right: String,
    pub all_three: String,

    /// `"png"` or `"svg"`
    pub export_format: String,
    /// Raster resolution, 72 to 600
    pub dpi: u32,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            mode: "3".to_string(),
            left_label: "Set A".to_string(),
            middle_label: "Set B".to_string(),
            right_label: "Set C".to_string(),
            left_only_2: String::new(),
            right_only_2: String::new(),
            both: String::new(),
            left_only: String::new(),
            middle_only: String::new(),
            right_only: String::new(),
            left_middle: String::new(),
            left_right: String::new(),
            middle_right: String::new(),
            all_three: String::new(),
            export_format: "png".to_string(),
            dpi: u32::from(Resolution::default().dpi()),
        }
    }
}

impl RequestParams {
    /// Validates the parameters into a [`DiagramRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`VennError::Config`] for an unknown mode or export format,
    /// or a dpi outside `[72, 600]`.
    ///
    /// ```
    /// # use venndraw::params::RequestParams;
    /// let params = RequestParams {
    ///     mode: "2".into(),
    ///     both: "shared".into(),
    ///     ..RequestParams::default()
    /// };
    /// let request = params.into_request().unwrap();
    /// assert_eq!(request.set_labels(), ["Set A", "Set C"]);
    /// ```
    pub fn into_request(self) -> Result<DiagramRequest, VennError> {
        let circle_count: CircleCount = self.mode.parse()?;
        let export_format: ExportFormat = self.export_format.parse()?;
        let resolution = Resolution::new(self.dpi)?;

        let (labels, terms) = match circle_count {
            CircleCount::Two => (
                vec![self.left_label, self.right_label],
                vec![
                    (Region::LeftOnly, self.left_only_2),
                    (Region::RightOnly, self.right_only_2),
                    (Region::Both, self.both),
                ],
            ),
            CircleCount::Three => (
                vec![self.left_label, self.middle_label, self.right_label],
                vec![
                    (Region::LeftOnly, self.left_only),
                    (Region::MiddleOnly, self.middle_only),
                    (Region::RightOnly, self.right_only),
                    (Region::LeftMiddle, self.left_middle),
                    (Region::LeftRight, self.left_right),
                    (Region::MiddleRight, self.middle_right),
                    (Region::AllThree, self.all_three),
                ],
            ),
        };
        debug!(mode:% = circle_count, format:% = export_format, dpi = resolution.dpi(); "Request parameters validated");

        DiagramRequest::new(
            circle_count,
            labels,
            terms.into_iter().collect::<BTreeMap<_, _>>(),
            export_format,
            resolution,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = RequestParams::default().into_request().unwrap();
        assert_eq!(request.circle_count(), CircleCount::Three);
        assert_eq!(request.set_labels(), ["Set A", "Set B", "Set C"]);
        assert_eq!(request.export_format(), ExportFormat::Png);
        assert_eq!(request.resolution().dpi(), 300);
        assert!(request.terms_in_canonical_order().iter().all(|raw| raw.is_empty()));
    }

    #[test]
    fn test_two_circle_mode_ignores_three_circle_inputs() {
        let params = RequestParams {
            mode: "2".into(),
            left_only_2: "x,y,z".into(),
            both: "q".into(),
            left_only: "LEAK".into(),
            all_three: "LEAK".into(),
            middle_label: "Middle".into(),
            ..RequestParams::default()
        };
        let request = params.into_request().unwrap();

        assert_eq!(request.terms_in_canonical_order(), ["x,y,z", "", "q"]);
        assert_eq!(request.set_labels(), ["Set A", "Set C"]);
    }

    #[test]
    fn test_three_circle_mode_ignores_two_circle_inputs() {
        let params = RequestParams {
            left_only_2: "LEAK".into(),
            both: "LEAK".into(),
            all_three: "ALPHA".into(),
            ..RequestParams::default()
        };
        let request = params.into_request().unwrap();
        assert_eq!(request.terms(Region::AllThree), "ALPHA");
        assert!(
            request
                .terms_in_canonical_order()
                .iter()
                .all(|raw| !raw.contains("LEAK"))
        );
    }

    #[test]
    fn test_invalid_selectors() {
        for params in [
            RequestParams {
                mode: "4".into(),
                ..RequestParams::default()
            },
            RequestParams {
                export_format: "gif".into(),
                ..RequestParams::default()
            },
            RequestParams {
                dpi: 1200,
                ..RequestParams::default()
            },
            RequestParams {
                dpi: 10,
                ..RequestParams::default()
            },
        ] {
            assert!(matches!(params.into_request(), Err(VennError::Config(_))));
        }
    }
}
