//! Request and result types for a single diagram render.
//!
//! A [`DiagramRequest`] is validated on construction: the set labels match
//! the circle count and the region map covers exactly the regions of that
//! topology. Everything downstream relies on those invariants.

use std::{collections::BTreeMap, fmt, path::PathBuf, str::FromStr};

use crate::VennError;

/// Number of circles in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleCount {
    Two,
    Three,
}

impl CircleCount {
    /// Number of circles as an integer.
    pub fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Regions of this topology in the layout engine's canonical order.
    ///
    /// The order follows the region membership mask (left = 1, then
    /// middle = 2, right = 4 for three circles), which interleaves single,
    /// pair and triple regions.
    pub fn regions(self) -> &'static [Region] {
        match self {
            Self::Two => &[Region::LeftOnly, Region::RightOnly, Region::Both],
            Self::Three => &[
                Region::LeftOnly,
                Region::MiddleOnly,
                Region::LeftMiddle,
                Region::RightOnly,
                Region::LeftRight,
                Region::MiddleRight,
                Region::AllThree,
            ],
        }
    }
}

impl FromStr for CircleCount {
    type Err = VennError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            other => Err(VennError::Config(format!(
                "invalid mode `{other}`, expected \"2\" or \"3\""
            ))),
        }
    }
}

impl fmt::Display for CircleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl ExportFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = VennError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(VennError::Config(format!(
                "invalid export format `{other}`, expected \"png\" or \"svg\""
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Raster resolution in dots per inch, within `[72, 600]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution(u16);

impl Resolution {
    pub const MIN_DPI: u16 = 72;
    pub const MAX_DPI: u16 = 600;

    /// Creates a resolution, rejecting values outside `[72, 600]`.
    ///
    /// ```
    /// # use venndraw::request::Resolution;
    /// assert_eq!(Resolution::new(300).unwrap().dpi(), 300);
    /// assert!(Resolution::new(999).is_err());
    /// ```
    pub fn new(dpi: u32) -> Result<Self, VennError> {
        u16::try_from(dpi)
            .ok()
            .filter(|dpi| (Self::MIN_DPI..=Self::MAX_DPI).contains(dpi))
            .map(Self)
            .ok_or_else(|| {
                VennError::Config(format!(
                    "dpi {dpi} is out of range [{}, {}]",
                    Self::MIN_DPI,
                    Self::MAX_DPI
                ))
            })
    }

    pub fn dpi(self) -> u16 {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self(300)
    }
}

/// A logical region of a 2- or 3-circle diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    LeftOnly,
    MiddleOnly,
    RightOnly,
    LeftMiddle,
    LeftRight,
    MiddleRight,
    /// Overlap of the two circles of a 2-circle diagram
    Both,
    AllThree,
}

impl Region {
    pub fn name(self) -> &'static str {
        match self {
            Self::LeftOnly => "left only",
            Self::MiddleOnly => "middle only",
            Self::RightOnly => "right only",
            Self::LeftMiddle => "left and middle",
            Self::LeftRight => "left and right",
            Self::MiddleRight => "middle and right",
            Self::Both => "both",
            Self::AllThree => "all three",
        }
    }

    /// Bit mask of the circles containing this region, with bit `i` set for
    /// the `i`-th circle of `circles` (left, then middle, then right).
    ///
    /// Returns `None` when the region is not part of that topology.
    pub fn membership(self, circles: CircleCount) -> Option<u8> {
        match (circles, self) {
            (CircleCount::Two, Self::LeftOnly) => Some(0b01),
            (CircleCount::Two, Self::RightOnly) => Some(0b10),
            (CircleCount::Two, Self::Both) => Some(0b11),
            (CircleCount::Three, Self::LeftOnly) => Some(0b001),
            (CircleCount::Three, Self::MiddleOnly) => Some(0b010),
            (CircleCount::Three, Self::LeftMiddle) => Some(0b011),
            (CircleCount::Three, Self::RightOnly) => Some(0b100),
            (CircleCount::Three, Self::LeftRight) => Some(0b101),
            (CircleCount::Three, Self::MiddleRight) => Some(0b110),
            (CircleCount::Three, Self::AllThree) => Some(0b111),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to render one diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramRequest {
    circle_count: CircleCount,
    set_labels: Vec<String>,
    terms: BTreeMap<Region, String>,
    export_format: ExportFormat,
    resolution: Resolution,
}

impl DiagramRequest {
    /// Creates a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`VennError::Config`] when the number of set labels differs
    /// from the circle count, or when `terms` is not keyed by exactly the
    /// regions of the topology.
    pub fn new(
        circle_count: CircleCount,
        set_labels: Vec<String>,
        terms: BTreeMap<Region, String>,
        export_format: ExportFormat,
        resolution: Resolution,
    ) -> Result<Self, VennError> {
        if set_labels.len() != circle_count.count() {
            return Err(VennError::Config(format!(
                "{circle_count}-circle diagram needs {} set labels, got {}",
                circle_count.count(),
                set_labels.len()
            )));
        }

        let expected = circle_count.regions();
        let keys_match = terms.len() == expected.len()
            && expected.iter().all(|region| terms.contains_key(region));
        if !keys_match {
            let given: Vec<&str> = terms.keys().map(|region| region.name()).collect();
            return Err(VennError::Config(format!(
                "{circle_count}-circle diagram expects regions {:?}, got {given:?}",
                expected.iter().map(|region| region.name()).collect::<Vec<_>>()
            )));
        }

        Ok(Self {
            circle_count,
            set_labels,
            terms,
            export_format,
            resolution,
        })
    }

    pub fn circle_count(&self) -> CircleCount {
        self.circle_count
    }

    pub fn set_labels(&self) -> &[String] {
        &self.set_labels
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Raw term string of a region; empty for regions outside the topology.
    pub fn terms(&self, region: Region) -> &str {
        self.terms.get(&region).map(String::as_str).unwrap_or_default()
    }

    /// Raw term strings in the canonical region order.
    pub fn terms_in_canonical_order(&self) -> Vec<&str> {
        self.circle_count
            .regions()
            .iter()
            .map(|region| self.terms(*region))
            .collect()
    }
}

/// The image written for a request.
///
/// The file belongs to the caller; nothing in this crate deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    path: PathBuf,
    format: ExportFormat,
    resolution: Option<Resolution>,
}

impl RenderedDiagram {
    pub(crate) fn new(path: PathBuf, format: ExportFormat, resolution: Option<Resolution>) -> Self {
        Self {
            path,
            format,
            resolution,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Resolution of raster output; `None` for SVG.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms_for(circles: CircleCount) -> BTreeMap<Region, String> {
        circles
            .regions()
            .iter()
            .map(|region| (*region, String::new()))
            .collect()
    }

    #[test]
    fn test_canonical_order_follows_membership_mask() {
        for circles in [CircleCount::Two, CircleCount::Three] {
            for (ordinal, region) in circles.regions().iter().enumerate() {
                assert_eq!(
                    region.membership(circles),
                    Some(ordinal as u8 + 1),
                    "{region} out of place in {circles}-circle order"
                );
            }
        }
    }

    #[test]
    fn test_three_circle_order_interleaves() {
        let names: Vec<&str> = CircleCount::Three
            .regions()
            .iter()
            .map(|region| region.name())
            .collect();
        assert_eq!(
            names,
            [
                "left only",
                "middle only",
                "left and middle",
                "right only",
                "left and right",
                "middle and right",
                "all three"
            ]
        );
    }

    #[test]
    fn test_membership_outside_topology() {
        assert_eq!(Region::Both.membership(CircleCount::Three), None);
        assert_eq!(Region::AllThree.membership(CircleCount::Two), None);
        assert_eq!(Region::MiddleOnly.membership(CircleCount::Two), None);
    }

    #[test]
    fn test_mode_and_format_parsing() {
        assert_eq!("2".parse::<CircleCount>().unwrap(), CircleCount::Two);
        assert_eq!("3".parse::<CircleCount>().unwrap(), CircleCount::Three);
        assert!(matches!("4".parse::<CircleCount>(), Err(VennError::Config(_))));

        assert_eq!("svg".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
        assert!(matches!("jpg".parse::<ExportFormat>(), Err(VennError::Config(_))));
        assert!(matches!("PNG".parse::<ExportFormat>(), Err(VennError::Config(_))));
    }

    #[test]
    fn test_resolution_bounds() {
        assert_eq!(Resolution::new(72).unwrap().dpi(), 72);
        assert_eq!(Resolution::new(600).unwrap().dpi(), 600);
        assert!(Resolution::new(71).is_err());
        assert!(Resolution::new(601).is_err());
        assert!(Resolution::new(u32::MAX).is_err());
        assert_eq!(Resolution::default().dpi(), 300);
    }

    #[test]
    fn test_request_rejects_wrong_label_count() {
        let result = DiagramRequest::new(
            CircleCount::Two,
            vec!["A".into(), "B".into(), "C".into()],
            terms_for(CircleCount::Two),
            ExportFormat::Png,
            Resolution::default(),
        );
        assert!(matches!(result, Err(VennError::Config(_))));
    }

    #[test]
    fn test_request_rejects_foreign_regions() {
        let mut terms = terms_for(CircleCount::Two);
        terms.insert(Region::AllThree, "x".into());
        let result = DiagramRequest::new(
            CircleCount::Two,
            vec!["A".into(), "B".into()],
            terms,
            ExportFormat::Png,
            Resolution::default(),
        );
        assert!(matches!(result, Err(VennError::Config(_))));
    }

    #[test]
    fn test_request_rejects_missing_regions() {
        let mut terms = terms_for(CircleCount::Three);
        terms.remove(&Region::AllThree);
        let result = DiagramRequest::new(
            CircleCount::Three,
            vec!["A".into(), "B".into(), "C".into()],
            terms,
            ExportFormat::Svg,
            Resolution::default(),
        );
        assert!(matches!(result, Err(VennError::Config(_))));
    }

    #[test]
    fn test_terms_in_canonical_order() {
        let mut terms = terms_for(CircleCount::Two);
        terms.insert(Region::Both, "q".into());
        terms.insert(Region::LeftOnly, "x,y".into());
        let request = DiagramRequest::new(
            CircleCount::Two,
            vec!["A".into(), "B".into()],
            terms,
            ExportFormat::Png,
            Resolution::default(),
        )
        .unwrap();

        assert_eq!(request.terms_in_canonical_order(), ["x,y", "", "q"]);
        assert_eq!(request.terms(Region::AllThree), "");
    }
}
