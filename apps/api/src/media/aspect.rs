use serde::Serialize;

/// Layout class for a gallery image, chosen from its width/height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AspectBucket {
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:2")]
    Photo,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "2:3")]
    PortraitPhoto,
    #[serde(rename = "9:16")]
    Story,
    #[serde(rename = "21:9")]
    UltraWide,
    #[serde(rename = "1:2")]
    Tall,
}

/// Ordered bands, checked first to last; bounds are inclusive.
///
/// The 3:2 band sits at 1.40–1.45, so a true 1.5 photo falls through to the
/// widescreen default.
const BANDS: &[(f64, f64, AspectBucket)] = &[
    (1.70, 1.80, AspectBucket::Widescreen),
    (1.30, 1.35, AspectBucket::Standard),
    (0.95, 1.05, AspectBucket::Square),
    (0.74, 0.76, AspectBucket::Portrait),
    (0.55, 0.57, AspectBucket::Story),
    (1.40, 1.45, AspectBucket::Photo),
    (0.65, 0.67, AspectBucket::PortraitPhoto),
];

impl AspectBucket {
    /// Utility class the gallery applies to the image frame.
    pub fn layout_class(self) -> &'static str {
        match self {
            AspectBucket::Widescreen => "aspect-video",
            AspectBucket::Standard => "aspect-[4/3]",
            AspectBucket::Photo => "aspect-[3/2]",
            AspectBucket::Square => "aspect-square",
            AspectBucket::Portrait => "aspect-[3/4]",
            AspectBucket::PortraitPhoto => "aspect-[2/3]",
            AspectBucket::Story => "aspect-[9/16]",
            AspectBucket::UltraWide => "aspect-[21/9]",
            AspectBucket::Tall => "aspect-[1/2]",
        }
    }
}

/// Total over finite ratios: every input lands in exactly one bucket.
pub fn classify(ratio: f64) -> AspectBucket {
    if let Some(&(_, _, bucket)) = BANDS
        .iter()
        .find(|(lo, hi, _)| ratio >= *lo && ratio <= *hi)
    {
        return bucket;
    }
    if ratio > 1.80 {
        AspectBucket::UltraWide
    } else if ratio < 0.55 {
        AspectBucket::Tall
    } else if ratio > 1.0 {
        AspectBucket::Widescreen
    } else {
        AspectBucket::Portrait
    }
}

/// `None` for degenerate images with no height.
pub fn classify_dimensions(width: u32, height: u32) -> Option<AspectBucket> {
    if height == 0 {
        return None;
    }
    Some(classify(f64::from(width) / f64::from(height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_bands() {
        assert_eq!(classify(1.78), AspectBucket::Widescreen);
        assert_eq!(classify(4.0 / 3.0), AspectBucket::Standard);
        assert_eq!(classify(1.0), AspectBucket::Square);
        assert_eq!(classify(0.75), AspectBucket::Portrait);
        assert_eq!(classify(9.0 / 16.0), AspectBucket::Story);
        assert_eq!(classify(1.42), AspectBucket::Photo);
        assert_eq!(classify(0.66), AspectBucket::PortraitPhoto);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        assert_eq!(classify(1.70), AspectBucket::Widescreen);
        assert_eq!(classify(1.80), AspectBucket::Widescreen);
        assert_eq!(classify(0.95), AspectBucket::Square);
        assert_eq!(classify(1.05), AspectBucket::Square);
        assert_eq!(classify(0.55), AspectBucket::Story);
    }

    #[test]
    fn test_open_ended_arms() {
        assert_eq!(classify(2.0), AspectBucket::UltraWide);
        assert_eq!(classify(1.81), AspectBucket::UltraWide);
        assert_eq!(classify(0.4), AspectBucket::Tall);
    }

    #[test]
    fn test_gaps_fall_to_orientation_defaults() {
        // Between named bands.
        assert_eq!(classify(0.6), AspectBucket::Portrait);
        assert_eq!(classify(0.9), AspectBucket::Portrait);
        assert_eq!(classify(1.2), AspectBucket::Widescreen);
        assert_eq!(classify(1.5), AspectBucket::Widescreen);
        assert_eq!(classify(1.6), AspectBucket::Widescreen);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(classify_dimensions(1920, 1080), Some(AspectBucket::Widescreen));
        assert_eq!(classify_dimensions(1080, 1920), Some(AspectBucket::Story));
        assert_eq!(classify_dimensions(10, 0), None);
    }

    #[test]
    fn test_layout_classes() {
        assert_eq!(AspectBucket::default().layout_class(), "aspect-video");
        assert_eq!(AspectBucket::UltraWide.layout_class(), "aspect-[21/9]");
    }
}
