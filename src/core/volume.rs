//! Compatibility tiers for listing volume vs. recycler capacity.
//!
//! Volumes and capacities arrive as free text ("50 tons", "1200 kg/week").
//! Parsing is permissive: the first run of digits is the amount, units are
//! ignored, and anything unparseable contributes nothing.

/// Extract the first integer substring from a free-text quantity.
///
/// Returns `None` when the text contains no digits.
#[inline]
pub fn leading_amount(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<f64>().ok()
}

/// Calculate the volume compatibility coefficient.
///
/// Tiers reward recyclers whose stated capacity comfortably covers the
/// listing volume, with decaying confidence when the listing overshoots:
/// * listing <= capacity         -> 1.0
/// * listing <= capacity * 1.2   -> 0.7
/// * listing <= capacity * 1.5   -> 0.4
/// * otherwise                   -> 0.0
///
/// Either amount failing to parse yields 0.0, never an error.
#[inline]
pub fn volume_compatibility(listing_volume: &str, recycler_capacity: &str) -> f64 {
    let (volume, capacity) = match (leading_amount(listing_volume), leading_amount(recycler_capacity)) {
        (Some(v), Some(c)) => (v, c),
        _ => return 0.0,
    };

    if volume <= capacity {
        1.0
    } else if volume <= capacity * 1.2 {
        0.7
    } else if volume <= capacity * 1.5 {
        0.4
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_amount() {
        assert_eq!(leading_amount("50 tons"), Some(50.0));
        assert_eq!(leading_amount("approx 1200 kg"), Some(1200.0));
        assert_eq!(leading_amount("no digits here"), None);
        assert_eq!(leading_amount(""), None);
    }

    #[test]
    fn test_leading_amount_stops_at_first_run() {
        // Only the first digit run counts; separators end it
        assert_eq!(leading_amount("1,000 kg"), Some(1.0));
        assert_eq!(leading_amount("10-20 tons"), Some(10.0));
    }

    #[test]
    fn test_compatibility_tiers() {
        assert_eq!(volume_compatibility("90 tons", "100 tons"), 1.0);
        assert_eq!(volume_compatibility("110 tons", "100 tons"), 0.7);
        assert_eq!(volume_compatibility("140 tons", "100 tons"), 0.4);
        assert_eq!(volume_compatibility("200 tons", "100 tons"), 0.0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(volume_compatibility("100", "100"), 1.0);
        assert_eq!(volume_compatibility("120", "100"), 0.7);
        assert_eq!(volume_compatibility("150", "100"), 0.4);
        assert_eq!(volume_compatibility("151", "100"), 0.0);
    }

    #[test]
    fn test_malformed_text_scores_zero() {
        assert_eq!(volume_compatibility("a few pallets", "100 tons"), 0.0);
        assert_eq!(volume_compatibility("50 tons", "unknown"), 0.0);
        assert_eq!(volume_compatibility("", ""), 0.0);
    }

    #[test]
    fn test_units_are_ignored() {
        // Parsing is not unit-aware: 50 of anything vs 60 of anything
        assert_eq!(volume_compatibility("50 kg", "60 tons"), 1.0);
    }
}
