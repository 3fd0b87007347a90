//! Completion percentage of a material checklist.

use super::material::MaterialRequirement;

/// Percent of required materials obtained, 0..=100.
///
/// Each row contributes at most its `required` count, so surplus on one
/// material never makes up for a shortfall on another. An empty checklist,
/// or one whose rows all require 0, counts as complete.
pub fn percent(materials: &[MaterialRequirement]) -> u8 {
    if materials.is_empty() {
        return 100;
    }

    let (obtained, required) = materials.iter().fold((0u64, 0u64), |(obtained, required), m| {
        (
            obtained + u64::from(m.obtained.min(m.required)),
            required + u64::from(m.required),
        )
    });

    if required == 0 {
        return 100;
    }

    // round half up
    ((obtained * 200 + required) / (required * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(required: u32, obtained: u32) -> MaterialRequirement {
        MaterialRequirement {
            obtained,
            ..MaterialRequirement::new("Wolfhook", required)
        }
    }

    #[test]
    fn test_empty_is_complete() {
        assert_eq!(percent(&[]), 100);
    }

    #[test]
    fn test_single_row() {
        assert_eq!(percent(&[row(10, 0)]), 0);
        assert_eq!(percent(&[row(10, 5)]), 50);
        assert_eq!(percent(&[row(10, 999)]), 100);
    }

    #[test]
    fn test_zero_required_rows() {
        assert_eq!(percent(&[row(0, 0), row(0, 4)]), 100);
    }

    #[test]
    fn test_surplus_does_not_cover_shortfall() {
        // 10/10 + 0/10 -> 50, not 100
        assert_eq!(percent(&[row(10, 30), row(10, 0)]), 50);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(percent(&[row(3, 1)]), 33);
        assert_eq!(percent(&[row(3, 2)]), 67);
        assert_eq!(percent(&[row(8, 1)]), 13); // 12.5 rounds up
    }
}
