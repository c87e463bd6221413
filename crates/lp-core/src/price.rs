//! Price display and slider scale
//!
//! Prices are held in integer cents everywhere. The panel shows them as whole
//! dollars ("$1250"), truncating any cents.

use crate::range::PriceRange;

pub const CURRENCY_SYMBOL: char = '$';

/// Upper bound of the slider midpoint, in cents ($1000).
pub const MID_CAP_CENTS: u64 = 100_000;

/// Step above the slider midpoint, in cents ($500).
pub const UPPER_STEP_CENTS: u64 = 50_000;

/// Render cents as a truncated whole-dollar label.
pub fn format_price(cents: u64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, cents / 100)
}

/// Parse a price label back into cents.
///
/// Strips the currency symbol, whitespace and thousands separators, then drops
/// any fractional remainder. Returns `None` when no whole-dollar amount remains.
pub fn parse_price(label: &str) -> Option<u64> {
    let cleaned: String = label
        .chars()
        .filter(|c| *c != CURRENCY_SYMBOL && *c != ',' && !c.is_whitespace())
        .collect();
    let whole = cleaned.split('.').next().unwrap_or("");
    if whole.is_empty() {
        return None;
    }
    whole.parse::<u64>().ok()?.checked_mul(100)
}

// =============================================================================
// Slider Scale
// =============================================================================

/// Piecewise mapping between slider positions and prices.
///
/// The first half of the track covers `[min, mid]` linearly; the second half
/// covers `[mid, max]` in steps of [`UPPER_STEP_CENTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceScale {
    pub min_cents: u64,
    pub mid_cents: u64,
    pub max_cents: u64,
    pub upper_step_cents: u64,
}

impl PriceScale {
    /// Number of discrete slider positions (inclusive upper end).
    pub const STEPS: u32 = 1000;
    pub const HALF: u32 = Self::STEPS / 2;

    pub fn from_range(range: PriceRange) -> Self {
        let mid = MID_CAP_CENTS
            .min(range.max_cents / 2)
            .clamp(range.min_cents, range.max_cents);
        Self {
            min_cents: range.min_cents,
            mid_cents: mid,
            max_cents: range.max_cents,
            upper_step_cents: UPPER_STEP_CENTS,
        }
    }

    /// Slider start position: the maximum price, i.e. every listing visible.
    pub fn start_position(&self) -> u32 {
        Self::STEPS
    }

    /// Price at slider `position` (clamped to `0..=STEPS`).
    pub fn value_at(&self, position: u32) -> u64 {
        let position = position.min(Self::STEPS);
        if position >= Self::STEPS {
            return self.max_cents;
        }
        if position <= Self::HALF {
            return lerp(self.min_cents, self.mid_cents, position, Self::HALF);
        }

        let raw = lerp(self.mid_cents, self.max_cents, position - Self::HALF, Self::HALF);
        let step = self.upper_step_cents.max(1);
        let offset = raw - self.mid_cents;
        let snapped = self.mid_cents + ((offset + step / 2) / step) * step;
        snapped.min(self.max_cents)
    }
}

fn lerp(from: u64, to: u64, num: u32, den: u32) -> u64 {
    let span = (to - from) as u128;
    from + (span * num as u128 / den as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(min: u64, max: u64) -> PriceScale {
        PriceScale::from_range(PriceRange { min_cents: min, max_cents: max })
    }

    #[test]
    fn test_format_price_truncates() {
        assert_eq!(format_price(100000), "$1000");
        assert_eq!(format_price(123456), "$1234");
        assert_eq!(format_price(99), "$0");
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$1000"), Some(100000));
        assert_eq!(parse_price("$1,250.75"), Some(125000));
        assert_eq!(parse_price(" 42 "), Some(4200));
        assert_eq!(parse_price("$"), None);
        assert_eq!(parse_price("abc"), None);
    }

    #[test]
    fn test_format_then_parse_drops_cents() {
        assert_eq!(parse_price(&format_price(123456)), Some(123400));
    }

    #[test]
    fn test_midpoint_is_capped() {
        assert_eq!(scale(0, 1_000_000).mid_cents, MID_CAP_CENTS);
        assert_eq!(scale(0, 120_000).mid_cents, 60_000);
        // mid below min is pulled up to min
        assert_eq!(scale(150_000, 200_000).mid_cents, 150_000);
    }

    #[test]
    fn test_value_at_anchors() {
        let s = scale(20_000, 500_000);
        assert_eq!(s.value_at(0), 20_000);
        assert_eq!(s.value_at(PriceScale::HALF), 100_000);
        assert_eq!(s.value_at(PriceScale::STEPS), 500_000);
        assert_eq!(s.value_at(PriceScale::STEPS + 50), 500_000);
        assert_eq!(s.value_at(s.start_position()), 500_000);
    }

    #[test]
    fn test_upper_half_snaps_to_steps() {
        let s = scale(0, 1_000_000);
        let mut last = 0;
        for pos in 0..=PriceScale::STEPS {
            let value = s.value_at(pos);
            assert!(value >= last, "scale must be monotonic");
            if pos > PriceScale::HALF && value != s.max_cents {
                assert_eq!((value - s.mid_cents) % UPPER_STEP_CENTS, 0);
            }
            last = value;
        }
    }

    #[test]
    fn test_degenerate_range() {
        let s = scale(75_000, 75_000);
        assert_eq!(s.value_at(0), 75_000);
        assert_eq!(s.value_at(700), 75_000);
        assert_eq!(s.value_at(PriceScale::STEPS), 75_000);
    }
}
