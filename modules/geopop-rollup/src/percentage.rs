use serde::Serialize;

/// City / non-city percentage pair derived from a total and a part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentSplit {
    pub city: f64,
    pub non_city: f64,
}

impl PercentSplit {
    /// A zero total is not an error: it yields 0% city and 100% non-city,
    /// since the non-city side is always the complement of the city side.
    pub fn of(total: u64, part: u64) -> Self {
        let city = if total > 0 {
            part as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        Self {
            city,
            non_city: 100.0 - city,
        }
    }

    /// Same split, each side rounded half-up to `places` decimals from the
    /// integer inputs, matching column-wise SQL `ROUND` on exact decimals.
    pub fn rounded(total: u64, part: u64, places: u32) -> Self {
        if total == 0 {
            return Self::of(0, part);
        }
        let part = i128::from(part);
        Self {
            city: percent_half_up(part, total, places),
            non_city: percent_half_up(i128::from(total) - part, total, places),
        }
    }
}

/// `numerator * 100 / denominator` rounded half away from zero to `places`
/// decimals. Exact: the division happens on integers, so a ratio landing on
/// a `.5` in the last place always rounds outward. Zero denominator yields 0.
pub fn percent_half_up(numerator: i128, denominator: u64, places: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let scale = 10i128.pow(places);
    let denominator = u128::from(denominator);
    let scaled = numerator.saturating_mul(100 * scale);
    let abs = scaled.unsigned_abs();
    let (quotient, remainder) = (abs / denominator, abs % denominator);
    // remainder < denominator <= u64::MAX, so doubling it cannot overflow.
    let magnitude = quotient + u128::from(2 * remainder >= denominator);
    let units = magnitude as f64 / scale as f64;
    if scaled < 0 {
        -units
    } else {
        units
    }
}
