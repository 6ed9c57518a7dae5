//! Monthly-return projection for charting.

use rust_decimal::Decimal;

const MONTHS: usize = 12;

/// Project a starting amount over one year at an annual rate of return.
///
/// Returns 13 points: the starting amount followed by one value per month,
/// growing by a flat monthly increment. Both the year-end amount and the
/// monthly increment are floored to whole units, so the curve matches what
/// the dashboard chart plots rather than a compound-interest ideal.
#[must_use]
pub fn monthly_projection(amount: Decimal, rate_of_return: Decimal) -> Vec<Decimal> {
    let start = amount.floor();
    let after_year = (start + start * rate_of_return / Decimal::ONE_HUNDRED).floor();
    let monthly = ((after_year - start) / Decimal::from(MONTHS as u32)).floor();

    let mut points = Vec::with_capacity(MONTHS + 1);
    points.push(start);
    for month in 1..=MONTHS {
        points.push(points[month - 1] + monthly);
    }
    points
}
