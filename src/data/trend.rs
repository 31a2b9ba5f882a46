//! Year-series helpers shared by every view

use serde::Serialize;

/// Records that belong to a reporting year
pub trait HasYear {
    fn year(&self) -> i32;
}

/// Sort records ascending by year. Stable, so same-year rows keep API order.
pub fn sort_by_year<T: HasYear>(items: &mut [T]) {
    items.sort_by_key(|item| item.year());
}

/// Most recent year present in the data
pub fn latest_year<T: HasYear>(items: &[T]) -> Option<i32> {
    items.iter().map(HasYear::year).max()
}

/// Round to a number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `part / whole × 100`, rounded; 0 when `whole` is 0
pub fn percentage(part: f64, whole: f64, decimals: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_to(part / whole * 100.0, decimals)
}

/// Weighted mean of `(value, weight)` pairs; `None` when the weights sum to 0
pub fn weighted_average<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (sum, weight) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(sum, weight), (v, w)| (sum + v * w, weight + w));

    if weight == 0.0 {
        None
    } else {
        Some(sum / weight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

impl YearValue {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

impl HasYear for YearValue {
    fn year(&self) -> i32 {
        self.year
    }
}

/// A value with its change from the previous available year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearDelta {
    pub year: i32,
    pub value: f64,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
}

/// Year-over-year deltas, sorted ascending by year.
///
/// Gaps are not filled: the change for a year is measured against the
/// previous year present in the input.
pub fn year_over_year(values: &[YearValue]) -> Vec<YearDelta> {
    let mut sorted = values.to_vec();
    sort_by_year(&mut sorted);

    let mut previous: Option<f64> = None;
    sorted
        .into_iter()
        .map(|yv| {
            let change = previous.map(|p| round_to(yv.value - p, 2));
            let percent_change = previous
                .filter(|p| *p != 0.0)
                .map(|p| percentage(yv.value - p, p, 1));
            previous = Some(yv.value);
            YearDelta {
                year: yv.year,
                value: yv.value,
                change,
                percent_change,
            }
        })
        .collect()
}
