//! 雪判定

use crate::config::SNOW_CODES;

/// Returns `true` if the WMO code denotes snowfall.
///
/// A missing code is never snow.
#[must_use]
pub fn is_snow_code(code: Option<i64>) -> bool {
  code.is_some_and(|c| SNOW_CODES.contains(&c))
}

/// First date whose code is in the snow set.
///
/// `dates` and `codes` are paired by position in the order given; entries
/// without a counterpart are ignored.
#[must_use]
pub fn first_snow_date(dates: &[String], codes: &[Option<i64>]) -> Option<String> {
  dates
    .iter()
    .zip(codes)
    .find(|(_, code)| is_snow_code(**code))
    .map(|(date, _)| date.clone())
}
