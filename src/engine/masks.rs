//! Turns a query's threshold conditions and a station record into the boolean
//! signals the scanner walks: one combined per-day mask for the instant
//! variables (temperature, wind) and one windowed signal for precipitation.

use crate::engine::error::QueryError;
use crate::types::condition::ThresholdCondition;
use crate::types::query::{MonthSelection, QuerySpec};
use crate::types::series::{DateAxis, StationDailyData};
use chrono::Datelike;
use log::debug;

/// The per-day signals a scan runs over. At least one is present for a valid
/// query.
pub(crate) struct ScanSignals {
    /// AND of the active instant-variable masks, month exclusion applied.
    pub instant: Option<Vec<bool>>,
    /// True where the accumulated precipitation satisfies its threshold and
    /// the window's boundary days fall in selected months.
    pub precipitation: Option<Vec<bool>>,
}

pub(crate) fn build_signals(
    spec: &QuerySpec,
    data: &StationDailyData,
) -> Result<ScanSignals, QueryError> {
    let selected = month_mask(&data.axis, spec.months)?;

    // Temperature: a cold extreme is judged by the day's minimum, a hot
    // extreme by the day's maximum.
    let temperature = match spec.temperature {
        ThresholdCondition::Any => None,
        ThresholdCondition::LowerThan(limit) => {
            Some(mask_with(&data.minimum_temperature, |x| x < limit)?)
        }
        ThresholdCondition::HigherThan(limit) => {
            Some(mask_with(&data.maximum_temperature, |x| x > limit)?)
        }
    };
    let wind = match spec.wind {
        ThresholdCondition::Any => None,
        ThresholdCondition::LowerThan(limit) => Some(mask_with(&data.windspeed, |x| x < limit)?),
        ThresholdCondition::HigherThan(limit) => Some(mask_with(&data.windspeed, |x| x > limit)?),
    };

    let mut instant = match (temperature, wind) {
        (Some(mut t), Some(w)) => {
            for (a, b) in t.iter_mut().zip(&w) {
                *a &= *b;
            }
            Some(t)
        }
        (Some(t), None) => Some(t),
        (None, Some(w)) => Some(w),
        (None, None) => None,
    };
    if let (Some(mask), Some(sel)) = (instant.as_mut(), selected.as_ref()) {
        for (m, s) in mask.iter_mut().zip(sel) {
            *m &= *s;
        }
    }

    let precipitation = match spec.precipitation {
        ThresholdCondition::Any => None,
        condition => {
            let window = spec.window();
            let acc = accumulate(&data.precipitation, window)?;
            let mut mask = match condition {
                ThresholdCondition::LowerThan(limit) => mask_with(&acc, |x| x < limit)?,
                ThresholdCondition::HigherThan(limit) => mask_with(&acc, |x| x > limit)?,
                ThresholdCondition::Any => unreachable!("matched above"),
            };
            if let Some(sel) = selected.as_ref() {
                // Only the window's boundary days gate eligibility; excluded
                // months inside the window are tolerated.
                for i in 0..mask.len() {
                    let start = i.saturating_sub(window - 1);
                    if !(sel[start] && sel[i]) {
                        mask[i] = false;
                    }
                }
            }
            Some(mask)
        }
    };

    debug!(
        "Built scan signals: instant={}, precipitation={}",
        instant.is_some(),
        precipitation.is_some()
    );
    Ok(ScanSignals {
        instant,
        precipitation,
    })
}

/// Trailing rolling sum of precipitation with the given window size.
///
/// `acc[i] = sum(precipitation[max(0, i - window + 1) ..= i])`: windows at the
/// start of the series are clamped to the available days rather than padded.
/// A window containing a missing sample accumulates to NaN, which fails any
/// threshold.
pub(crate) fn accumulate(precipitation: &[f64], window: usize) -> Result<Vec<f64>, QueryError> {
    debug_assert!(window >= 1);
    let mut acc = new_buffer(precipitation.len())?;
    let mut sum = 0.0;
    let mut missing = 0usize;
    for i in 0..precipitation.len() {
        let incoming = precipitation[i];
        if incoming.is_nan() {
            missing += 1;
        } else {
            sum += incoming;
        }
        if i >= window {
            let outgoing = precipitation[i - window];
            if outgoing.is_nan() {
                missing -= 1;
            } else {
                sum -= outgoing;
            }
        }
        acc.push(if missing > 0 { f64::NAN } else { sum });
    }
    Ok(acc)
}

/// Per-day mask from a predicate. NaN samples fail every comparison, so a
/// missing day never satisfies a condition.
fn mask_with(series: &[f64], pred: impl Fn(f64) -> bool) -> Result<Vec<bool>, QueryError> {
    let mut mask = new_buffer(series.len())?;
    mask.extend(series.iter().map(|&x| pred(x)));
    Ok(mask)
}

/// True per day whose calendar month is selected; `None` when all months are,
/// making the filter a no-op.
fn month_mask(axis: &DateAxis, months: MonthSelection) -> Result<Option<Vec<bool>>, QueryError> {
    if months.is_all() {
        return Ok(None);
    }
    let mut mask = new_buffer(axis.len())?;
    mask.extend(axis.days().map(|day| months.contains(day.month())));
    Ok(Some(mask))
}

/// Allocates a T-length scratch buffer, surfacing exhaustion as a typed error
/// instead of aborting.
fn new_buffer<T>(len: usize) -> Result<Vec<T>, QueryError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| QueryError::OutOfMemory)?;
    Ok(buffer)
}
