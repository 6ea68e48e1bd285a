//! Day selection and reshaping of the provider's forecast.

use chrono::NaiveDate;

use crate::{
    error::Rejection,
    model::{ForecastItem, Temperature, Wind},
    upstream::{UpstreamForecast, UpstreamItem},
};

/// Where a requested date lands in the provider's forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayIndex {
    Day(usize),
    /// Past the last day the provider covers.
    OutOfRange,
}

/// Map a requested date onto an index into the upstream items.
///
/// Dates before `today` clamp to index 0.
pub fn resolve_day_index(requested: NaiveDate, today: NaiveDate, item_count: usize) -> DayIndex {
    let delta = requested.signed_duration_since(today).num_days();

    if delta < 0 {
        return DayIndex::Day(0);
    }

    match usize::try_from(delta) {
        Ok(index) if index < item_count => DayIndex::Day(index),
        _ => DayIndex::OutOfRange,
    }
}

/// Pick the forecast days to return.
///
/// Without a date, or with a date beyond the provider's window, every day is
/// returned in upstream order. Otherwise only the matching day is returned.
pub fn select_forecast(
    upstream: &UpstreamForecast,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<ForecastItem>, Rejection> {
    let items = &upstream.forecast.items;

    let index = match date {
        Some(raw) => {
            let requested = parse_date(raw)?;
            resolve_day_index(requested, today, items.len())
        }
        None => DayIndex::OutOfRange,
    };

    Ok(match index {
        // `get` keeps an empty forecast from panicking on the clamped index.
        DayIndex::Day(i) => items.get(i).map(map_item).into_iter().collect(),
        DayIndex::OutOfRange => items.iter().map(map_item).collect(),
    })
}

pub fn map_item(item: &UpstreamItem) -> ForecastItem {
    ForecastItem {
        date: item.date.clone(),
        timestamp: item.date_with_timezone.clone(),
        description: item.weather.text.clone(),
        prec_probability: item.prec.probability.clone(),
        temperature: Temperature {
            min_c: item.temperature.min.clone(),
            max_c: item.temperature.max.clone(),
        },
        wind: Wind {
            wind_direction: item.wind.direction.clone(),
            min_speed_kph: item.wind.min.clone(),
            max_speed_kph: item.wind.max.clone(),
            gusts_value_kph: item.wind.gusts.value.clone(),
        },
    }
}

/// Strict `YYYY-MM-DD`: zero-padded, no sign, no surrounding whitespace.
fn parse_date(raw: &str) -> Result<NaiveDate, Rejection> {
    let invalid = || Rejection::InvalidDate(raw.to_string());

    let well_shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}
