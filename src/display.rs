//! Terminal rendering of day-grouped forecasts
//!
//! Ordering happens here, not in the pipeline: day sections are printed in
//! ascending key order and rows within a day in ascending time order. Days
//! adjacent to the current date get a relative label.

use chrono::{Local, NaiveDate};

use crate::data::{Forecast, FormattedForecasts, DAY_FORMAT};

/// Offset between kelvin and degrees Celsius
const KELVIN_OFFSET: f64 = 273.15;

/// Renders the grouped forecasts as printable text
pub fn render_forecasts(forecasts: &FormattedForecasts) -> String {
    render_forecasts_relative_to(forecasts, Local::now().date_naive())
}

/// Renders the grouped forecasts with an explicit reference date
///
/// The reference date drives the Today/Yesterday/Tomorrow section labels;
/// `render_forecasts` passes the current date.
pub fn render_forecasts_relative_to(forecasts: &FormattedForecasts, today: NaiveDate) -> String {
    if forecasts.is_empty() {
        return "No forecasts available.\n".to_string();
    }

    let mut day_keys: Vec<&String> = forecasts.keys().collect();
    day_keys.sort();

    let mut output = String::new();
    for key in day_keys {
        output.push_str(&day_label(key, today));
        output.push('\n');

        let mut rows: Vec<&Forecast> = forecasts[key].iter().collect();
        rows.sort_by_key(|forecast| forecast.datetime);

        for forecast in rows {
            output.push_str(&format!(
                "  {}  {:.0}°\n",
                forecast.datetime.format("%H:%M"),
                forecast.floor_temperature - KELVIN_OFFSET
            ));
        }
    }

    output
}

/// Returns the section label for a day key
///
/// Days adjacent to the reference date are labeled Today, Yesterday or
/// Tomorrow; any other day (or an unparseable key) is shown as-is.
fn day_label(key: &str, today: NaiveDate) -> String {
    let Ok(date) = NaiveDate::parse_from_str(key, DAY_FORMAT) else {
        return key.to_string();
    };

    match date.signed_duration_since(today).num_days() {
        0 => "Today".to_string(),
        -1 => "Yesterday".to_string(),
        1 => "Tomorrow".to_string(),
        _ => key.to_string(),
    }
}
