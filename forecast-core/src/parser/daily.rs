use serde::Deserialize;
use serde_json::Value;

use super::{OwCondition, first_condition, from_raw, unix_to_utc};
use crate::{
    error::FetchError,
    model::{DailyForecastEntry, DailyForecastSet},
};

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwDayTemp {
    day: f64,
    min: f64,
    max: f64,
    night: f64,
    eve: f64,
    morn: f64,
}

#[derive(Debug, Deserialize)]
struct OwDayFeelsLike {
    day: f64,
    night: f64,
    eve: f64,
    morn: f64,
}

#[derive(Debug, Deserialize)]
struct OwDailyEntry {
    dt: i64,
    sunrise: i64,
    sunset: i64,
    temp: OwDayTemp,
    feels_like: OwDayFeelsLike,
    pressure: f64,
    humidity: u8,
    weather: Vec<OwCondition>,
    speed: f64,
    deg: u16,
    pop: f64,
    // Daily precipitation is a bare volume, not a `{"1h": ..}` block.
    rain: Option<f64>,
    snow: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwDailyResponse {
    city: OwCity,
    list: Vec<OwDailyEntry>,
}

/// Normalize a `forecast/daily` document, keeping the upstream day order.
pub fn parse(raw: Value) -> Result<DailyForecastSet, FetchError> {
    let parsed: OwDailyResponse = from_raw(raw, "daily forecast")?;

    let forecasts = parsed
        .list
        .into_iter()
        .map(entry_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DailyForecastSet {
        city_name: parsed.city.name,
        country: parsed.city.country,
        forecasts,
    })
}

fn entry_from_wire(day: OwDailyEntry) -> Result<DailyForecastEntry, FetchError> {
    let condition = first_condition(day.weather)?;

    Ok(DailyForecastEntry {
        forecast_time: unix_to_utc(day.dt)?,
        sunrise_time: unix_to_utc(day.sunrise)?,
        sunset_time: unix_to_utc(day.sunset)?,
        day_temp: day.temp.day,
        max_temp: day.temp.max,
        min_temp: day.temp.min,
        night_temp: day.temp.night,
        eve_temp: day.temp.eve,
        morning_temp: day.temp.morn,
        day_feels_like: day.feels_like.day,
        night_feels_like: day.feels_like.night,
        eve_feels_like: day.feels_like.eve,
        morning_feels_like: day.feels_like.morn,
        pressure: day.pressure,
        humidity: day.humidity,
        main: condition.main,
        description: condition.description,
        wind_speed: day.speed,
        wind_direction: day.deg,
        precipitation_probability: day.pop,
        rain: day.rain.unwrap_or(0.0),
        snow: day.snow.unwrap_or(0.0),
    })
}
