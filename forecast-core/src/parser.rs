//! Normalization of the three upstream response shapes.
//!
//! Each submodule owns the wire types for one endpoint and a `parse` function turning the raw
//! JSON document into a typed record. Shared pieces (the observation block used by both the
//! current and group endpoints, timestamp conversion) live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::FetchError,
    model::{CityObservation, Forecast, ForecastKind},
};

pub mod current;
pub mod daily;
pub mod group;

/// Signature shared by every shape parser.
pub type ParseFn = fn(Value) -> Result<Forecast, FetchError>;

/// Pick the parser for a forecast kind.
pub fn parser_for(kind: ForecastKind) -> ParseFn {
    match kind {
        ForecastKind::Current => parse_current,
        ForecastKind::Daily => parse_daily,
        ForecastKind::Group => parse_group,
    }
}

fn parse_current(raw: Value) -> Result<Forecast, FetchError> {
    current::parse(raw).map(Forecast::Current)
}

fn parse_daily(raw: Value) -> Result<Forecast, FetchError> {
    daily::parse(raw).map(Forecast::Daily)
}

fn parse_group(raw: Value) -> Result<Forecast, FetchError> {
    group::parse(raw).map(Forecast::Group)
}

/// Parse a raw upstream document of the given kind.
pub fn parse(kind: ForecastKind, raw: Value) -> Result<Forecast, FetchError> {
    parser_for(kind)(raw)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

/// The observation block common to `weather` documents and `group` list items.
#[derive(Debug, Deserialize)]
pub(crate) struct OwObservation {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
}

impl OwObservation {
    pub(crate) fn into_observation(self) -> Result<CityObservation, FetchError> {
        let forecast_time = unix_to_utc(self.dt)?;
        let sunrise_time = unix_to_utc(self.sys.sunrise)?;
        let sunset_time = unix_to_utc(self.sys.sunset)?;
        let condition = first_condition(self.weather)?;

        Ok(CityObservation {
            main: condition.main,
            description: condition.description,
            current_temp: self.main.temp,
            min_temp: self.main.temp_min,
            max_temp: self.main.temp_max,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
            wind_direction: self.wind.deg,
            clouds: self.clouds.all,
            forecast_time,
            sunrise_time,
            sunset_time,
            city_name: self.name,
            country: self.sys.country,
        })
    }
}

/// Deserialize a wire type, tagging failures with the document they came from.
pub(crate) fn from_raw<T: DeserializeOwned>(raw: Value, what: &str) -> Result<T, FetchError> {
    serde_json::from_value(raw)
        .map_err(|err| FetchError::MalformedResponse(format!("{what} document: {err}")))
}

pub(crate) fn first_condition(weather: Vec<OwCondition>) -> Result<OwCondition, FetchError> {
    weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::MalformedResponse("`weather` list is empty".to_string()))
}

/// Upstream epoch seconds are always UTC.
pub(crate) fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .ok_or_else(|| FetchError::MalformedResponse(format!("timestamp {ts} is out of range")))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    /// London current weather with last-hour rain.
    pub fn current_rainy() -> Value {
        let mut doc = current_base();
        doc["rain"] = json!({ "1h": 0.47 });
        doc
    }

    /// Same observation with snow instead of rain.
    pub fn current_snowy() -> Value {
        let mut doc = current_base();
        doc["snow"] = json!({ "1h": 0.47 });
        doc
    }

    pub fn current_base() -> Value {
        json!({
            "coord": { "lon": -0.13, "lat": 51.51 },
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
            ],
            "base": "stations",
            "main": {
                "temp": 11.14,
                "feels_like": 9.12,
                "temp_min": 10.56,
                "temp_max": 12,
                "pressure": 1015,
                "humidity": 87
            },
            "visibility": 10000,
            "wind": { "speed": 2.6, "deg": 170 },
            "clouds": { "all": 100 },
            "dt": 1602519816,
            "sys": {
                "type": 1,
                "id": 1414,
                "country": "GB",
                "sunrise": 1602483586,
                "sunset": 1602522824
            },
            "timezone": 3600,
            "id": 2643743,
            "name": "London",
            "cod": 200
        })
    }

    /// A seven day London forecast: rain on days 0-3, snow on day 6.
    const DAILY_WEEK: &str = r#"{
    "city": {
        "id": 2643743,
        "name": "London",
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "country": "GB",
        "population": 0,
        "timezone": 3600
    },
    "cod": "200",
    "message": 0.0562641,
    "cnt": 7,
    "list": [
        {
            "dt": 1602500400, "sunrise": 1602483585, "sunset": 1602522823,
            "temp": {
                "day": 13.65, "min": 9.27, "max": 13.65,
                "night": 11.06, "eve": 11.01, "morn": 9.27
            },
            "feels_like": { "day": 9.7, "night": 8.65, "eve": 8.3, "morn": 6.76 },
            "pressure": 1019, "humidity": 57,
            "weather": [
                { "id": 501, "main": "Rain", "description": "moderate rain" }
            ],
            "speed": 4.12, "deg": 217, "clouds": 94, "pop": 1, "rain": 3.1
        },
        {
            "dt": 1602586800, "sunrise": 1602570086, "sunset": 1602609092,
            "temp": {
                "day": 11.95, "min": 8.37, "max": 11.96,
                "night": 11.23, "eve": 10.69, "morn": 8.37
            },
            "feels_like": { "day": 8.37, "night": 6.52, "eve": 6.04, "morn": 5.01 },
            "pressure": 1009, "humidity": 58,
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain" }
            ],
            "speed": 3.21, "deg": 16, "clouds": 96, "pop": 0.98, "rain": 2.36
        },
        {
            "dt": 1602673200, "sunrise": 1602656588, "sunset": 1602695363,
            "temp": {
                "day": 14.61, "min": 10.66, "max": 14.91,
                "night": 11.11, "eve": 12.64, "morn": 10.66
            },
            "feels_like": { "day": 10.11, "night": 6.5, "eve": 8.43, "morn": 6.74 },
            "pressure": 1021, "humidity": 55,
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain" }
            ],
            "speed": 5.02, "deg": 44, "clouds": 45, "pop": 0.55, "rain": 1.19
        },
        {
            "dt": 1602759600, "sunrise": 1602743090, "sunset": 1602781634,
            "temp": {
                "day": 12.58, "min": 9.6, "max": 12.95,
                "night": 10.16, "eve": 10.93, "morn": 9.6
            },
            "feels_like": { "day": 8.21, "night": 6.91, "eve": 6.94, "morn": 5.24 },
            "pressure": 1023, "humidity": 59,
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain" }
            ],
            "speed": 4.57, "deg": 12, "clouds": 55, "pop": 0.3, "rain": 0.25
        },
        {
            "dt": 1602846000, "sunrise": 1602829592, "sunset": 1602867906,
            "temp": {
                "day": 12.65, "min": 8.33, "max": 12.65,
                "night": 10.03, "eve": 11.13, "morn": 8.33
            },
            "feels_like": { "day": 8.99, "night": 7.53, "eve": 8.13, "morn": 6.04 },
            "pressure": 1021, "humidity": 48,
            "weather": [
                { "id": 802, "main": "Clouds", "description": "scattered clouds" }
            ],
            "speed": 2.82, "deg": 102, "clouds": 27, "pop": 0
        },
        {
            "dt": 1602932400, "sunrise": 1602916095, "sunset": 1602954179,
            "temp": {
                "day": 11.94, "min": 10.02, "max": 12.81,
                "night": 10.17, "eve": 11.1, "morn": 10.6
            },
            "feels_like": { "day": 8.19, "night": 6.32, "eve": 7.55, "morn": 7.2 },
            "pressure": 1020, "humidity": 63,
            "weather": [
                { "id": 804, "main": "Clouds", "description": "overcast clouds" }
            ],
            "speed": 3.79, "deg": 61, "clouds": 100, "pop": 0
        },
        {
            "dt": 1603018800, "sunrise": 1603002598, "sunset": 1603040452,
            "temp": {
                "day": 12.79, "min": 9.07, "max": 13.42,
                "night": 11, "eve": 11.42, "morn": 9.07
            },
            "feels_like": { "day": 9.04, "night": 7.84, "eve": 8.42, "morn": 6.75 },
            "pressure": 1013, "humidity": 52,
            "weather": [
                { "id": 803, "main": "Clouds", "description": "broken clouds" }
            ],
            "speed": 3.26, "deg": 111, "clouds": 74, "pop": 0, "snow": 0.3
        }
    ]
}"#;

    pub fn daily_week() -> Value {
        serde_json::from_str(DAILY_WEEK).expect("daily fixture is valid JSON")
    }

    /// London and Boston from the `group` endpoint.
    pub fn group_london_boston() -> Value {
        json!({
            "cnt": 2,
            "list": [
                {
                    "coord": { "lon": -0.13, "lat": 51.51 },
                    "sys": {
                        "country": "GB",
                        "timezone": 3600,
                        "sunrise": 1602483586,
                        "sunset": 1602522824
                    },
                    "weather": [
                        { "id": 500, "main": "Rain", "description": "light rain", "icon": "10n" }
                    ],
                    "main": {
                        "temp": 10.37, "feels_like": 8.41, "temp_min": 10,
                        "temp_max": 11.11, "pressure": 1015, "humidity": 93
                    },
                    "visibility": 8000,
                    "wind": { "speed": 2.6, "deg": 220 },
                    "clouds": { "all": 75 },
                    "dt": 1602526276,
                    "id": 2643743,
                    "name": "London"
                },
                {
                    "coord": { "lon": -71.06, "lat": 42.36 },
                    "sys": {
                        "country": "US",
                        "timezone": -14400,
                        "sunrise": 1602500038,
                        "sunset": 1602540413
                    },
                    "weather": [
                        { "id": 804, "main": "Clouds", "description": "overcast clouds" }
                    ],
                    "main": {
                        "temp": 12.15, "feels_like": 4.95, "temp_min": 11.11,
                        "temp_max": 12.78, "pressure": 1027, "humidity": 62
                    },
                    "visibility": 10000,
                    "wind": { "speed": 8.7, "deg": 70 },
                    "clouds": { "all": 90 },
                    "dt": 1602526431,
                    "id": 4930956,
                    "name": "Boston"
                }
            ]
        })
    }
}
