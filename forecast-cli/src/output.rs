use std::fmt;

use chrono::{DateTime, Utc};
use forecast_core::{
    CityObservation, DailyForecastSet, Forecast, GroupForecastSet, UnitSystem, WeatherObservation,
};

/// Human-readable rendering of a forecast, one block per city or day.
pub struct Rendered<'a> {
    forecast: &'a Forecast,
    labels: Labels,
}

impl<'a> Rendered<'a> {
    pub fn new(forecast: &'a Forecast, units: UnitSystem) -> Self {
        Self {
            forecast,
            labels: Labels::for_units(units),
        }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.forecast {
            Forecast::Current(obs) => write_current(f, obs, &self.labels),
            Forecast::Daily(set) => write_daily(f, set, &self.labels),
            Forecast::Group(set) => write_group(f, set, &self.labels),
        }
    }
}

struct Labels {
    temp: &'static str,
    speed: &'static str,
}

impl Labels {
    fn for_units(units: UnitSystem) -> Self {
        match units {
            UnitSystem::Standard => Labels {
                temp: "K",
                speed: "m/s",
            },
            UnitSystem::Metric => Labels {
                temp: "°C",
                speed: "m/s",
            },
            UnitSystem::Imperial => Labels {
                temp: "°F",
                speed: "mph",
            },
        }
    }
}

fn write_current(
    f: &mut fmt::Formatter<'_>,
    obs: &WeatherObservation,
    labels: &Labels,
) -> fmt::Result {
    write_observation(f, &obs.observation, labels)?;
    writeln!(f, "  Rain (1h):   {:.2} mm", obs.rain)?;
    writeln!(f, "  Snow (1h):   {:.2} mm", obs.snow)
}

fn write_observation(
    f: &mut fmt::Formatter<'_>,
    o: &CityObservation,
    labels: &Labels,
) -> fmt::Result {
    let t = labels.temp;

    writeln!(f, "{}, {} at {}", o.city_name, o.country, fmt_time(o.forecast_time))?;
    writeln!(f, "  Conditions:  {} ({})", o.main, o.description)?;
    writeln!(
        f,
        "  Temperature: {:.1}{t} (feels like {:.1}{t}, min {:.1}{t}, max {:.1}{t})",
        o.current_temp, o.feels_like, o.min_temp, o.max_temp
    )?;
    writeln!(f, "  Humidity:    {}%", o.humidity)?;
    writeln!(f, "  Pressure:    {} hPa", o.pressure)?;
    writeln!(f, "  Wind:        {:.1} {} from {}°", o.wind_speed, labels.speed, o.wind_direction)?;
    writeln!(f, "  Clouds:      {}%", o.clouds)?;
    writeln!(
        f,
        "  Sun:         rises {}, sets {}",
        fmt_time(o.sunrise_time),
        fmt_time(o.sunset_time)
    )
}

fn write_daily(
    f: &mut fmt::Formatter<'_>,
    set: &DailyForecastSet,
    labels: &Labels,
) -> fmt::Result {
    let t = labels.temp;

    writeln!(f, "{}, {}: {} day forecast", set.city_name, set.country, set.forecasts.len())?;
    for day in &set.forecasts {
        writeln!(
            f,
            "  {}  {:<18} {:>5.1}{t} / {:>5.1}{t}  pop {:>3.0}%  rain {:.2} mm  snow {:.2} mm",
            day.forecast_time.format("%a %Y-%m-%d"),
            day.description,
            day.min_temp,
            day.max_temp,
            day.precipitation_probability * 100.0,
            day.rain,
            day.snow,
        )?;
    }
    Ok(())
}

fn write_group(
    f: &mut fmt::Formatter<'_>,
    set: &GroupForecastSet,
    labels: &Labels,
) -> fmt::Result {
    for (i, obs) in set.values().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write_observation(f, obs, labels)?;
    }
    Ok(())
}

fn fmt_time(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}
