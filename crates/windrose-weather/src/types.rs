//! OpenWeatherMap wire types and the derived display summary.

use serde::{Deserialize, Serialize};

const MS_TO_KMH: f64 = 3.6;
const WIND_SCALE_CAP_KMH: f64 = 80.0;

/// Decoded forecast response; field names follow the OpenWeatherMap wire
/// format.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    pub city: City,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastEntry {
    pub main: MainReadings,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub rain: Rain,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    pub temp: f64,
}

/// Wind readings in m/s, as delivered by the API.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: i64,
    #[serde(default)]
    pub gust: f64,
}

impl Wind {
    /// Display scaling factor in `(0.2, 1.0)`, saturating above 80 km/h.
    pub(crate) fn scale(&self) -> f64 {
        let speed_kmh = (self.speed * MS_TO_KMH).min(WIND_SCALE_CAP_KMH);
        0.2 + 0.8 * (0.03 * speed_kmh).tanh()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Rain {
    #[serde(rename = "3h", default)]
    pub three_hours: f64,
}

impl Rain {
    /// Rain intensity as an integer from 0 (dry) to 3 (heavy), based on the
    /// average hourly volume over the 3-hour block.
    pub(crate) fn intensity(&self) -> i64 {
        let hourly = self.three_hours / 3.0;
        if hourly == 0.0 {
            0
        } else if hourly < 0.1 {
            1
        } else if hourly < 0.5 {
            2
        } else {
            3
        }
    }

    pub(crate) fn intensity_text(&self) -> &'static str {
        match self.intensity() {
            0 => "dry",
            1 => "light",
            2 => "medium",
            _ => "heavy",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct City {
    pub sunset: i64,
    /// UTC offset in seconds.
    pub timezone: i64,
}

impl City {
    /// Sunset as local `HH:MM`, applying the city's UTC offset.
    pub(crate) fn sunset_local_time(&self) -> String {
        let utc = chrono::DateTime::from_timestamp(self.sunset, 0).unwrap_or_default();
        (utc + chrono::Duration::seconds(self.timezone))
            .format("%H:%M")
            .to_string()
    }
}

/// Display-ready summary of the current and next forecast blocks.
///
/// Temperatures are whole degrees Celsius, wind speeds whole km/h, and the
/// sunset is local time at the queried position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    #[serde(rename = "temp_current")]
    pub current_temperature: i64,
    #[serde(rename = "temp_future")]
    pub future_temperature: i64,

    #[serde(rename = "wind_current")]
    pub current_wind_speed: i64,
    #[serde(rename = "wind_future")]
    pub future_wind_speed: i64,
    #[serde(rename = "wind_deg_current")]
    pub current_wind_degrees: i64,
    #[serde(rename = "wind_deg_future")]
    pub future_wind_degrees: i64,
    #[serde(rename = "wind_gust_current")]
    pub current_wind_gust: i64,
    #[serde(rename = "wind_gust_future")]
    pub future_wind_gust: i64,
    #[serde(rename = "wind_scale_current")]
    pub current_wind_scale: f64,
    #[serde(rename = "wind_scale_future")]
    pub future_wind_scale: f64,

    #[serde(rename = "rain_current")]
    pub current_rain: i64,
    #[serde(rename = "rain_future")]
    pub future_rain: i64,
    #[serde(rename = "rain_current_text")]
    pub current_rain_text: &'static str,
    #[serde(rename = "rain_future_text")]
    pub future_rain_text: &'static str,

    #[serde(rename = "sunset")]
    pub sunset_time: String,
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_whole(value: f64) -> i64 {
    value.round() as i64
}

impl WeatherSummary {
    pub(crate) fn from_forecast(forecast: &ForecastResponse) -> Option<Self> {
        let current = forecast.list.first()?;
        let next = forecast.list.get(1)?;

        Some(Self {
            current_temperature: round_to_whole(current.main.temp),
            future_temperature: round_to_whole(next.main.temp),
            current_wind_speed: round_to_whole(current.wind.speed * MS_TO_KMH),
            future_wind_speed: round_to_whole(next.wind.speed * MS_TO_KMH),
            current_wind_degrees: current.wind.deg,
            future_wind_degrees: next.wind.deg,
            current_wind_gust: round_to_whole(current.wind.gust * MS_TO_KMH),
            future_wind_gust: round_to_whole(next.wind.gust * MS_TO_KMH),
            current_wind_scale: current.wind.scale(),
            future_wind_scale: next.wind.scale(),
            current_rain: current.rain.intensity(),
            future_rain: next.rain.intensity(),
            current_rain_text: current.rain.intensity_text(),
            future_rain_text: next.rain.intensity_text(),
            sunset_time: forecast.city.sunset_local_time(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_scale_grows_with_speed_and_saturates() {
        let calm = Wind {
            speed: 0.0,
            ..Wind::default()
        };
        assert!((calm.scale() - 0.2).abs() < 1e-12);

        let breeze = Wind {
            speed: 5.0,
            ..Wind::default()
        };
        let gale = Wind {
            speed: 20.0,
            ..Wind::default()
        };
        assert!(breeze.scale() < gale.scale());

        // Beyond the 80 km/h cap the scale stops growing.
        let storm = Wind {
            speed: 30.0,
            ..Wind::default()
        };
        let hurricane = Wind {
            speed: 60.0,
            ..Wind::default()
        };
        assert!((storm.scale() - hurricane.scale()).abs() < 1e-12);
        assert!(storm.scale() < 1.0);
    }

    #[test]
    fn rain_intensity_buckets() {
        let dry = Rain { three_hours: 0.0 };
        assert_eq!(dry.intensity(), 0);
        assert_eq!(dry.intensity_text(), "dry");

        let light = Rain { three_hours: 0.2 };
        assert_eq!(light.intensity(), 1);
        assert_eq!(light.intensity_text(), "light");

        let medium = Rain { three_hours: 1.0 };
        assert_eq!(medium.intensity(), 2);
        assert_eq!(medium.intensity_text(), "medium");

        let heavy = Rain { three_hours: 3.0 };
        assert_eq!(heavy.intensity(), 3);
        assert_eq!(heavy.intensity_text(), "heavy");
    }

    #[test]
    fn sunset_applies_utc_offset() {
        // 2024-06-01 19:13:20 UTC, +2h offset -> 21:13 local.
        let city = City {
            sunset: 1_717_269_200,
            timezone: 7200,
        };
        assert_eq!(city.sunset_local_time(), "21:13");
    }

    #[test]
    fn summary_requires_two_forecast_entries() {
        let forecast = ForecastResponse {
            list: vec![ForecastEntry {
                main: MainReadings { temp: 12.0 },
                wind: Wind::default(),
                rain: Rain::default(),
            }],
            city: City {
                sunset: 0,
                timezone: 0,
            },
        };
        assert!(WeatherSummary::from_forecast(&forecast).is_none());
    }

    #[test]
    fn summary_rounds_and_converts_units() {
        let forecast = ForecastResponse {
            list: vec![
                ForecastEntry {
                    main: MainReadings { temp: 11.4 },
                    wind: Wind {
                        speed: 2.5, // 9 km/h
                        deg: 270,
                        gust: 5.0, // 18 km/h
                    },
                    rain: Rain { three_hours: 0.0 },
                },
                ForecastEntry {
                    main: MainReadings { temp: 13.6 },
                    wind: Wind {
                        speed: 6.0, // 21.6 -> 22 km/h
                        deg: 180,
                        gust: 12.0, // 43.2 -> 43 km/h
                    },
                    rain: Rain { three_hours: 1.5 },
                },
            ],
            city: City {
                sunset: 1_717_269_200,
                timezone: 0,
            },
        };

        let summary = WeatherSummary::from_forecast(&forecast).expect("two entries");
        assert_eq!(summary.current_temperature, 11);
        assert_eq!(summary.future_temperature, 14);
        assert_eq!(summary.current_wind_speed, 9);
        assert_eq!(summary.future_wind_speed, 22);
        assert_eq!(summary.current_wind_gust, 18);
        assert_eq!(summary.future_wind_gust, 43);
        assert_eq!(summary.current_wind_degrees, 270);
        assert_eq!(summary.future_wind_degrees, 180);
        assert_eq!(summary.current_rain, 0);
        assert_eq!(summary.current_rain_text, "dry");
        assert_eq!(summary.future_rain, 3);
        assert_eq!(summary.future_rain_text, "heavy");
        assert_eq!(summary.sunset_time, "19:13");
    }

    #[test]
    fn summary_serializes_with_frontend_field_names() {
        let forecast = ForecastResponse {
            list: vec![
                ForecastEntry {
                    main: MainReadings { temp: 1.0 },
                    wind: Wind::default(),
                    rain: Rain::default(),
                },
                ForecastEntry {
                    main: MainReadings { temp: 2.0 },
                    wind: Wind::default(),
                    rain: Rain::default(),
                },
            ],
            city: City {
                sunset: 0,
                timezone: 0,
            },
        };
        let summary = WeatherSummary::from_forecast(&forecast).expect("two entries");
        let json = serde_json::to_value(&summary).expect("serialize summary");
        for key in [
            "temp_current",
            "temp_future",
            "wind_current",
            "wind_deg_current",
            "wind_gust_current",
            "wind_scale_current",
            "rain_current",
            "rain_current_text",
            "sunset",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
