//! `get_weather_info`: current conditions via Open-Meteo.
//!
//! Two sequential requests: geocode the city name, then fetch the current
//! weather at the resolved coordinates. The two stages fail independently
//! and say so in their error text.

use crate::ToolDef;
use crate::tools::core::{Tool, ToolFuture, ToolOutput, parse_tool_args};
use crate::tools::failure::ToolFailure;
use crate::tools::spec::ToolSpec;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

/// WMO weather interpretation codes.
const WMO_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Human-readable description of a WMO weather code.
pub fn wmo_description(code: i64) -> &'static str {
    WMO_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("Unknown weather condition", |(_, desc)| *desc)
}

/// Arguments for `get_weather_info`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WeatherArgs {
    /// The city to get the current weather for, e.g. "Paris".
    pub city: String,
}

/// A geocoded location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub resolved_name: String,
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub weather_code: i64,
}

#[derive(Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct GeocodingMatch {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: i64,
}

/// Parse a geocoding response body.
///
/// An absent or empty `results` list means the city is unknown; a first
/// match without coordinates is a parse failure.
pub fn parse_geocoding(city: &str, body: &str) -> Result<GeoCoordinate, ToolFailure> {
    let parse_failure = || ToolFailure::GeocodingParse {
        city: city.to_string(),
    };

    let response: GeocodingResponse = serde_json::from_str(body).map_err(|_| parse_failure())?;
    let first = match response.results.and_then(|r| r.into_iter().next()) {
        Some(first) => first,
        None => {
            return Err(ToolFailure::LocationNotFound {
                city: city.to_string(),
            });
        }
    };
    let found: GeocodingMatch = serde_json::from_value(first).map_err(|_| parse_failure())?;

    Ok(GeoCoordinate {
        latitude: found.latitude,
        longitude: found.longitude,
        resolved_name: found.name.unwrap_or_else(|| city.to_string()),
    })
}

/// Parse a forecast response body.
pub fn parse_forecast(city: &str, body: &str) -> Result<CurrentConditions, ToolFailure> {
    let response: ForecastResponse =
        serde_json::from_str(body).map_err(|_| ToolFailure::ForecastParse {
            city: city.to_string(),
        })?;
    Ok(CurrentConditions {
        temperature_c: response.current_weather.temperature,
        weather_code: response.current_weather.weathercode,
    })
}

/// Render the final weather sentence.
pub fn describe(location: &GeoCoordinate, conditions: &CurrentConditions) -> String {
    format!(
        "The current weather in {} is: {} with a temperature of {}°C.",
        location.resolved_name,
        wmo_description(conditions.weather_code),
        conditions.temperature_c
    )
}

/// Weather lookup against configurable geocoding and forecast endpoints.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherLookup {
    pub fn new(
        client: reqwest::Client,
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    /// Look up the current weather for `city`. Always returns text.
    pub async fn lookup(&self, city: &str) -> ToolOutput {
        self.try_lookup(city).await.into()
    }

    async fn try_lookup(&self, city: &str) -> Result<String, ToolFailure> {
        let geocoding_transport = |reason: String| ToolFailure::GeocodingTransport {
            city: city.to_string(),
            reason,
        };
        let body = get_text(
            &self.client,
            &self.geocoding_url,
            &[("name", city.to_string()), ("count", "1".to_string())],
        )
        .await
        .map_err(geocoding_transport)?;
        let location = parse_geocoding(city, &body)?;
        debug!(
            "Geocoded {city} to {} ({}, {})",
            location.resolved_name, location.latitude, location.longitude
        );

        let body = get_text(
            &self.client,
            &self.forecast_url,
            &[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("temperature_unit", "celsius".to_string()),
                ("timezone", "auto".to_string()),
            ],
        )
        .await
        .map_err(|reason| ToolFailure::ForecastTransport {
            city: city.to_string(),
            reason,
        })?;
        let conditions = parse_forecast(city, &body)?;

        Ok(describe(&location, &conditions))
    }
}

/// GET `url` with query parameters and return the body of a 2xx response.
/// Every failure is flattened to a reason string.
async fn get_text(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<String, String> {
    let url = reqwest::Url::parse_with_params(url, params).map_err(|e| e.to_string())?;
    let resp = client.get(url).send().await.map_err(|e| e.to_string())?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP {status}"));
    }
    resp.text().await.map_err(|e| e.to_string())
}

impl Tool for WeatherLookup {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder(
            super::GET_WEATHER_INFO,
            "Get the current weather conditions and temperature for a city",
        )
        .when_to_use("To tell the traveller what weather to expect at the destination")
        .when_not_to_use("For prices or costs; use find_hotels or get_daily_spend_estimate")
        .parameters_for::<WeatherArgs>()
        .example(
            r#"get_weather_info(city="Paris")"#,
            "The current weather in Paris is: Partly cloudy with a temperature of 18.3°C.",
        )
        .output_format("One sentence, temperature in Celsius")
        .to_tool_def()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let parsed = parse_tool_args::<WeatherArgs>(arguments);
        Box::pin(async move {
            match parsed {
                Ok(args) => self.lookup(&args.city).await,
                Err(failure) => ToolOutput::failed(failure),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::failure::FailureKind;

    #[test]
    fn wmo_table_lookup() {
        assert_eq!(wmo_description(0), "Clear sky");
        assert_eq!(wmo_description(82), "Violent rain showers");
        assert_eq!(wmo_description(99), "Thunderstorm with heavy hail");
    }

    #[test]
    fn codes_outside_table_are_unknown() {
        let known: Vec<i64> = WMO_CODES.iter().map(|(c, _)| *c).collect();
        for code in -5..=120 {
            if !known.contains(&code) {
                assert_eq!(wmo_description(code), "Unknown weather condition", "code {code}");
            }
        }
    }

    #[test]
    fn geocoding_empty_results_is_not_found() {
        for body in [r#"{"results": []}"#, r#"{}"#, r#"{"results": null}"#] {
            let err = parse_geocoding("Atlantis", body).unwrap_err();
            assert_eq!(err.kind(), FailureKind::Resolution);
            assert_eq!(
                err.to_string(),
                "Could not find location coordinates for Atlantis."
            );
        }
    }

    #[test]
    fn geocoding_name_falls_back_to_input() {
        let loc = parse_geocoding("paris", r#"{"results":[{"latitude":48.85,"longitude":2.35}]}"#)
            .unwrap();
        assert_eq!(loc.resolved_name, "paris");

        let loc = parse_geocoding(
            "paris",
            r#"{"results":[{"latitude":48.85,"longitude":2.35,"name":"Paris"}]}"#,
        )
        .unwrap();
        assert_eq!(loc.resolved_name, "Paris");
    }

    #[test]
    fn geocoding_shape_failures_are_parse_errors() {
        let err = parse_geocoding("Paris", "<html>").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Parse);

        let err = parse_geocoding("Paris", r#"{"results":[{"name":"Paris"}]}"#).unwrap_err();
        assert_eq!(err, ToolFailure::GeocodingParse { city: "Paris".into() });
    }

    #[test]
    fn forecast_missing_fields_is_parse_error() {
        let err = parse_forecast("Oslo", r#"{"current_weather":{"temperature":3.0}}"#).unwrap_err();
        assert!(err.to_string().starts_with("Could not parse weather data for Oslo."));
    }

    #[test]
    fn describe_renders_sentence() {
        let location = GeoCoordinate {
            latitude: 35.68,
            longitude: 139.69,
            resolved_name: "Tokyo".into(),
        };
        let conditions = parse_forecast(
            "Tokyo",
            r#"{"current_weather":{"temperature":21.4,"weathercode":2,"windspeed":5.0}}"#,
        )
        .unwrap();
        assert_eq!(
            describe(&location, &conditions),
            "The current weather in Tokyo is: Partly cloudy with a temperature of 21.4°C."
        );
    }
}
