//! OpenWeatherMap current-weather client
//!
//! One GET per lookup, no caching, no retries. Responses are normalized into
//! a [`WeatherSnapshot`] and every failure is classified into a
//! [`LookupError`] here, so nothing above this module sees HTTP details.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::LookupError;
use crate::query::QueryDescriptor;
use crate::state::{SunTimes, WeatherSnapshot};

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org";

const WEATHER_PATH: &str = "/data/2.5/weather";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiWeather {
    name: String,
    weather: Vec<ApiCondition>,
    main: ApiMain,
    #[serde(default)]
    wind: ApiWind,
    visibility: Option<f64>,
    #[serde(default)]
    clouds: ApiClouds,
    sys: Option<ApiSys>,
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiClouds {
    #[serde(default)]
    all: f64,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
    country: Option<String>,
}

fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

impl ApiWeather {
    fn into_snapshot(self) -> Result<WeatherSnapshot, LookupError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::Network("malformed response: empty weather list".into()))?;

        let (sun, country) = match self.sys {
            Some(sys) => {
                let sun = match (sys.sunrise, sys.sunset) {
                    (Some(sunrise), Some(sunset)) => Some(SunTimes { sunrise, sunset }),
                    _ => None,
                };
                (sun, sys.country.filter(|c| !c.is_empty()))
            }
            None => (None, None),
        };

        Ok(WeatherSnapshot {
            location: self.name,
            country,
            condition: condition.main.to_lowercase(),
            description: condition.description,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            pressure: self.main.pressure.round().max(0.0) as u32,
            humidity: percent(self.main.humidity),
            wind_speed: self.wind.speed,
            visibility: self.visibility.map(|v| v.round().max(0.0) as u32),
            cloud_cover: percent(self.clouds.all),
            sun,
            utc_offset: self.timezone,
        })
    }
}

/// Parse a current-weather response body.
pub fn parse_weather(body: &str) -> Result<WeatherSnapshot, LookupError> {
    let raw: ApiWeather = serde_json::from_str(body)
        .map_err(|e| LookupError::Network(format!("malformed response: {e}")))?;
    raw.into_snapshot()
}

// ============================================================================
// Client
// ============================================================================

/// Connection settings for [`WeatherClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct WeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.filter(|key| !key.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current conditions for `query`.
    #[instrument(skip_all, fields(query = %query), level = "info")]
    pub async fn fetch(&self, query: &QueryDescriptor) -> Result<WeatherSnapshot, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::Credential)?;
        let url = format!("{}{}", self.base_url, WEATHER_PATH);

        let request = self.client.get(&url);
        let request = match query {
            QueryDescriptor::Name(name) => request.query(&[("q", name.as_str())]),
            QueryDescriptor::Coords(coords) => {
                request.query(&[("lat", coords.lat), ("lon", coords.lon)])
            }
        };

        let response = request
            .query(&[("units", "metric"), ("appid", api_key)])
            .send()
            .await
            .map_err(|e| LookupError::from_transport(&e))?;

        let status = response.status();
        debug!(%status, "Weather response");
        match status {
            StatusCode::NOT_FOUND => return Err(LookupError::NotFound),
            StatusCode::UNAUTHORIZED => return Err(LookupError::Auth),
            s if !s.is_success() => {
                return Err(LookupError::Network(format!("unexpected status {s}")))
            }
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::from_transport(&e))?;
        parse_weather(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Coordinates;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn london_json() -> serde_json::Value {
        serde_json::json!({
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "base": "stations",
            "main": {
                "temp": 14.2, "feels_like": 13.5, "temp_min": 12.9, "temp_max": 15.4,
                "pressure": 1012, "humidity": 76
            },
            "visibility": 10000,
            "wind": {"speed": 4.63, "deg": 240},
            "clouds": {"all": 75},
            "dt": 1700000000,
            "sys": {"country": "GB", "sunrise": 1699989000, "sunset": 1700021000},
            "timezone": 0,
            "id": 2643743,
            "name": "London",
            "cod": 200
        })
    }

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::new(ClientConfig {
            api_key: Some("test-key".into()),
            base_url: server.uri(),
            timeout: Duration::from_secs(2),
        })
        .expect("client")
    }

    #[test]
    fn test_parse_normalizes_fields() {
        let snapshot = parse_weather(&london_json().to_string()).expect("parse");

        assert_eq!(snapshot.location, "London");
        assert_eq!(snapshot.country.as_deref(), Some("GB"));
        assert_eq!(snapshot.condition, "clouds");
        assert_eq!(snapshot.description, "broken clouds");
        assert_eq!(snapshot.temperature, 14.2);
        assert_eq!(snapshot.pressure, 1012);
        assert_eq!(snapshot.humidity, 76);
        assert_eq!(snapshot.visibility, Some(10_000));
        assert_eq!(snapshot.cloud_cover, 75);
        assert_eq!(
            snapshot.sun,
            Some(SunTimes {
                sunrise: 1699989000,
                sunset: 1700021000
            })
        );
        assert_eq!(snapshot.utc_offset, Some(0));
    }

    #[test]
    fn test_parse_tolerates_missing_sys_and_visibility() {
        let mut body = london_json();
        let obj = body.as_object_mut().expect("object");
        obj.remove("sys");
        obj.remove("visibility");

        let snapshot = parse_weather(&body.to_string()).expect("parse");
        assert_eq!(snapshot.sun, None);
        assert_eq!(snapshot.country, None);
        assert_eq!(snapshot.visibility, None);
    }

    #[test]
    fn test_parse_rejects_empty_weather_list() {
        let mut body = london_json();
        body["weather"] = serde_json::json!([]);

        assert!(matches!(
            parse_weather(&body.to_string()),
            Err(LookupError::Network(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_weather("<html>oops</html>"),
            Err(LookupError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_json()))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = client_for(&server)
            .fetch(&QueryDescriptor::Name("London".into()))
            .await
            .expect("fetch");
        assert_eq!(snapshot.location, "London");
    }

    #[tokio::test]
    async fn test_fetch_by_coords() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "51.5"))
            .and(query_param("lon", "-0.12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_json()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(&QueryDescriptor::Coords(Coordinates::new(51.5, -0.12)))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(
                serde_json::json!({"cod": "404", "message": "city not found"}),
            ))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(&QueryDescriptor::Name("Atlantis".into()))
            .await;
        assert_eq!(result, Err(LookupError::NotFound));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(&QueryDescriptor::Name("London".into()))
            .await;
        assert_eq!(result, Err(LookupError::Auth));
    }

    #[tokio::test]
    async fn test_server_error_is_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(&QueryDescriptor::Name("London".into()))
            .await;
        assert!(matches!(result, Err(LookupError::Network(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(london_json())
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = WeatherClient::new(ClientConfig {
            api_key: Some("test-key".into()),
            base_url: server.uri(),
            timeout: Duration::from_millis(100),
        })
        .expect("client");

        let result = client.fetch(&QueryDescriptor::Name("London".into())).await;
        assert_eq!(
            result,
            Err(LookupError::Network("request timed out".into()))
        );
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_json()))
            .expect(0)
            .mount(&server)
            .await;

        let client = WeatherClient::new(ClientConfig {
            api_key: Some("   ".into()),
            base_url: server.uri(),
            timeout: Duration::from_secs(2),
        })
        .expect("client");

        assert!(!client.has_credentials());
        let result = client.fetch(&QueryDescriptor::Name("London".into())).await;
        assert_eq!(result, Err(LookupError::Credential));
    }
}
