//! Geolocation capability
//!
//! A terminal has no browser geolocation, so the position comes from one of
//! the [`Locator`] variants chosen at startup.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::GeolocationError;
use crate::query::Coordinates;

pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// Produces the user's current position.
pub trait Geolocator {
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

#[derive(Deserialize)]
struct IpApiResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Approximate position from the public IP address (ipapi.co).
#[derive(Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

impl IpLocator {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_url(DEFAULT_IP_LOOKUP_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weatherhub/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    #[instrument(skip_all, level = "info")]
    async fn lookup(&self) -> Result<Coordinates, GeolocationError> {
        let unavailable = |e: reqwest::Error| GeolocationError::Unavailable(e.to_string());

        let response = self.client.get(&self.url).send().await.map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Unavailable(format!("status {status}")));
        }

        let r: IpApiResult = response.json().await.map_err(unavailable)?;
        if r.error {
            let reason = r.reason.unwrap_or_else(|| "lookup refused".into());
            return Err(GeolocationError::Unavailable(reason));
        }

        let (Some(lat), Some(lon)) = (r.latitude, r.longitude) else {
            return Err(GeolocationError::Unavailable("no coordinates".into()));
        };
        let coords = Coordinates::new(lat, lon);
        if !coords.is_valid() {
            return Err(GeolocationError::Unavailable(format!(
                "out of range: {coords}"
            )));
        }

        debug!(%coords, "IP lookup resolved");
        Ok(coords)
    }
}

impl Geolocator for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.lookup().await
    }
}

/// The locator configured for this session
#[derive(Clone)]
pub enum Locator {
    Ip(IpLocator),
    /// Always answers with the same position
    Fixed(Coordinates),
    /// Location is switched off; every request is `Unsupported`
    Disabled,
}

impl Geolocator for Locator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        match self {
            Locator::Ip(ip) => ip.current_position().await,
            Locator::Fixed(coords) => Ok(*coords),
            Locator::Disabled => Err(GeolocationError::Unsupported),
        }
    }
}
