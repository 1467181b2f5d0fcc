//! Effect handling - turns reducer effects into async tasks

use std::sync::Arc;

use crate::action::Action;
use crate::api::WeatherClient;
use crate::effect::Effect;
use crate::geolocation::{Geolocator, Locator};
use crate::tasks::TaskManager;

/// Runs effects against the weather provider and the locator.
///
/// Every request gets its own task key, so overlapping lookups all run to
/// completion; the reducer discards the ones that were superseded.
pub struct EffectHandler {
    client: Arc<WeatherClient>,
    locator: Arc<Locator>,
}

impl EffectHandler {
    pub fn new(client: WeatherClient, locator: Locator) -> Self {
        Self {
            client: Arc::new(client),
            locator: Arc::new(locator),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.client.has_credentials()
    }

    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager) {
        match effect {
            Effect::FetchWeather { request, query } => {
                let client = Arc::clone(&self.client);
                tasks.spawn(format!("weather-{}", request.0), async move {
                    match client.fetch(&query).await {
                        Ok(snapshot) => Action::WeatherDidLoad {
                            request,
                            query,
                            snapshot,
                        },
                        Err(error) => Action::WeatherDidError {
                            request,
                            query,
                            error,
                        },
                    }
                });
            }
            Effect::Locate { request } => {
                let locator = Arc::clone(&self.locator);
                tasks.spawn(format!("locate-{}", request.0), async move {
                    match locator.current_position().await {
                        Ok(coords) => Action::LocationDidResolve { request, coords },
                        Err(error) => Action::LocationDidError { request, error },
                    }
                });
            }
        }
    }
}
