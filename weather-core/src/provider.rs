use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::FetchError, model::{Coordinates, ForecastRecord}};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Conditions for the soonest forecast period at `coords`.
    async fn fetch(&self, coords: Coordinates) -> Result<ForecastRecord, FetchError>;
}
