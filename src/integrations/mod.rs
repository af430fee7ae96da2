//! Lookups backed by external web services

mod timezone;
mod weather;

pub use timezone::{OpenMeteoGeocoder, TimezoneResolver};
pub use weather::{OpenWeatherMap, WeatherProvider, WeatherReport};
