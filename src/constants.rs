/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-verdict/0.1.0";

/// AccuWeather API base URL
pub const ACCUWEATHER_API_BASE: &str = "http://dataservice.accuweather.com";

/// Unsplash API base URL
pub const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Timeout applied to every upstream request
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Day counts the daily forecast endpoint accepts
pub const ALLOWED_FORECAST_DAYS: [u8; 4] = [1, 5, 10, 15];

pub const DEFAULT_FORECAST_DAYS: u8 = 5;

pub const DEFAULT_LANGUAGE: &str = "ru-ru";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
