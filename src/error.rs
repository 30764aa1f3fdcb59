use crate::constants::ALLOWED_FORECAST_DAYS;

/// Errors raised while fetching and preparing forecasts.
///
/// None of these come from the classifier, which is total over its inputs.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Upstream request to {endpoint} failed: {reason}")]
    UpstreamRequestFailed { endpoint: String, reason: String },

    #[error("Invalid forecast day count {0}, allowed values: {allowed:?}", allowed = ALLOWED_FORECAST_DAYS)]
    InvalidDayCount(i64),

    #[error("No cities given")]
    NoCities,

    #[error("City name is empty")]
    EmptyCityName,
}

impl WeatherError {
    pub fn upstream(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::UpstreamRequestFailed {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }
}

pub type WeatherResult<T> = Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_day_count_lists_allowed_values() {
        let msg = WeatherError::InvalidDayCount(3).to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains("[1, 5, 10, 15]"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_upstream_message() {
        let err = WeatherError::upstream("locations/v1/cities/autocomplete", "status 503");
        assert_eq!(
            err.to_string(),
            "Upstream request to locations/v1/cities/autocomplete failed: status 503"
        );
    }
}
