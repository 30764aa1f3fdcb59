use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};

use crate::classifier::classify;
use crate::error::WeatherError;
use crate::formatters::{format_city_forecast, format_route_forecast};
use crate::models::{ClassifyRequest, CityForecastRequest, RouteForecastRequest};
use crate::service::WeatherService;

/// MCP tool server over the weather service
#[derive(Clone)]
pub struct WeatherTools {
    service: WeatherService,
    tool_router: ToolRouter<Self>,
}

impl WeatherTools {
    pub fn new(service: WeatherService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(e: WeatherError) -> McpError {
    match e {
        WeatherError::CityNotFound(_)
        | WeatherError::InvalidDayCount(_)
        | WeatherError::NoCities
        | WeatherError::EmptyCityName => McpError::invalid_params(e.to_string(), None),
        WeatherError::UpstreamRequestFailed { .. } => {
            McpError::internal_error(format!("Failed to fetch forecast: {}", e), None)
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-verdict".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "City weather forecasts powered by AccuWeather, with every day classified \
                as good or bad weather."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherTools {
    /// Gets a classified forecast for one city
    #[tool(description = "Get the daily forecast for a city (e.g. 'Moscow') and whether the weather is good or bad. Optional days: 1, 5, 10 or 15 (default 5).")]
    async fn get_city_forecast(
        &self,
        Parameters(request): Parameters<CityForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting forecast for city: {}", request.city);

        let forecast = self
            .service
            .city_forecast(&request.city, request.days)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(
            format_city_forecast(&forecast),
        )]))
    }

    /// Gets classified forecasts for the start and end of a trip
    #[tool(description = "Check the weather at both ends of a trip. Provide start_city and end_city; the route is bad if either end has bad weather. Optional days: 1, 5, 10 or 15 (default 5).")]
    async fn get_route_forecast(
        &self,
        Parameters(request): Parameters<RouteForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting route forecast: {} -> {}",
            request.start_city,
            request.end_city
        );

        let route = self
            .service
            .route_forecast(&request.start_city, &request.end_city, request.days)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(
            format_route_forecast(&route),
        )]))
    }

    /// Classifies a set of weather values without calling any provider
    #[tool(description = "Classify weather values as good or bad. Temperatures in \u{00b0}C, humidity and rain probability in percent, wind speed in km/h.")]
    async fn classify_weather(
        &self,
        Parameters(request): Parameters<ClassifyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let verdict = classify(
            request.temperature_max,
            request.temperature_min,
            request.humidity,
            request.wind_speed,
            request.rain_probability,
        );

        Ok(CallToolResult::success(vec![Content::text(
            verdict.to_string(),
        )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{mount_city, mount_unknown_city, provider_day};
    use crate::client::ForecastClient;
    use wiremock::MockServer;

    fn tools(server: &MockServer) -> WeatherTools {
        let forecasts = ForecastClient::new(server.uri(), "test-key", "ru-ru").unwrap();
        WeatherTools::new(WeatherService::new(forecasts, None))
    }

    fn text_of(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_classify_weather_tool() {
        let server = MockServer::start().await;
        let result = tools(&server)
            .classify_weather(Parameters(ClassifyRequest {
                temperature_max: 31.0,
                temperature_min: 1.0,
                humidity: 50.0,
                wind_speed: 31.0,
                rain_probability: 10.0,
            }))
            .await
            .unwrap();

        assert_eq!(text_of(&result), "bad");
    }

    #[tokio::test]
    async fn test_city_forecast_tool() {
        let server = MockServer::start().await;
        mount_city(&server, "Kazan", "295954", vec![provider_day("2024-07-01", 20.0, 10.0, 50.0, 10.0, 10.0)]).await;

        let result = tools(&server)
            .get_city_forecast(Parameters(CityForecastRequest {
                city: "Kazan".to_string(),
                days: Some(1),
            }))
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.contains("Weather Forecast for Kazan"));
        assert!(text.contains("Overall: good"));
    }

    #[tokio::test]
    async fn test_unknown_city_is_invalid_params() {
        let server = MockServer::start().await;
        mount_unknown_city(&server, "Atlantis").await;

        let err = tools(&server)
            .get_city_forecast(Parameters(CityForecastRequest {
                city: "Atlantis".to_string(),
                days: Some(1),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
