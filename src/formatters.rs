use crate::models::{CityForecast, RouteForecast};

/// Formats a classified city forecast into a human-readable string
pub fn format_city_forecast(forecast: &CityForecast) -> String {
    let place = match &forecast.location.country {
        Some(country) => format!("{}, {}", forecast.location.name, country),
        None => forecast.location.name.clone(),
    };

    let mut output = format!(
        "Weather Forecast for {}\nLocation: {} (key {})\nOverall: {}\n\n",
        forecast.city, place, forecast.location.key, forecast.verdict
    );

    for classified in &forecast.days {
        let day = &classified.day;
        output.push_str(&format!(
            "{}:\n  Temperature: {:.1}\u{00b0}C - {:.1}\u{00b0}C\n  Humidity: {:.0}%\n  Wind Speed: {:.1} km/h\n  Rain Probability: {:.0}%\n  Verdict: {}\n\n",
            day.date,
            day.temperature_min,
            day.temperature_max,
            day.humidity,
            day.wind_speed,
            day.rain_probability,
            classified.verdict
        ));
    }

    if let Some(url) = &forecast.photo_url {
        output.push_str(&format!("Photo: {}\n", url));
    }
    output
}

/// Formats both ends of a route
pub fn format_route_forecast(route: &RouteForecast) -> String {
    format!(
        "Route {} -> {}: {}\n\n{}\n{}",
        route.start.city,
        route.end.city,
        route.verdict,
        format_city_forecast(&route.start),
        format_city_forecast(&route.end)
    )
}
