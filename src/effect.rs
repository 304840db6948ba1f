//! Effects - side effects declared by the reducer

use crate::action::Action;
use crate::api::{WeatherClient, WeatherError};
use crate::share::ShareTarget;
use crate::state::Feedback;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up current weather; the reply carries `request_id` back
    FetchWeather { request_id: u64, location: String },
    /// Deliver share text to a target
    Share { target: ShareTarget, text: String },
    /// Feedback pulse (bell when enabled)
    Feedback(Feedback),
}

/// Run a `FetchWeather` effect and turn the outcome into its reply action.
pub async fn lookup_weather(
    client: &WeatherClient,
    request_id: u64,
    location: &str,
) -> Action {
    match client.fetch_weather(location).await {
        Ok(result) => Action::WeatherDidLoad(request_id, result),
        Err(WeatherError::NotFound(_)) => Action::WeatherDidNotFind(request_id),
        Err(e) => Action::WeatherDidError(request_id, e.user_message()),
    }
}
