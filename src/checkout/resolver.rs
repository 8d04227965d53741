use super::extract::extract_redirect;
use crate::api::ApiClient;
use crate::error::{GamehostError, ValidationError};
use crate::selection::SelectionState;
use tracing::info;
use url::Url;

/// Turns a finished selection into the provider's checkout URL.
#[derive(Debug, Clone)]
pub struct CheckoutResolver {
    client: ApiClient,
}

impl CheckoutResolver {
    /// `client` must point at the build-link endpoint.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Query parameters for the build-link call. Only the mod count is sent,
    /// never the mod names.
    pub fn build_query(state: &SelectionState) -> Result<Vec<(&'static str, String)>, ValidationError> {
        state.validate()?;
        let game = state.game().ok_or(ValidationError::NoGame)?;
        let location = state.location().ok_or(ValidationError::NoLocation)?;

        Ok(vec![
            ("handler", "buildlink".to_string()),
            ("game", game.name.clone()),
            ("players", state.players().to_string()),
            ("location", location.id.clone()),
            ("mods", state.mods().len().to_string()),
        ])
    }

    pub async fn resolve(&self, state: &SelectionState) -> Result<Url, GamehostError> {
        let query = Self::build_query(state)?;
        let payload = self.client.get_json("/", &query).await?;
        let url = extract_redirect(&payload)?;
        info!(
            game = state.game().map_or("", |g| g.id.as_str()),
            players = state.players(),
            host = url.host_str().unwrap_or(""),
            "checkout.resolved"
        );
        Ok(url)
    }
}
