//! Effects - side effects declared by the reducer

use crate::action::Action;
use crate::api::Geocoder;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Geocode `query`; the answer must come back tagged with `seq`
    Geocode { seq: u64, query: String },
}

/// Run a lookup and turn its outcome into the matching result action.
pub async fn geocode(geocoder: &dyn Geocoder, seq: u64, query: String) -> Action {
    tracing::debug!(seq, %query, "geocoding address");
    match geocoder.search(&query).await {
        Ok(places) => {
            tracing::debug!(seq, results = places.len(), "geocoding answered");
            Action::GeocodeDidLoad { seq, places }
        }
        Err(err) => {
            tracing::warn!(seq, %query, error = %err, "geocoding failed");
            Action::GeocodeDidError {
                seq,
                message: err.to_string(),
            }
        }
    }
}
