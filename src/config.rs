//! Runtime configuration from the command line and `CAREVIEW_*` variables

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, GeocodeError, NominatimClient};
use crate::messages::Locale;
use crate::state::{AppState, DEFAULT_MAP_HEIGHT, MapHeight, NurseRecord};

#[derive(clap::Args, Debug, Clone)]
pub struct Settings {
    /// Address to show on the map (defaults to the nurse record's address)
    #[arg(long, short, env = "CAREVIEW_ADDRESS")]
    pub address: Option<String>,

    /// Map height as a CSS length (px, em, rem, %, vh) or a row count
    #[arg(long, env = "CAREVIEW_MAP_HEIGHT", default_value = DEFAULT_MAP_HEIGHT)]
    pub map_height: String,

    /// JSON file holding the nurse record to summarize
    #[arg(long, short, env = "CAREVIEW_NURSE")]
    pub nurse: Option<PathBuf>,

    /// Geocoding search endpoint (Nominatim compatible)
    #[arg(long, env = "CAREVIEW_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// User agent sent with geocoding requests
    #[arg(long, env = "CAREVIEW_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Geocoding request timeout in seconds (minimum 1)
    #[arg(
        long,
        env = "CAREVIEW_TIMEOUT_SECS",
        default_value = "10",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Language of the map notices
    #[arg(long, value_enum, env = "CAREVIEW_LOCALE", default_value = "en")]
    pub locale: Locale,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, env = "CAREVIEW_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn geocoder(&self) -> Result<NominatimClient, GeocodeError> {
        NominatimClient::new(
            self.endpoint.clone(),
            &self.user_agent,
            Duration::from_secs(self.timeout_secs),
        )
    }

    pub async fn load_nurse(&self) -> io::Result<Option<NurseRecord>> {
        let Some(path) = &self.nurse else {
            return Ok(None);
        };
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to read nurse record {}: {}", path.display(), e),
            )
        })?;
        parse_nurse(&json).map(Some)
    }

    /// Initial state: explicit address first, then the record's address.
    pub fn initial_state(&self, nurse: Option<NurseRecord>) -> AppState {
        let address = self
            .address
            .clone()
            .or_else(|| nurse.as_ref().and_then(|n| n.address.clone()))
            .unwrap_or_default();
        AppState::new(address, self.locale)
            .with_map_height(MapHeight::new(self.map_height.clone()))
            .with_nurse(nurse)
    }
}

pub fn parse_nurse(json: &str) -> io::Result<NurseRecord> {
    serde_json::from_str(json).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Nurse record corrupted: {}", e),
        )
    })
}
