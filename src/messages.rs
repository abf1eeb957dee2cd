//! User-facing strings for the map notices

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// External map search offered when an address cannot be geocoded
pub const EXTERNAL_SEARCH_URL: &str = "https://www.google.com/maps/place/";

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

pub struct Messages {
    pub server_error: &'static str,
    /// Followed by the external search link.
    pub not_found: &'static str,
    pub invalid_address: &'static str,
    pub refresh: &'static str,
    pub recenter: &'static str,
    pub resolving: &'static str,
    pub nurse_title: &'static str,
    pub no_record: &'static str,
}

static EN: Messages = Messages {
    server_error: "Error while displaying the map. Please try again.",
    not_found: "Address not found. Try your luck elsewhere:",
    invalid_address: "Invalid address.",
    refresh: "Refresh",
    recenter: "Recenter map",
    resolving: "Locating address...",
    nurse_title: "Nurse",
    no_record: "No record",
};

static FR: Messages = Messages {
    server_error: "Erreur lors de l'affichage de la carte. Veuillez réessayer.",
    not_found: "Adresse non trouvée. Tentez votre chance ailleurs :",
    invalid_address: "Adresse non valide.",
    refresh: "Rafraichir",
    recenter: "Recentrer la carte",
    resolving: "Recherche de l'adresse...",
    nurse_title: "Infirmière",
    no_record: "Aucune fiche",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Fr => &FR,
        }
    }

    pub fn not_found(self, address: &str) -> String {
        format!("{} {}", self.messages().not_found, search_link(address))
    }
}

/// Link to the external map search for `address`
pub fn search_link(address: &str) -> String {
    format!("{}{}", EXTERNAL_SEARCH_URL, urlencoding::encode(address.trim()))
}
