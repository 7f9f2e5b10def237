//! User settings for duo-budget
//!
//! Holds the display names of the two parties and the currency symbol used
//! when printing amounts.

use serde::{Deserialize, Serialize};

use super::paths::DuoPaths;
use crate::error::DuoError;
use crate::models::{Buyer, Money, Party};

/// User settings for duo-budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Display name for the first party
    #[serde(default = "default_party_a_name")]
    pub party_a_name: String,

    /// Display name for the second party
    #[serde(default = "default_party_b_name")]
    pub party_b_name: String,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_party_a_name() -> String {
    "Partner A".to_string()
}

fn default_party_b_name() -> String {
    "Partner B".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            party_a_name: default_party_a_name(),
            party_b_name: default_party_b_name(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &DuoPaths) -> Result<Self, DuoError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| DuoError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| DuoError::Config(format!("Failed to parse settings file: {}", e)))
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DuoPaths) -> Result<(), DuoError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DuoError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DuoError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), DuoError> {
        let a = self.party_a_name.trim();
        let b = self.party_b_name.trim();

        if a.is_empty() || b.is_empty() {
            return Err(DuoError::Validation("Party names cannot be empty".into()));
        }
        if a.eq_ignore_ascii_case(b) {
            return Err(DuoError::Validation(format!(
                "Party names must differ (both are '{}')",
                a
            )));
        }
        if a.eq_ignore_ascii_case("joint") || b.eq_ignore_ascii_case("joint") {
            return Err(DuoError::Validation(
                "'Joint' is reserved for shared payments".into(),
            ));
        }

        Ok(())
    }

    /// Display name for a party
    pub fn party_name(&self, party: Party) -> &str {
        match party {
            Party::PartyA => &self.party_a_name,
            Party::PartyB => &self.party_b_name,
        }
    }

    /// Display name for a buyer
    pub fn buyer_label(&self, buyer: Buyer) -> &str {
        match buyer.party() {
            Some(party) => self.party_name(party),
            None => "Joint",
        }
    }

    /// Parse a buyer from user input
    ///
    /// Accepts `a`, `b`, `joint`, or either configured party name,
    /// case-insensitively.
    pub fn parse_buyer(&self, input: &str) -> Option<Buyer> {
        let input = input.trim();

        if input.eq_ignore_ascii_case("a") || input.eq_ignore_ascii_case(&self.party_a_name) {
            Some(Buyer::PartyA)
        } else if input.eq_ignore_ascii_case("b")
            || input.eq_ignore_ascii_case(&self.party_b_name)
        {
            Some(Buyer::PartyB)
        } else if input.eq_ignore_ascii_case("joint") {
            Some(Buyer::Joint)
        } else {
            None
        }
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.party_a_name, "Partner A");
        assert_eq!(settings.party_b_name, "Partner B");
        assert_eq!(settings.currency_symbol, "$");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuoPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            party_a_name: "Bruno".into(),
            party_b_name: "Isadora".into(),
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert!(paths.is_initialized());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"party_a_name":"Sam"}"#).unwrap();
        assert_eq!(settings.party_a_name, "Sam");
        assert_eq!(settings.party_b_name, "Partner B");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_parse_buyer() {
        let settings = Settings {
            party_a_name: "Bruno".into(),
            party_b_name: "Isadora".into(),
            ..Settings::default()
        };

        assert_eq!(settings.parse_buyer("a"), Some(Buyer::PartyA));
        assert_eq!(settings.parse_buyer("bruno"), Some(Buyer::PartyA));
        assert_eq!(settings.parse_buyer(" ISADORA "), Some(Buyer::PartyB));
        assert_eq!(settings.parse_buyer("Joint"), Some(Buyer::Joint));
        assert_eq!(settings.parse_buyer("someone"), None);

        assert_eq!(settings.buyer_label(Buyer::PartyB), "Isadora");
        assert_eq!(settings.buyer_label(Buyer::Joint), "Joint");
    }

    #[test]
    fn test_validate_rejects_clashing_names() {
        let mut settings = Settings {
            party_a_name: "Sam".into(),
            party_b_name: "sam".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        settings.party_b_name = "Joint".into();
        assert!(settings.validate().is_err());

        settings.party_b_name = "  ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_format_money() {
        let settings = Settings {
            currency_symbol: "R$".into(),
            ..Settings::default()
        };
        assert_eq!(settings.format_money(Money::from_cents(12345)), "R$123.45");
    }
}
