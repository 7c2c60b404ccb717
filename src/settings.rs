use crate::error::{ScoutError, ScoutResult};
use crate::types::{LeagueId, MatchId};
use serde::Deserialize;

/// Draft order index of the first pick after the opening ban phase (captain's mode).
pub const FIRST_PICK_ORDER: u32 = 6;

pub const DEFAULT_PALETTE: [&str; 15] = [
    "white", "yellow", "orange", "cyan", "silver", "#FF7F50", "#FFD700", "#ADFF2F", "#40E0D0",
    "#00BFFF", "#D8BFD8", "#FFC0CB", "#FAEBD7", "#E6E6FA", "#FFD700",
];

const MATCH_URL_TEMPLATE: &str = "http://www.dotabuff.com/matches/{}";

/// Report run settings. Built once and passed explicitly to the aggregation and report code.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub league_id: Option<LeagueId>,
    pub first_pick_order: u32,
    pub palette: Vec<String>,
    pub top_heroes_limit: usize,
    /// Palette index used to flag heroes never lost with.
    pub perfect_record_index: u32,
    pub match_url_template: String,
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        ScoutConfig {
            league_id: None,
            first_pick_order: FIRST_PICK_ORDER,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            top_heroes_limit: 5,
            perfect_record_index: 2,
            match_url_template: MATCH_URL_TEMPLATE.to_string(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl ScoutConfig {
    /// Layers defaults, an optional settings file and `DOTASCOUT_*` environment variables.
    pub fn load(settings_file: Option<&str>) -> ScoutResult<ScoutConfig> {
        let defaults = ScoutConfig::default();
        let mut settings = config::Config::new();
        settings.set_default("first_pick_order", defaults.first_pick_order as i64)?;
        settings.set_default("palette", defaults.palette.clone())?;
        settings.set_default("top_heroes_limit", defaults.top_heroes_limit as i64)?;
        settings.set_default("perfect_record_index", defaults.perfect_record_index as i64)?;
        settings.set_default("match_url_template", defaults.match_url_template.clone())?;
        settings.set_default("log_level", defaults.log_level.clone())?;
        if let Some(filename) = settings_file {
            info!("Reading settings from {}", filename);
            settings.merge(config::File::with_name(filename))?;
        }
        settings.merge(config::Environment::with_prefix("DOTASCOUT"))?;
        let scout_config: ScoutConfig = settings.try_into()?;
        scout_config.validate()?;
        Ok(scout_config)
    }

    pub fn validate(&self) -> ScoutResult<()> {
        if self.palette.is_empty() {
            return Err(ScoutError::Config("palette must not be empty".to_string()));
        }
        if self.perfect_record_index == 0 || self.perfect_record_index as usize > self.palette.len()
        {
            return Err(ScoutError::Config(format!(
                "perfect_record_index {} is outside of the palette (1..={})",
                self.perfect_record_index,
                self.palette.len()
            )));
        }
        if !self.match_url_template.contains("{}") {
            return Err(ScoutError::Config(
                "match_url_template has no {} placeholder".to_string(),
            ));
        }
        Ok(())
    }

    pub fn match_url(&self, match_id: MatchId) -> String {
        self.match_url_template
            .replacen("{}", &match_id.to_string(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let scout_config = ScoutConfig::default();
        assert!(scout_config.validate().is_ok());
        assert_eq!(scout_config.palette.len(), 15);
        assert_eq!(scout_config.first_pick_order, 6);
        assert_eq!(
            scout_config.match_url(5583392128),
            "http://www.dotabuff.com/matches/5583392128"
        );
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let scout_config = ScoutConfig::load(None).unwrap();
        assert_eq!(scout_config.top_heroes_limit, 5);
        assert_eq!(scout_config.perfect_record_index, 2);
        assert_eq!(scout_config.palette[0], "white");
    }

    #[test]
    fn perfect_record_index_must_fit_palette() {
        let scout_config = ScoutConfig {
            palette: vec!["white".to_string()],
            ..ScoutConfig::default()
        };
        assert!(matches!(
            scout_config.validate(),
            Err(ScoutError::Config(_))
        ));
    }
}
