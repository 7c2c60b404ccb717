use crate::error::{ScoutError, ScoutResult};
use crate::types::{HeroId, HeroName};
use serde_json;
use std::collections::HashMap;
use std::fs::read_to_string;

/// Contains map HeroId -> hero display name. Read-only for the whole report run.
#[derive(Debug, Clone, Default)]
pub struct HeroCatalog {
    heroes: HashMap<HeroId, HeroName>,
}

impl HeroCatalog {
    pub fn new(heroes: HashMap<HeroId, HeroName>) -> Self {
        HeroCatalog { heroes }
    }

    /// Initializes from json file with heroes constants.
    /// File may be retrieved by
    /// > wget https://raw.githubusercontent.com/odota/dotaconstants/master/build/heroes.json
    /// or saved from the steam IEconDOTA2_570/GetHeroes endpoint.
    pub fn init(heroes_filename: &str) -> ScoutResult<Self> {
        let raw_heroes: serde_json::Value =
            serde_json::from_str(read_to_string(heroes_filename)?.as_str())?;
        let catalog = HeroCatalog::from_json(&raw_heroes)?;
        info!("Loaded {} heroes from {}", catalog.len(), heroes_filename);
        Ok(catalog)
    }

    pub fn from_json(raw_heroes: &serde_json::Value) -> ScoutResult<Self> {
        if let Some(hero_list) = raw_heroes["heroes"].as_array() {
            return HeroCatalog::from_hero_list(hero_list);
        }
        let heroes_constants = raw_heroes.as_object().ok_or_else(|| {
            ScoutError::Config("Heroes constants is not json object.".to_string())
        })?;
        let mut heroes = HashMap::new();
        for (id, hero) in heroes_constants {
            let hero_id = id.parse::<HeroId>().map_err(|_| {
                ScoutError::Config(format!("hero id {} is not a number", id))
            })?;
            heroes.insert(hero_id, localized_name(hero_id, hero)?);
        }
        Ok(HeroCatalog { heroes })
    }

    fn from_hero_list(hero_list: &[serde_json::Value]) -> ScoutResult<Self> {
        let mut heroes = HashMap::new();
        for hero in hero_list {
            let hero_id = hero["id"].as_u64().ok_or_else(|| {
                ScoutError::Config(format!("hero entry without numeric id: {}", hero))
            })?;
            heroes.insert(hero_id, localized_name(hero_id, hero)?);
        }
        Ok(HeroCatalog { heroes })
    }

    /// Unknown ids mean the constants are stale; the caller must not drop the hero silently.
    pub fn get_hero(&self, hero_id: HeroId, context: &str) -> ScoutResult<&str> {
        self.heroes
            .get(&hero_id)
            .map(|name| name.as_str())
            .ok_or_else(|| ScoutError::UnknownHero {
                hero_id,
                context: context.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

fn localized_name(hero_id: HeroId, hero: &serde_json::Value) -> ScoutResult<HeroName> {
    Ok(hero["localized_name"]
        .as_str()
        .ok_or_else(|| {
            ScoutError::Config(format!(
                "no field localized_name for hero_id: {}",
                hero_id
            ))
        })?
        .to_string())
}
