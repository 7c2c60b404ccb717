//! Typed shapes of the provider json consumed by the scouting core.
//! Records are validated here, once, so classification works on typed fields.
use crate::error::{ScoutError, ScoutResult};
use crate::match_record::{Lane, Side};
use crate::types::{AccountId, HeroId, MatchId, PlayerName, TeamId};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Player entry of a match.
#[derive(Deserialize, Debug, Clone)]
pub struct RawPlayer {
    #[serde(default)]
    pub account_id: Option<AccountId>,
    pub hero_id: HeroId,
    // laning stats, only present once the replay got parsed
    #[serde(default)]
    pub lane_role: Option<Lane>,
    #[serde(default)]
    pub is_roaming: Option<bool>,
    #[serde(default)]
    pub player_slot: Option<u32>,
}

/// Single pick or ban of the hero selection phase.
#[derive(Deserialize, Debug, Clone)]
pub struct RawDraftEvent {
    pub team: u8,
    pub is_pick: bool,
    pub order: u32,
    pub hero_id: HeroId,
}

impl RawDraftEvent {
    pub fn side(&self) -> ScoutResult<Side> {
        Side::from_team_number(self.team).ok_or_else(|| {
            ScoutError::MalformedMatch(format!(
                "draft event {} has team number {}",
                self.order, self.team
            ))
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawMatch {
    pub match_id: MatchId,
    #[serde(default)]
    pub dire_team_id: Option<TeamId>,
    #[serde(default)]
    pub radiant_team_id: Option<TeamId>,
    pub radiant_win: bool,
    pub players: Vec<RawPlayer>,
    #[serde(default)]
    pub picks_bans: Option<Vec<RawDraftEvent>>,
    #[serde(default)]
    pub radiant_captain: Option<AccountId>,
    #[serde(default)]
    pub dire_captain: Option<AccountId>,
}

impl RawMatch {
    /// Records missing required keys are rejected as malformed.
    pub fn from_json(match_json: serde_json::Value) -> ScoutResult<RawMatch> {
        let match_id = match_json["match_id"].as_u64();
        serde_json::from_value(match_json).map_err(|e| match match_id {
            Some(id) => ScoutError::MalformedMatch(format!("match {}: {}", id, e)),
            None => ScoutError::MalformedMatch(e.to_string()),
        })
    }

    /// Draft events exist only for drafted lobbies.
    pub fn has_draft_data(&self) -> bool {
        self.picks_bans
            .as_ref()
            .map_or(false, |events| !events.is_empty())
    }

    pub fn draft_events(&self) -> &[RawDraftEvent] {
        self.picks_bans.as_deref().unwrap_or(&[])
    }

    pub fn captain_of(&self, side: Side) -> Option<AccountId> {
        match side {
            Side::Radiant => self.radiant_captain,
            Side::Dire => self.dire_captain,
        }
    }
}

/// Entry of the player's all-time heroes feed.
#[derive(Deserialize, Debug, Clone)]
pub struct PlayerHeroStats {
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub hero_id: HeroId,
    pub games: u32,
    pub win: u32,
}

/// Entry of the player's recent matches feed.
#[derive(Deserialize, Debug, Clone)]
pub struct RecentMatch {
    #[serde(default)]
    pub match_id: Option<MatchId>,
    pub hero_id: HeroId,
    pub player_slot: u32,
    pub radiant_win: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrInt {
    Int(u64),
    Str(String),
}

fn id_from_str_or_int<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match StrOrInt::deserialize(deserializer)? {
        StrOrInt::Int(id) => Ok(id),
        StrOrInt::Str(id) => id.parse::<u64>().map_err(serde::de::Error::custom),
    }
}

/// Team name and roster read from a team info lookup.
#[derive(Debug, Clone)]
pub struct TeamInfo {
    pub team_id: TeamId,
    pub name: String,
    pub roster: BTreeSet<AccountId>,
}

impl TeamInfo {
    /// Reads a GetTeamInfoByTeamID result: `{"teams": [{"name", "player_0_account_id", ...}]}`.
    pub fn from_response(team_id: TeamId, response: &serde_json::Value) -> ScoutResult<TeamInfo> {
        let team = match response["teams"].as_array().and_then(|teams| teams.first()) {
            Some(team) => team,
            None => return Err(ScoutError::TeamNotFound(team_id)),
        };
        // the lookup starts at the requested id, so a different team means ours doesn't exist
        if let Some(found_id) = team["team_id"].as_u64() {
            if found_id != team_id {
                return Err(ScoutError::TeamNotFound(team_id));
            }
        }
        let fields = team
            .as_object()
            .ok_or_else(|| ScoutError::TeamNotFound(team_id))?;
        let name = team["name"].as_str().unwrap_or_default().to_string();
        let mut roster = BTreeSet::new();
        for (key, value) in fields {
            if !key.starts_with("player") || !key.ends_with("account_id") {
                continue;
            }
            let account_id = value
                .as_u64()
                .or_else(|| value.as_str().and_then(|s| s.parse::<u64>().ok()));
            match account_id {
                Some(id) => {
                    roster.insert(id);
                }
                None => warn!("Team {}: unreadable roster entry {} = {}", team_id, key, value),
            }
        }
        Ok(TeamInfo {
            team_id,
            name,
            roster,
        })
    }
}

/// Everything the fetch layer collected for a team.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeamData {
    #[serde(default)]
    pub info: serde_json::Value,
    #[serde(default)]
    pub matches: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlayerFeeds {
    #[serde(default)]
    pub heroes: Vec<PlayerHeroStats>,
    #[serde(default)]
    pub recent_matches: Vec<RecentMatch>,
}

/// Pre-fetched data of a whole report run.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScoutInput {
    #[serde(default)]
    pub teams: BTreeMap<TeamId, TeamData>,
    #[serde(default)]
    pub players: BTreeMap<AccountId, PlayerFeeds>,
    #[serde(default)]
    pub player_names: HashMap<AccountId, PlayerName>,
}
