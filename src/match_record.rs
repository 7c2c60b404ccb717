use crate::error::ScoutResult;
use crate::heroes_info::HeroCatalog;
use crate::player_names::{display_name, PlayerNames};
use crate::raw_data::{RawMatch, RawPlayer};
use crate::types::{AccountId, HeroId, HeroName, MatchId, PlayerName, TeamId};
use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::collections::{BTreeMap, BTreeSet};
use strum_macros::Display;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[strum(serialize = "radiant")]
    Radiant,
    #[strum(serialize = "dire")]
    Dire,
}

impl Side {
    /// No check that the team played the match at all: an unrelated id yields radiant.
    pub fn of_team(team_id: TeamId, dire_team_id: Option<TeamId>) -> Side {
        if dire_team_id == Some(team_id) {
            Side::Dire
        } else {
            Side::Radiant
        }
    }

    /// Team number used by draft events: 0 radiant, 1 dire.
    pub fn from_team_number(team: u8) -> Option<Side> {
        match team {
            0 => Some(Side::Radiant),
            1 => Some(Side::Dire),
            _ => None,
        }
    }

    /// Slots 0-4 are radiant, 128-132 dire.
    pub fn from_player_slot(player_slot: u32) -> Side {
        if player_slot < 100 {
            Side::Radiant
        } else {
            Side::Dire
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Radiant => Side::Dire,
            Side::Dire => Side::Radiant,
        }
    }

    pub fn won(self, radiant_win: bool) -> bool {
        match self {
            Side::Radiant => radiant_win,
            Side::Dire => !radiant_win,
        }
    }
}

/// Lane role as reported by the parsed replay. Display gives the short report code.
#[derive(
    Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display,
)]
#[repr(u8)]
pub enum Lane {
    #[strum(serialize = "S")]
    Safelane = 1,
    #[strum(serialize = "M")]
    Mid = 2,
    #[strum(serialize = "O")]
    Offlane = 3,
    #[strum(serialize = "J")]
    Jungle = 4,
}

/// Own pick of a drafted match.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DraftPick {
    pub name: HeroName,
    pub order: u32,
    pub lane: Option<Lane>,
    pub roaming: bool,
}

/// Hero played by a roster member in a match without draft data. There is no draft order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RosterPick {
    pub name: HeroName,
    pub lane: Option<Lane>,
    pub roaming: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DraftBan {
    pub name: HeroName,
    pub order: u32,
}

/// Read-only dependencies shared by every classification of a team's matches.
pub struct MatchContext<'a> {
    pub team_id: TeamId,
    pub roster: &'a BTreeSet<AccountId>,
    pub heroes: &'a HeroCatalog,
    pub names: &'a dyn PlayerNames,
    pub first_pick_order: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct ParsedMatchRecord {
    pub match_id: MatchId,
    pub team_id: TeamId,
    pub side: Side,
    pub win: bool,
    pub picks: BTreeMap<HeroId, DraftPick>,
    pub bans: BTreeMap<HeroId, DraftBan>,
    pub banned_against: BTreeMap<HeroId, DraftBan>,
    pub first_pick: bool,
    pub enemy_captain: PlayerName,
}

impl ParsedMatchRecord {
    pub fn classify(raw: &RawMatch, ctx: &MatchContext) -> ScoutResult<ParsedMatchRecord> {
        let side = Side::of_team(ctx.team_id, raw.dire_team_id);
        let mut record = ParsedMatchRecord {
            match_id: raw.match_id,
            team_id: ctx.team_id,
            side,
            win: side.won(raw.radiant_win),
            picks: BTreeMap::new(),
            bans: BTreeMap::new(),
            banned_against: BTreeMap::new(),
            first_pick: false,
            enemy_captain: raw
                .captain_of(side.opponent())
                .map(|captain| display_name(ctx.names, captain))
                .unwrap_or_default(),
        };
        record.read_draft(raw, ctx)?;
        record.read_player_info(&raw.players);
        Ok(record)
    }

    fn read_draft(&mut self, raw: &RawMatch, ctx: &MatchContext) -> ScoutResult<()> {
        let context = format!("draft of match {}", raw.match_id);
        let mut own_pick_seen = false;
        for event in raw.draft_events() {
            let own = event.side()? == self.side;
            // enemy pick, don't care
            if !own && event.is_pick {
                continue;
            }
            let name = ctx.heroes.get_hero(event.hero_id, &context)?.to_string();
            if event.is_pick {
                if !own_pick_seen {
                    own_pick_seen = true;
                    self.first_pick = event.order == ctx.first_pick_order;
                }
                self.picks.insert(
                    event.hero_id,
                    DraftPick {
                        name,
                        order: event.order,
                        lane: None,
                        roaming: false,
                    },
                );
            } else {
                let ban = DraftBan {
                    name,
                    order: event.order,
                };
                if own {
                    self.bans.insert(event.hero_id, ban);
                } else {
                    self.banned_against.insert(event.hero_id, ban);
                }
            }
        }
        Ok(())
    }

    /// Enemy heroes are not in `picks` and get skipped.
    fn read_player_info(&mut self, players: &[RawPlayer]) {
        for player in players {
            if let Some(pick) = self.picks.get_mut(&player.hero_id) {
                pick.lane = player.lane_role;
                pick.roaming = player.is_roaming.unwrap_or(false);
            }
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct UnparsedMatchRecord {
    pub match_id: MatchId,
    pub team_id: TeamId,
    pub side: Side,
    pub win: bool,
    pub picks: BTreeMap<HeroId, RosterPick>,
}

impl UnparsedMatchRecord {
    /// Only roster members are known to belong to the team here.
    pub fn classify(raw: &RawMatch, ctx: &MatchContext) -> ScoutResult<UnparsedMatchRecord> {
        let side = Side::of_team(ctx.team_id, raw.dire_team_id);
        let context = format!("players of match {}", raw.match_id);
        let mut picks = BTreeMap::new();
        for player in raw.players.iter() {
            let on_roster = player
                .account_id
                .map_or(false, |account_id| ctx.roster.contains(&account_id));
            if !on_roster {
                continue;
            }
            picks.insert(
                player.hero_id,
                RosterPick {
                    name: ctx.heroes.get_hero(player.hero_id, &context)?.to_string(),
                    lane: player.lane_role,
                    roaming: player.is_roaming.unwrap_or(false),
                },
            );
        }
        Ok(UnparsedMatchRecord {
            match_id: raw.match_id,
            team_id: ctx.team_id,
            side,
            win: side.won(raw.radiant_win),
            picks,
        })
    }
}

/// A classified match. The variant is chosen once, from the presence of draft events.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchRecord {
    Parsed(ParsedMatchRecord),
    Unparsed(UnparsedMatchRecord),
}

impl MatchRecord {
    pub fn classify(raw: &RawMatch, ctx: &MatchContext) -> ScoutResult<MatchRecord> {
        if raw.has_draft_data() {
            Ok(MatchRecord::Parsed(ParsedMatchRecord::classify(raw, ctx)?))
        } else {
            Ok(MatchRecord::Unparsed(UnparsedMatchRecord::classify(raw, ctx)?))
        }
    }

    pub fn match_id(&self) -> MatchId {
        match self {
            MatchRecord::Parsed(record) => record.match_id,
            MatchRecord::Unparsed(record) => record.match_id,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            MatchRecord::Parsed(record) => record.side,
            MatchRecord::Unparsed(record) => record.side,
        }
    }

    pub fn win(&self) -> bool {
        match self {
            MatchRecord::Parsed(record) => record.win,
            MatchRecord::Unparsed(record) => record.win,
        }
    }

    pub fn picked_heroes(&self) -> Vec<&str> {
        match self {
            MatchRecord::Parsed(record) => record.picks.values().map(|p| p.name.as_str()).collect(),
            MatchRecord::Unparsed(record) => {
                record.picks.values().map(|p| p.name.as_str()).collect()
            }
        }
    }
}
