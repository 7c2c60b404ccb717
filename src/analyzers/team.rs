use super::HeroTally;
use crate::error::ScoutResult;
use crate::heroes_info::HeroCatalog;
use crate::match_record::{MatchContext, MatchRecord, ParsedMatchRecord, UnparsedMatchRecord};
use crate::player_names::PlayerNames;
use crate::raw_data::{RawMatch, TeamInfo};
use crate::settings::ScoutConfig;
use crate::types::{AccountId, HeroName, MatchId, TeamId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Final aggregate of a team's matches. Only built once every match has been folded.
#[derive(Serialize, Debug, Clone)]
pub struct TeamProfile {
    pub team_id: TeamId,
    pub name: String,
    pub roster: BTreeSet<AccountId>,
    /// Most recent first.
    pub parsed_matches: Vec<ParsedMatchRecord>,
    pub unparsed_matches: Vec<UnparsedMatchRecord>,
    pub pick_count: BTreeMap<HeroName, HeroTally>,
    pub ban_count: BTreeMap<HeroName, u32>,
    pub banned_against_count: BTreeMap<HeroName, u32>,
    pub skipped_matches: u32,
}

impl TeamProfile {
    pub fn match_count(&self) -> usize {
        self.parsed_matches.len() + self.unparsed_matches.len()
    }

    pub fn pick_tally(&self, hero: &str) -> HeroTally {
        self.pick_count.get(hero).cloned().unwrap_or_default()
    }

    pub fn bans_of(&self, hero: &str) -> u32 {
        self.ban_count.get(hero).cloned().unwrap_or_default()
    }

    pub fn bans_against(&self, hero: &str) -> u32 {
        self.banned_against_count
            .get(hero)
            .cloned()
            .unwrap_or_default()
    }
}

/// Running counters, private to a single `aggregate` call.
#[derive(Default)]
struct TeamTallies {
    parsed_matches: Vec<ParsedMatchRecord>,
    unparsed_matches: Vec<UnparsedMatchRecord>,
    pick_count: BTreeMap<HeroName, HeroTally>,
    ban_count: BTreeMap<HeroName, u32>,
    banned_against_count: BTreeMap<HeroName, u32>,
}

impl TeamTallies {
    fn fold(&mut self, record: MatchRecord) {
        let win = record.win();
        for hero in record.picked_heroes() {
            self.pick_count
                .entry(hero.to_string())
                .or_default()
                .add_score(win);
        }
        match record {
            MatchRecord::Parsed(parsed) => {
                for ban in parsed.bans.values() {
                    *self.ban_count.entry(ban.name.clone()).or_insert(0) += 1;
                }
                for ban in parsed.banned_against.values() {
                    *self
                        .banned_against_count
                        .entry(ban.name.clone())
                        .or_insert(0) += 1;
                }
                self.parsed_matches.push(parsed);
            }
            MatchRecord::Unparsed(unparsed) => self.unparsed_matches.push(unparsed),
        }
    }
}

/// Folds a team's match history into a `TeamProfile`.
pub struct TeamAggregator<'a> {
    heroes: &'a HeroCatalog,
    names: &'a dyn PlayerNames,
    first_pick_order: u32,
}

impl<'a> TeamAggregator<'a> {
    pub fn new(
        heroes: &'a HeroCatalog,
        names: &'a dyn PlayerNames,
        config: &ScoutConfig,
    ) -> TeamAggregator<'a> {
        TeamAggregator {
            heroes,
            names,
            first_pick_order: config.first_pick_order,
        }
    }

    /// Malformed match json is skipped with a warning; an unknown hero aborts the team,
    /// as its counts could not be trusted.
    pub fn aggregate(
        &self,
        team: TeamInfo,
        match_jsons: Vec<serde_json::Value>,
    ) -> ScoutResult<TeamProfile> {
        info!(
            "Aggregating {} matches of team {} ({}).",
            match_jsons.len(),
            team.name,
            team.team_id
        );
        let mut skipped_matches = 0;
        let mut seen: HashSet<MatchId> = HashSet::new();
        let mut raw_matches = vec![];
        for match_json in match_jsons {
            let raw = skip_malformed!(RawMatch::from_json(match_json), skipped_matches);
            if !seen.insert(raw.match_id) {
                debug!("Match {} listed twice, counting it once.", raw.match_id);
                continue;
            }
            raw_matches.push(raw);
        }
        raw_matches.sort_by(|a, b| b.match_id.cmp(&a.match_id));

        let ctx = MatchContext {
            team_id: team.team_id,
            roster: &team.roster,
            heroes: self.heroes,
            names: self.names,
            first_pick_order: self.first_pick_order,
        };
        let mut tallies = TeamTallies::default();
        for raw in raw_matches.iter() {
            let record = skip_malformed!(MatchRecord::classify(raw, &ctx), skipped_matches);
            tallies.fold(record);
        }
        info!(
            "Team {}: {} parsed, {} unparsed, {} skipped matches.",
            team.team_id,
            tallies.parsed_matches.len(),
            tallies.unparsed_matches.len(),
            skipped_matches
        );
        Ok(TeamProfile {
            team_id: team.team_id,
            name: team.name,
            roster: team.roster,
            parsed_matches: tallies.parsed_matches,
            unparsed_matches: tallies.unparsed_matches,
            pick_count: tallies.pick_count,
            ban_count: tallies.ban_count,
            banned_against_count: tallies.banned_against_count,
            skipped_matches,
        })
    }
}
