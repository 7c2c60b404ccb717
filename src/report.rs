//! Render-ready scouting report. Colors are only assigned from finished `TeamProfile`s,
//! so every occurrence of a hero carries the color of its total count.
use crate::analyzers::players::{PlayerProfile, TopHero};
use crate::analyzers::team::{TeamAggregator, TeamProfile};
use crate::color_map::{FrequencyColorMap, LegendEntry};
use crate::error::{ScoutError, ScoutResult};
use crate::heroes_info::HeroCatalog;
use crate::match_record::{Lane, ParsedMatchRecord, Side, UnparsedMatchRecord};
use crate::player_names::PlayerNames;
use crate::raw_data::{ScoutInput, TeamInfo};
use crate::settings::ScoutConfig;
use crate::types::{AccountId, HeroName, MatchId, PlayerName, TeamId};
use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HeroCell {
    pub hero: HeroName,
    pub label: String,
    pub count: u32,
    pub highlight: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ParsedMatchRow {
    pub match_id: MatchId,
    pub picks: Vec<HeroCell>,
    pub pick_order: &'static str,
    pub result: &'static str,
    pub side: Side,
    pub enemy_captain: PlayerName,
    pub banned_against: Vec<HeroCell>,
    pub bans: Vec<HeroCell>,
    pub match_url: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct UnparsedMatchRow {
    pub match_id: MatchId,
    pub picks: Vec<HeroCell>,
    pub result: &'static str,
    pub side: Side,
    pub match_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PickSummaryRow {
    pub hero: HeroName,
    pub count: u32,
    pub wins: u32,
    pub win_rate: String,
    /// Set for heroes the team never lost with.
    pub highlight: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CountSummaryRow {
    pub hero: HeroName,
    pub count: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct TeamReport {
    pub team_id: TeamId,
    pub name: String,
    pub parsed_matches: Vec<ParsedMatchRow>,
    pub unparsed_matches: Vec<UnparsedMatchRow>,
    pub picks: Vec<PickSummaryRow>,
    pub banned_against: Vec<CountSummaryRow>,
    pub bans: Vec<CountSummaryRow>,
    pub skipped_matches: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecentHeroRow {
    pub hero: HeroName,
    pub count: u32,
    pub win_rate: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct PlayerReport {
    pub account_id: AccountId,
    pub name: PlayerName,
    pub top_heroes: Vec<TopHero>,
    pub recent_heroes: Vec<RecentHeroRow>,
}

/// A team or player that could not be scouted, with the reason.
#[derive(Serialize, Debug, Clone)]
pub struct ScoutFailure {
    pub id: u64,
    pub reason: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ScoutReport {
    pub teams: Vec<TeamReport>,
    pub failed_teams: Vec<ScoutFailure>,
    pub players: Vec<PlayerReport>,
    pub failed_players: Vec<ScoutFailure>,
    pub legend: Vec<LegendEntry>,
}

pub struct ReportBuilder<'a> {
    config: &'a ScoutConfig,
    heroes: &'a HeroCatalog,
    names: &'a dyn PlayerNames,
    colors: FrequencyColorMap,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(
        config: &'a ScoutConfig,
        heroes: &'a HeroCatalog,
        names: &'a dyn PlayerNames,
    ) -> ScoutResult<ReportBuilder<'a>> {
        config.validate()?;
        Ok(ReportBuilder {
            config,
            heroes,
            names,
            colors: FrequencyColorMap::new(config.palette.clone())?,
        })
    }

    /// Aggregates every requested team first, then renders. A failing team doesn't stop the others.
    pub fn build(
        mut self,
        input: &ScoutInput,
        team_ids: &[TeamId],
        player_ids: &[AccountId],
    ) -> ScoutResult<ScoutReport> {
        if !team_ids.is_empty() && self.config.league_id.is_none() {
            return Err(ScoutError::MissingLeagueId);
        }
        if team_ids.contains(&0) {
            return Err(ScoutError::Config("team id 0 is not a valid team".to_string()));
        }

        let mut failed_teams = vec![];
        let mut profiles = vec![];
        for &team_id in team_ids.iter().unique() {
            match self.team_profile(input, team_id) {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    error!("Unable to scout team {}: {}", team_id, e);
                    failed_teams.push(ScoutFailure {
                        id: team_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let teams = profiles
            .iter()
            .map(|profile| self.render_team(profile))
            .collect::<ScoutResult<Vec<TeamReport>>>()?;

        let mut accounts: BTreeSet<AccountId> = player_ids.iter().cloned().collect();
        for profile in profiles.iter() {
            accounts.extend(profile.roster.iter().cloned());
        }
        let (players, failed_players) = self.players(input, &accounts);

        Ok(ScoutReport {
            teams,
            failed_teams,
            players,
            failed_players,
            legend: self.colors.legend(),
        })
    }

    fn team_profile(&self, input: &ScoutInput, team_id: TeamId) -> ScoutResult<TeamProfile> {
        let team_data = match input.teams.get(&team_id) {
            Some(data) => data,
            None => return Err(ScoutError::TeamNotFound(team_id)),
        };
        let team = TeamInfo::from_response(team_id, &team_data.info)?;
        TeamAggregator::new(self.heroes, self.names, self.config)
            .aggregate(team, team_data.matches.clone())
    }

    fn render_team(&mut self, profile: &TeamProfile) -> ScoutResult<TeamReport> {
        let parsed_matches = profile
            .parsed_matches
            .iter()
            .map(|record| self.render_parsed(profile, record))
            .collect();
        let unparsed_matches = profile
            .unparsed_matches
            .iter()
            .map(|record| self.render_unparsed(profile, record))
            .collect();
        Ok(TeamReport {
            team_id: profile.team_id,
            name: profile.name.clone(),
            parsed_matches,
            unparsed_matches,
            picks: self.pick_summary(profile)?,
            banned_against: count_summary(&profile.banned_against_count),
            bans: count_summary(&profile.ban_count),
            skipped_matches: profile.skipped_matches,
        })
    }

    fn render_parsed(&mut self, profile: &TeamProfile, record: &ParsedMatchRecord) -> ParsedMatchRow {
        let picks = record
            .picks
            .values()
            .sorted_by_key(|pick| pick.order)
            .map(|pick| {
                let count = profile.pick_tally(&pick.name).count;
                self.cell(&pick.name, pick.lane, pick.roaming, count)
            })
            .collect();
        let banned_against = record
            .banned_against
            .values()
            .sorted_by_key(|ban| ban.order)
            .map(|ban| self.cell(&ban.name, None, false, profile.bans_against(&ban.name)))
            .collect();
        let bans = record
            .bans
            .values()
            .sorted_by_key(|ban| ban.order)
            .map(|ban| self.cell(&ban.name, None, false, profile.bans_of(&ban.name)))
            .collect();
        ParsedMatchRow {
            match_id: record.match_id,
            picks,
            pick_order: if record.first_pick { "FP" } else { "SP" },
            result: result_code(record.win),
            side: record.side,
            enemy_captain: record.enemy_captain.clone(),
            banned_against,
            bans,
            match_url: self.config.match_url(record.match_id),
        }
    }

    fn render_unparsed(
        &mut self,
        profile: &TeamProfile,
        record: &UnparsedMatchRecord,
    ) -> UnparsedMatchRow {
        let picks = record
            .picks
            .values()
            .sorted_by_key(|pick| pick.lane)
            .map(|pick| {
                let count = profile.pick_tally(&pick.name).count;
                self.cell(&pick.name, pick.lane, pick.roaming, count)
            })
            .collect();
        UnparsedMatchRow {
            match_id: record.match_id,
            picks,
            result: result_code(record.win),
            side: record.side,
            match_url: self.config.match_url(record.match_id),
        }
    }

    fn cell(&mut self, hero: &str, lane: Option<Lane>, roaming: bool, count: u32) -> HeroCell {
        HeroCell {
            hero: hero.to_string(),
            label: hero_label(hero, lane, roaming),
            count,
            highlight: self.colors.lookup(count),
        }
    }

    /// Most picked first, ties by name.
    fn pick_summary(&self, profile: &TeamProfile) -> ScoutResult<Vec<PickSummaryRow>> {
        let perfect_highlight = self.colors.token(self.config.perfect_record_index);
        profile
            .pick_count
            .iter()
            .sorted_by(|(_, a), (_, b)| b.count.cmp(&a.count))
            .map(|(hero, tally)| -> ScoutResult<PickSummaryRow> {
                Ok(PickSummaryRow {
                    hero: hero.clone(),
                    count: tally.count,
                    wins: tally.wins,
                    win_rate: tally.win_rate()?,
                    highlight: if tally.is_perfect() {
                        Some(perfect_highlight.to_string())
                    } else {
                        None
                    },
                })
            })
            .collect()
    }

    /// Players missing from the input are skipped; broken feeds are reported.
    fn players(
        &self,
        input: &ScoutInput,
        accounts: &BTreeSet<AccountId>,
    ) -> (Vec<PlayerReport>, Vec<ScoutFailure>) {
        let mut players = vec![];
        let mut failures = vec![];
        for &account_id in accounts {
            let feeds = match input.players.get(&account_id) {
                Some(feeds) => feeds,
                None => {
                    warn!("No data available for player {}, skipping.", account_id);
                    continue;
                }
            };
            let profile = PlayerProfile::build(
                account_id,
                self.heroes,
                self.names,
                &feeds.heroes,
                &feeds.recent_matches,
                self.config.top_heroes_limit,
            );
            match profile.and_then(player_report) {
                Ok(report) => players.push(report),
                Err(e) => {
                    error!("Unable to build profile of player {}: {}", account_id, e);
                    failures.push(ScoutFailure {
                        id: account_id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        players.sort_by_key(|player| player.name.to_lowercase());
        (players, failures)
    }
}

fn player_report(profile: PlayerProfile) -> ScoutResult<PlayerReport> {
    let recent_heroes = profile
        .recent_heroes
        .iter()
        .sorted_by(|(_, a), (_, b)| b.count.cmp(&a.count))
        .map(|(hero, tally)| -> ScoutResult<RecentHeroRow> {
            Ok(RecentHeroRow {
                hero: hero.clone(),
                count: tally.count,
                win_rate: tally.win_rate()?,
            })
        })
        .collect::<ScoutResult<Vec<RecentHeroRow>>>()?;
    Ok(PlayerReport {
        account_id: profile.account_id,
        name: profile.name,
        top_heroes: profile.top_heroes,
        recent_heroes,
    })
}

fn count_summary(counts: &BTreeMap<HeroName, u32>) -> Vec<CountSummaryRow> {
    counts
        .iter()
        .sorted_by(|(_, a), (_, b)| b.cmp(a))
        .map(|(hero, &count)| CountSummaryRow {
            hero: hero.clone(),
            count,
        })
        .collect()
}

fn result_code(win: bool) -> &'static str {
    if win {
        "W"
    } else {
        "L"
    }
}

/// e.g. "Invoker M", "Crystal Maiden J (R)".
pub fn hero_label(hero: &str, lane: Option<Lane>, roaming: bool) -> String {
    let mut label = hero.to_string();
    if let Some(lane) = lane {
        label.push(' ');
        label.push_str(&lane.to_string());
    }
    if roaming {
        label.push_str(" (R)");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn heroes() -> HeroCatalog {
        let mut heroes = HashMap::new();
        heroes.insert(1, "Hero A".to_string());
        heroes.insert(2, "Hero B".to_string());
        heroes.insert(3, "Hero C".to_string());
        HeroCatalog::new(heroes)
    }

    fn config() -> ScoutConfig {
        ScoutConfig {
            league_id: Some(12027),
            ..ScoutConfig::default()
        }
    }

    fn input(json: &str) -> ScoutInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn labels() {
        assert_eq!(hero_label("Hero A", Some(Lane::Mid), false), "Hero A M");
        assert_eq!(hero_label("Hero A", Some(Lane::Jungle), true), "Hero A J (R)");
        assert_eq!(hero_label("Hero A", None, false), "Hero A");
    }

    #[test]
    fn teams_need_league_id() {
        let heroes = heroes();
        let names: HashMap<AccountId, PlayerName> = HashMap::new();
        let config = ScoutConfig::default();
        let result = ReportBuilder::new(&config, &heroes, &names)
            .unwrap()
            .build(&ScoutInput::default(), &[2586976], &[]);
        assert!(matches!(result, Err(ScoutError::MissingLeagueId)));
    }

    #[test]
    fn missing_team_does_not_stop_others() {
        let heroes = heroes();
        let names: HashMap<AccountId, PlayerName> = HashMap::new();
        let config = config();
        let input = input(
            r#"{"teams": {
                "5": {"info": {"teams": []}, "matches": []},
                "2586976": {"info": {"teams": [{"team_id": 2586976, "name": "OG", "player_0_account_id": 111}]},
                            "matches": []}}}"#,
        );
        let report = ReportBuilder::new(&config, &heroes, &names)
            .unwrap()
            .build(&input, &[5, 2586976, 77], &[])
            .unwrap();
        assert_eq!(report.teams.len(), 1);
        assert_eq!(report.teams[0].name, "OG");
        let failed: Vec<u64> = report.failed_teams.iter().map(|f| f.id).collect();
        assert_eq!(failed, vec![5, 77]);
        assert!(report.legend.is_empty());
    }

    #[test]
    fn every_occurrence_uses_final_count() {
        let heroes = heroes();
        let names: HashMap<AccountId, PlayerName> = HashMap::new();
        let config = config();
        let input = input(
            r#"{"teams": {"2586976": {
                "info": {"teams": [{"team_id": 2586976, "name": "OG", "player_0_account_id": 111}]},
                "matches": [
                    {"match_id": 3, "radiant_win": true, "players": [],
                     "picks_bans": [{"team": 1, "is_pick": false, "order": 0, "hero_id": 3},
                                    {"team": 0, "is_pick": true, "order": 6, "hero_id": 1},
                                    {"team": 0, "is_pick": true, "order": 8, "hero_id": 2}]},
                    {"match_id": 2, "radiant_win": false, "players": [],
                     "picks_bans": [{"team": 1, "is_pick": false, "order": 0, "hero_id": 3},
                                    {"team": 0, "is_pick": true, "order": 7, "hero_id": 1}]},
                    {"match_id": 1, "radiant_win": true, "players": [
                        {"account_id": 111, "hero_id": 1, "lane_role": 2, "is_roaming": true, "player_slot": 0}]}
                ]}}}"#,
        );
        let report = ReportBuilder::new(&config, &heroes, &names)
            .unwrap()
            .build(&input, &[2586976], &[])
            .unwrap();
        let team = &report.teams[0];

        // Hero A appears 3 times: every cell carries the count-3 token.
        let hero_a_cells: Vec<&HeroCell> = team
            .parsed_matches
            .iter()
            .flat_map(|m| m.picks.iter())
            .chain(team.unparsed_matches.iter().flat_map(|m| m.picks.iter()))
            .filter(|cell| cell.hero == "Hero A")
            .collect();
        assert_eq!(hero_a_cells.len(), 3);
        for cell in hero_a_cells {
            assert_eq!(cell.count, 3);
            assert_eq!(cell.highlight, "orange");
        }

        let newest = &team.parsed_matches[0];
        assert_eq!(newest.match_id, 3);
        assert_eq!(newest.pick_order, "FP");
        assert_eq!(newest.result, "W");
        assert_eq!(newest.picks[0].hero, "Hero A");
        assert_eq!(newest.picks[1].highlight, "white");
        assert_eq!(newest.banned_against[0].count, 2);
        assert_eq!(newest.banned_against[0].highlight, "yellow");
        assert_eq!(newest.match_url, "http://www.dotabuff.com/matches/3");
        assert_eq!(team.parsed_matches[1].pick_order, "SP");
        assert_eq!(team.unparsed_matches[0].picks[0].label, "Hero A M (R)");

        assert_eq!(
            team.picks[0],
            PickSummaryRow {
                hero: "Hero A".to_string(),
                count: 3,
                wins: 2,
                win_rate: "66.7%".to_string(),
                highlight: None,
            }
        );
        assert_eq!(team.picks[1].highlight, Some("yellow".to_string()));
        assert_eq!(
            team.banned_against,
            vec![CountSummaryRow {
                hero: "Hero C".to_string(),
                count: 2
            }]
        );
        assert!(team.bans.is_empty());

        let legend: Vec<u32> = report.legend.iter().map(|entry| entry.count).collect();
        assert_eq!(legend, vec![1, 2, 3]);
    }

    #[test]
    fn roster_players_are_profiled() {
        let heroes = heroes();
        let mut names: HashMap<AccountId, PlayerName> = HashMap::new();
        names.insert(111, "zeta".to_string());
        names.insert(222, "Alpha".to_string());
        let config = config();
        let input = input(
            r#"{
            "teams": {"2586976": {"info": {"teams": [{"team_id": 2586976, "name": "OG",
                "player_0_account_id": 111, "player_1_account_id": 333}]}, "matches": []}},
            "players": {
                "111": {"heroes": [{"hero_id": "1", "games": 10, "win": 7}],
                        "recent_matches": [{"hero_id": 2, "player_slot": 0, "radiant_win": true},
                                           {"hero_id": 1, "player_slot": 0, "radiant_win": false},
                                           {"hero_id": 1, "player_slot": 128, "radiant_win": false}]},
                "222": {"heroes": [], "recent_matches": []},
                "444": {"heroes": [{"hero_id": 99, "games": 1, "win": 1}], "recent_matches": []}
            }}"#,
        );
        let report = ReportBuilder::new(&config, &heroes, &names)
            .unwrap()
            .build(&input, &[2586976], &[222, 444])
            .unwrap();
        let order: Vec<&str> = report.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(order, vec!["Alpha", "zeta"]);
        let zeta = &report.players[1];
        assert_eq!(zeta.top_heroes[0].win_rate, "70.0%");
        assert_eq!(
            zeta.recent_heroes[0],
            RecentHeroRow {
                hero: "Hero A".to_string(),
                count: 2,
                win_rate: "50.0%".to_string()
            }
        );
        assert_eq!(report.failed_players.len(), 1);
        assert_eq!(report.failed_players[0].id, 444);
    }
}
