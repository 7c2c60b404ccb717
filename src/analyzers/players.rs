use super::analyzers_utils::format_win_rate;
use super::HeroTally;
use crate::error::ScoutResult;
use crate::heroes_info::HeroCatalog;
use crate::match_record::Side;
use crate::player_names::{display_name, PlayerNames};
use crate::raw_data::{PlayerHeroStats, RecentMatch};
use crate::types::{AccountId, HeroName, PlayerName};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TopHero {
    pub hero: HeroName,
    pub games: u32,
    pub win_rate: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct PlayerProfile {
    pub account_id: AccountId,
    pub name: PlayerName,
    pub top_heroes: Vec<TopHero>,
    pub recent_heroes: BTreeMap<HeroName, HeroTally>,
}

impl PlayerProfile {
    pub fn build(
        account_id: AccountId,
        heroes: &HeroCatalog,
        names: &dyn PlayerNames,
        hero_stats: &[PlayerHeroStats],
        recent_matches: &[RecentMatch],
        top_limit: usize,
    ) -> ScoutResult<PlayerProfile> {
        Ok(PlayerProfile {
            account_id,
            name: display_name(names, account_id),
            top_heroes: top_heroes(account_id, heroes, hero_stats, top_limit)?,
            recent_heroes: recent_heroes(account_id, heroes, recent_matches)?,
        })
    }
}

/// Most played heroes. Equal game counts keep the feed order.
fn top_heroes(
    account_id: AccountId,
    heroes: &HeroCatalog,
    hero_stats: &[PlayerHeroStats],
    top_limit: usize,
) -> ScoutResult<Vec<TopHero>> {
    let context = format!("heroes of player {}", account_id);
    hero_stats
        .iter()
        .sorted_by(|a, b| b.games.cmp(&a.games))
        .take(top_limit)
        .map(|stats| -> ScoutResult<TopHero> {
            Ok(TopHero {
                hero: heroes.get_hero(stats.hero_id, &context)?.to_string(),
                games: stats.games,
                win_rate: format_win_rate(stats.win, stats.games)?,
            })
        })
        .collect()
}

fn recent_heroes(
    account_id: AccountId,
    heroes: &HeroCatalog,
    recent_matches: &[RecentMatch],
) -> ScoutResult<BTreeMap<HeroName, HeroTally>> {
    let context = format!("recent matches of player {}", account_id);
    let mut recent: BTreeMap<HeroName, HeroTally> = BTreeMap::new();
    for recent_match in recent_matches {
        let name = heroes.get_hero(recent_match.hero_id, &context)?;
        let won = Side::from_player_slot(recent_match.player_slot).won(recent_match.radiant_win);
        recent.entry(name.to_string()).or_default().add_score(won);
    }
    Ok(recent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use std::collections::HashMap;

    fn heroes() -> HeroCatalog {
        let mut heroes = HashMap::new();
        for (id, name) in vec![(1, "A"), (2, "B"), (3, "C"), (4, "D"), (5, "E"), (6, "F"), (7, "G")] {
            heroes.insert(id, name.to_string());
        }
        HeroCatalog::new(heroes)
    }

    fn build(hero_stats: &str, recent_matches: &str) -> ScoutResult<PlayerProfile> {
        let mut names: HashMap<AccountId, PlayerName> = HashMap::new();
        names.insert(111, "muhah".to_string());
        let hero_stats: Vec<PlayerHeroStats> = serde_json::from_str(hero_stats).unwrap();
        let recent_matches: Vec<RecentMatch> = serde_json::from_str(recent_matches).unwrap();
        PlayerProfile::build(111, &heroes(), &names, &hero_stats, &recent_matches, 5)
    }

    #[test]
    fn win_rate_of_top_hero() {
        let profile = build(r#"[{"hero_id": "1", "games": 10, "win": 7}]"#, "[]").unwrap();
        assert_eq!(profile.name, "muhah");
        assert_eq!(
            profile.top_heroes,
            vec![TopHero {
                hero: "A".to_string(),
                games: 10,
                win_rate: "70.0%".to_string()
            }]
        );
    }

    #[test]
    fn top_five_by_games_ties_in_feed_order() {
        let profile = build(
            r#"[{"hero_id": 1, "games": 2, "win": 1}, {"hero_id": 2, "games": 9, "win": 1},
                {"hero_id": 3, "games": 4, "win": 1}, {"hero_id": 4, "games": 4, "win": 2},
                {"hero_id": 5, "games": 1, "win": 1}, {"hero_id": 6, "games": 4, "win": 3},
                {"hero_id": 7, "games": 3, "win": 0}]"#,
            "[]",
        )
        .unwrap();
        let order: Vec<&str> = profile.top_heroes.iter().map(|h| h.hero.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "D", "F", "G"]);
    }

    #[test]
    fn zero_games_in_top_heroes_is_integrity_error() {
        let result = build(r#"[{"hero_id": 1, "games": 0, "win": 0}]"#, "[]");
        assert!(matches!(result, Err(ScoutError::DataIntegrity(_))));
    }

    #[test]
    fn recent_wins_follow_player_slot() {
        let profile = build(
            "[]",
            r#"[{"match_id": 1, "hero_id": 1, "player_slot": 0, "radiant_win": true},
                {"match_id": 2, "hero_id": 1, "player_slot": 130, "radiant_win": true},
                {"match_id": 3, "hero_id": 2, "player_slot": 128, "radiant_win": false},
                {"match_id": 4, "hero_id": 1, "player_slot": 4, "radiant_win": false}]"#,
        )
        .unwrap();
        assert_eq!(profile.recent_heroes["A"], HeroTally { count: 3, wins: 1 });
        assert_eq!(profile.recent_heroes["B"], HeroTally { count: 1, wins: 1 });
    }
}
