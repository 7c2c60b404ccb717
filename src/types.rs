pub type HeroId = u64;
pub type HeroName = String;
pub type MatchId = u64;
pub type TeamId = u64;
pub type LeagueId = u64;
pub type AccountId = u64;
pub type PlayerName = String;
