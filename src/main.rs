#[macro_use]
extern crate log;

use chrono::Utc;
use clap::Parser;
use dotascout::raw_data::ScoutInput;
use dotascout::types::{AccountId, LeagueId, TeamId};
use dotascout::{utils, BoxError, HeroCatalog, ReportBuilder, ScoutConfig};

/// Builds a scouting report from already fetched match and player data.
#[derive(Parser)]
#[clap(name = "dotascout")]
struct Opts {
    /// settings file (toml, json, yaml)
    #[clap(short, long)]
    config: Option<String>,
    /// hero constants, dotaconstants heroes.json or a GetHeroes response
    #[clap(long, default_value = "heroes.json")]
    heroes: String,
    /// pre-fetched teams, matches and player feeds
    #[clap(short, long)]
    input: String,
    /// (required for team scouting only) the league the team matches come from
    #[clap(short, long)]
    league_id: Option<LeagueId>,
    /// teams to scout, supports multiples
    #[clap(short, long)]
    team_id: Vec<TeamId>,
    /// players to scout, supports multiples
    #[clap(short, long)]
    player: Vec<AccountId>,
    /// the file to save results to
    #[clap(short, long)]
    output: Option<String>,
}

fn main() -> Result<(), BoxError> {
    let opts = Opts::parse();
    let mut config = ScoutConfig::load(opts.config.as_deref())?;
    if opts.league_id.is_some() {
        config.league_id = opts.league_id;
    }
    utils::init_logging(&config)?;

    let heroes = HeroCatalog::init(&opts.heroes)?;
    let input: ScoutInput = utils::read_json(&opts.input)?;
    let report = ReportBuilder::new(&config, &heroes, &input.player_names)?.build(
        &input,
        &opts.team_id,
        &opts.player,
    )?;

    let output = opts
        .output
        .unwrap_or_else(|| format!("{}.json", Utc::now().format("%Y%m%d%H%M%S")));
    utils::write_json(&output, &report)?;
    info!(
        "Report with {} teams and {} players written to {}",
        report.teams.len(),
        report.players.len(),
        output
    );
    Ok(())
}
