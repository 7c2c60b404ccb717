//! Scouting core: classifies a team's matches, folds them into pick and ban counts and
//! hands a render-ready report to whichever writer draws it.
#[macro_use]
extern crate log;

#[macro_use]
pub mod analyzers;
pub mod color_map;
pub mod error;
pub mod heroes_info;
pub mod match_record;
pub mod player_names;
pub mod raw_data;
pub mod report;
pub mod settings;
pub mod types;
pub mod utils;

pub type BoxError = Box<dyn std::error::Error>;

pub use analyzers::players::PlayerProfile;
pub use analyzers::team::{TeamAggregator, TeamProfile};
pub use analyzers::HeroTally;
pub use color_map::FrequencyColorMap;
pub use error::{ScoutError, ScoutResult};
pub use heroes_info::HeroCatalog;
pub use match_record::{MatchRecord, ParsedMatchRecord, UnparsedMatchRecord};
pub use report::{ReportBuilder, ScoutReport};
pub use settings::ScoutConfig;
