use super::analyzers_utils::format_win_rate;
use crate::error::ScoutResult;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Appearances of a hero and how many of them were won.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroTally {
    pub count: u32,
    pub wins: u32,
}

impl Add for HeroTally {
    type Output = HeroTally;
    fn add(self, other: HeroTally) -> <Self as std::ops::Add<HeroTally>>::Output {
        HeroTally {
            count: self.count + other.count,
            wins: self.wins + other.wins,
        }
    }
}

impl HeroTally {
    pub fn add_score(&mut self, win: bool) {
        self.count += 1;
        if win {
            self.wins += 1;
        }
    }

    pub fn losses(&self) -> u32 {
        self.count - self.wins
    }

    /// Never lost with this hero.
    pub fn is_perfect(&self) -> bool {
        self.count > 0 && self.wins == self.count
    }

    pub fn win_rate(&self) -> ScoutResult<String> {
        format_win_rate(self.wins, self.count)
    }
}
