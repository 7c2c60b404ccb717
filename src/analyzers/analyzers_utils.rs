use crate::error::{ScoutError, ScoutResult};

/// Skips the current match when its record is malformed, counting it in `$skipped`.
/// Any other error aborts the whole fold.
macro_rules! skip_malformed {
    ($res:expr, $skipped:ident) => {
        match $res {
            Ok(val) => val,
            Err($crate::error::ScoutError::MalformedMatch(reason)) => {
                warn!("Omitting match: {}", reason);
                $skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        }
    };
}

/// `wins * 100 / games` with one decimal, e.g. "70.0%".
pub fn format_win_rate(wins: u32, games: u32) -> ScoutResult<String> {
    if games == 0 {
        return Err(ScoutError::DataIntegrity(
            "win rate of a hero with zero games".to_string(),
        ));
    }
    if wins > games {
        return Err(ScoutError::DataIntegrity(format!(
            "{} wins out of {} games",
            wins, games
        )));
    }
    Ok(format!("{:.1}%", wins as f64 * 100.0 / games as f64))
}
