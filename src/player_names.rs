use crate::types::{AccountId, PlayerName};
use std::collections::HashMap;

/// Account id -> display name lookup, filled by the fetch layer.
pub trait PlayerNames {
    fn player_name(&self, account_id: AccountId) -> Option<&str>;
}

impl PlayerNames for HashMap<AccountId, PlayerName> {
    fn player_name(&self, account_id: AccountId) -> Option<&str> {
        self.get(&account_id).map(|name| name.as_str())
    }
}

/// Falls back to the account id when the name was never fetched.
pub fn display_name(names: &dyn PlayerNames, account_id: AccountId) -> PlayerName {
    match names.player_name(account_id) {
        Some(name) => name.to_string(),
        None => {
            warn!("No name known for account {}, using the id.", account_id);
            account_id.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_account_id() {
        let mut names: HashMap<AccountId, PlayerName> = HashMap::new();
        names.insert(111, "muhah".to_string());
        assert_eq!(display_name(&names, 111), "muhah");
        assert_eq!(display_name(&names, 222), "222");
    }
}
