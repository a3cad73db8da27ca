//! Money and per-click reward

use crate::tuning::WalletTuning;

/// The three upgrade buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeTier {
    Small,
    Medium,
    Large,
}

impl UpgradeTier {
    pub const ALL: [UpgradeTier; 3] = [UpgradeTier::Small, UpgradeTier::Medium, UpgradeTier::Large];

    /// Amount added to the per-click reward
    pub fn amount(self) -> u64 {
        match self {
            UpgradeTier::Small => 10,
            UpgradeTier::Medium => 20,
            UpgradeTier::Large => 30,
        }
    }

    /// DOM id of the button wired to this tier
    pub fn button_id(self) -> &'static str {
        match self {
            UpgradeTier::Small => "upgrade1",
            UpgradeTier::Medium => "upgrade2",
            UpgradeTier::Large => "upgrade3",
        }
    }
}

/// Score state. Money never decreases; upgrades are free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub money: u64,
    pub money_per_click: u64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(&WalletTuning::default())
    }
}

impl Wallet {
    pub fn new(tuning: &WalletTuning) -> Self {
        Self {
            money: tuning.starting_money,
            money_per_click: tuning.starting_money_per_click,
        }
    }

    /// Credit a balloon pop; returns the amount awarded
    pub fn award_click(&mut self) -> u64 {
        let reward = self.money_per_click;
        self.money = self.money.saturating_add(reward);
        reward
    }

    /// Credit a flat amount
    pub fn award(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Apply an upgrade; returns the new per-click reward
    pub fn upgrade(&mut self, tier: UpgradeTier) -> u64 {
        self.money_per_click = self.money_per_click.saturating_add(tier.amount());
        self.money_per_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_values() {
        let w = Wallet::default();
        assert_eq!(w.money, 0);
        assert_eq!(w.money_per_click, 10);
    }

    #[test]
    fn test_upgrade_amounts() {
        let mut w = Wallet::default();
        assert_eq!(w.upgrade(UpgradeTier::Small), 20);
        assert_eq!(w.upgrade(UpgradeTier::Medium), 40);
        assert_eq!(w.upgrade(UpgradeTier::Large), 70);
        // Upgrades never cost money
        assert_eq!(w.money, 0);
    }

    #[test]
    fn test_click_uses_current_reward() {
        let mut w = Wallet::default();
        for _ in 0..3 {
            w.award_click();
        }
        assert_eq!(w.money, 30);
        w.upgrade(UpgradeTier::Medium);
        assert_eq!(w.money_per_click, 30);
        assert_eq!(w.award_click(), 30);
        assert_eq!(w.money, 60);
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let mut w = Wallet {
            money: u64::MAX - 5,
            money_per_click: u64::MAX - 5,
        };
        w.award_click();
        w.upgrade(UpgradeTier::Large);
        assert_eq!(w.money, u64::MAX);
        assert_eq!(w.money_per_click, u64::MAX);
    }

    #[test]
    fn test_button_ids() {
        let ids: Vec<_> = UpgradeTier::ALL.iter().map(|t| t.button_id()).collect();
        assert_eq!(ids, vec!["upgrade1", "upgrade2", "upgrade3"]);
    }
}
