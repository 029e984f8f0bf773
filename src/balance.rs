use indexmap::IndexMap;
use serde::Deserialize;

use crate::schemas::{Group, UserNick};
use crate::split::split_item;

/// Default slack used when comparing a balance against zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// How an item's sharer list is read when it names the same member twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharerPolicy {
    /// Every entry counts, duplicates included.
    #[default]
    PerEntry,
    /// The list is treated as a set.
    Distinct,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BalanceOptions {
    pub sharers: SharerPolicy,
    pub tolerance: f64,
}

impl Default for BalanceOptions {
    fn default() -> Self {
        Self {
            sharers: SharerPolicy::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl BalanceOptions {
    pub fn is_positive(&self, amount: f64) -> bool {
        amount > self.tolerance
    }

    pub fn is_negative(&self, amount: f64) -> bool {
        amount < -self.tolerance
    }

    pub fn is_zero(&self, amount: f64) -> bool {
        !self.is_positive(amount) && !self.is_negative(amount)
    }
}

/// Signed running totals per member for one group snapshot.
///
/// Positive means the group owes the member, negative means the member owes
/// the group. Iteration follows the order members were first tracked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Balances {
    values: IndexMap<UserNick, f64>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `member` at zero. Already tracked members are untouched.
    pub fn track(&mut self, member: &str) {
        if !self.values.contains_key(member) {
            self.values.insert(member.to_string(), 0.0);
        }
    }

    pub fn credit(&mut self, member: &str, amount: f64) {
        match self.values.get_mut(member) {
            Some(balance) => *balance += amount,
            None => {
                self.values.insert(member.to_string(), amount);
            }
        }
    }

    pub fn debit(&mut self, member: &str, amount: f64) {
        self.credit(member, -amount);
    }

    pub fn get(&self, member: &str) -> Option<f64> {
        self.values.get(member).copied()
    }

    /// Balance of `member`, or zero when the member never showed up.
    pub fn of(&self, member: &str) -> f64 {
        self.get(member).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values
            .iter()
            .map(|(member, balance)| (member.as_str(), *balance))
    }

    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn compute_balance_from_group(group: &Group, options: &BalanceOptions) -> Balances {
    let mut balance = Balances::new();
    for member in &group.members {
        balance.track(member);
    }
    for expense in &group.expenses {
        for item in &expense.items {
            split_item(item, &expense.payer, &mut balance, options);
        }
    }
    balance
}
