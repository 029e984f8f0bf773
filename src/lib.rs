//! Balance settlement for shared-expense groups.
//!
//! Expenses are split item by item among their sharers ([`split`]), summed
//! into a signed balance per member ([`balance`]) and read back from one
//! viewer's side as a summary plus receivables and payables ([`summary`]).
//! [`exchange`] turns the same balances into a group-wide settlement plan.
pub mod auth;
pub mod balance;
pub mod error;
pub mod exchange;
pub mod routes;
pub mod schemas;
pub mod settings;
pub mod snapshot;
pub mod split;
pub mod summary;

pub use balance::{compute_balance_from_group, BalanceOptions, Balances, SharerPolicy};
pub use error::{ResultSplit, SplitError};
pub use exchange::{settle_group, Exchange};
pub use schemas::{Expense, ExpenseItem, Group, UserNick};
pub use split::split_item;
pub use summary::{
    calculate_all_balances, calculate_all_balances_with, compute_group_balances,
    compute_group_balances_with, BalanceStatus, CalculatedBalances, GroupBalances, GroupSummary,
    OverallSummary, PersonListItem, PersonListKind,
};
