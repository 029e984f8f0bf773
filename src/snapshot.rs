//! Incoming group snapshots as the API layer hands them over.
//!
//! Member references arrive either as plain usernames or as populated user
//! records. Everything is reduced to a [`UserNick`] here so the balance code
//! only ever sees plain identifiers.
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::schemas::{Expense, ExpenseItem, Group, UserNick};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MemberRef {
    Nick(UserNick),
    Record {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        username: String,
    },
    Unknown(serde_json::Value),
}

impl MemberRef {
    /// The canonical identifier, empty when the reference carries none.
    pub fn into_nick(self) -> UserNick {
        match self {
            MemberRef::Nick(nick) => nick,
            MemberRef::Record { username, .. } => username,
            MemberRef::Unknown(_) => UserNick::new(),
        }
    }
}

/// Expense dates come as full timestamps, as bare calendar days from older
/// clients, or as whatever else a form happened to store.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExpenseDate {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
    Unknown(serde_json::Value),
}

impl ExpenseDate {
    /// Bare days are read as midnight UTC. Anything unparseable is dropped.
    pub fn into_instant(self) -> Option<DateTime<Utc>> {
        match self {
            ExpenseDate::Instant(at) => Some(at),
            ExpenseDate::Day(day) => day.and_hms_opt(0, 0, 0).map(|at| at.and_utc()),
            ExpenseDate::Unknown(_) => None,
        }
    }
}

fn into_nicks(refs: Vec<MemberRef>) -> Vec<UserNick> {
    refs.into_iter()
        .map(MemberRef::into_nick)
        .filter(|nick| !nick.is_empty())
        .collect()
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub admin: MemberRef,
    #[serde(default)]
    pub members: Vec<MemberRef>,
    #[serde(default)]
    pub expenses: Vec<ExpenseSnapshot>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSnapshot {
    #[serde(default)]
    pub date: Option<ExpenseDate>,
    #[serde(default)]
    pub restaurant: Option<String>,
    pub payer: MemberRef,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
    #[serde(default)]
    pub total_cost: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub shared_by: Vec<MemberRef>,
}

impl From<ItemSnapshot> for ExpenseItem {
    fn from(item: ItemSnapshot) -> Self {
        ExpenseItem {
            name: item.name,
            cost: item.cost.unwrap_or(0.0),
            shared_by: into_nicks(item.shared_by),
        }
    }
}

impl From<ExpenseSnapshot> for Expense {
    fn from(expense: ExpenseSnapshot) -> Self {
        Expense {
            date: expense.date.and_then(ExpenseDate::into_instant),
            restaurant: expense.restaurant.filter(|name| !name.is_empty()),
            payer: expense.payer.into_nick(),
            items: expense.items.into_iter().map(ExpenseItem::from).collect(),
            total_cost: expense.total_cost.unwrap_or(0.0),
        }
    }
}

impl From<GroupSnapshot> for Group {
    fn from(group: GroupSnapshot) -> Self {
        Group {
            id: group.id,
            name: group.name,
            admin: group.admin.into_nick(),
            members: into_nicks(group.members),
            expenses: group.expenses.into_iter().map(Expense::from).collect(),
        }
    }
}
