use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserNick = String;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub admin: UserNick,
    pub members: Vec<UserNick>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    pub payer: UserNick,
    pub items: Vec<ExpenseItem>,
    pub total_cost: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub name: String,
    pub cost: f64,
    pub shared_by: Vec<UserNick>,
}

impl Expense {
    /// Sum of the item costs, ignoring the declared `total_cost`.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.cost).sum()
    }
}
