//! Per-viewer view of group balances.
//!
//! The aggregation replays every expense of a group through the splitter and
//! then reads the resulting balances from the viewer's side:
//!
//! - [`GroupSummary`] holds the total spent and the viewer's own position.
//! - receivables list the members owing the viewer, payables the members the
//!   viewer owes. Each amount is capped by the smaller of the two positions.
//!
//! Only members whose sign is opposite to the viewer's are listed, so this is
//! not a group-wide settlement. See [`settle_group`] for that.
//!
//!  [`settle_group`]: crate::exchange::settle_group
use serde::Serialize;

use crate::balance::{compute_balance_from_group, BalanceOptions};
use crate::schemas::{Group, UserNick};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Ahead,
    Owes,
    Settled,
}

impl BalanceStatus {
    fn from_position(receivable: f64, payable: f64) -> Self {
        if receivable > payable {
            BalanceStatus::Ahead
        } else if payable > receivable {
            BalanceStatus::Owes
        } else {
            BalanceStatus::Settled
        }
    }

    /// Headline the UI shows next to the viewer's position.
    pub fn label(&self) -> &'static str {
        match self {
            BalanceStatus::Ahead => "You're ahead",
            BalanceStatus::Owes => "You owe",
            BalanceStatus::Settled => "All settled",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub total_cost: f64,
    pub receivable: f64,
    pub payable: f64,
    pub status: BalanceStatus,
    pub status_label: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonListKind {
    Receivable,
    Payable,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PersonListItem {
    pub id: UserNick,
    pub name: UserNick,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: PersonListKind,
}

impl PersonListItem {
    fn new(member: &str, amount: f64, kind: PersonListKind) -> Self {
        Self {
            id: member.to_string(),
            name: member.to_string(),
            amount,
            kind,
        }
    }
}

/// A group snapshot with the viewer's balances attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupBalances {
    #[serde(flatten)]
    pub group: Group,
    pub summary: GroupSummary,
    #[serde(rename = "groupReceivables")]
    pub receivables: Vec<PersonListItem>,
    #[serde(rename = "groupPayables")]
    pub payables: Vec<PersonListItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub total_groups: usize,
    pub total_spent: f64,
    pub total_receivable: f64,
    pub total_payable: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedBalances {
    pub groups: Vec<GroupBalances>,
    pub overall_summary: OverallSummary,
}

pub fn compute_group_balances(group: &Group, viewer: &str) -> GroupBalances {
    compute_group_balances_with(group, viewer, &BalanceOptions::default())
}

pub fn compute_group_balances_with(
    group: &Group,
    viewer: &str,
    options: &BalanceOptions,
) -> GroupBalances {
    let balances = compute_balance_from_group(group, options);

    let mut total_cost = 0.0;
    for expense in &group.expenses {
        let items_total = expense.items_total();
        if (items_total - expense.total_cost).abs() > options.tolerance {
            tracing::debug!(
                group = %group.id,
                declared = expense.total_cost,
                items = items_total,
                "expense total differs from its items"
            );
        }
        total_cost += expense.total_cost;
    }

    let viewer_balance = balances.of(viewer);
    let (receivable, payable) = if options.is_positive(viewer_balance) {
        (viewer_balance, 0.0)
    } else if options.is_negative(viewer_balance) {
        (0.0, -viewer_balance)
    } else {
        (0.0, 0.0)
    };

    let status = BalanceStatus::from_position(receivable, payable);

    let mut receivables = Vec::new();
    let mut payables = Vec::new();
    for (person, balance) in balances.iter() {
        if person == viewer {
            continue;
        }
        if receivable > 0.0 && options.is_negative(balance) {
            receivables.push(PersonListItem::new(
                person,
                receivable.min(-balance),
                PersonListKind::Receivable,
            ));
        } else if payable > 0.0 && options.is_positive(balance) {
            payables.push(PersonListItem::new(
                person,
                payable.min(balance),
                PersonListKind::Payable,
            ));
        }
    }

    tracing::debug!(
        group = %group.id,
        viewer,
        receivable,
        payable,
        receivables = receivables.len(),
        payables = payables.len(),
        "computed group balances"
    );

    GroupBalances {
        group: group.clone(),
        summary: GroupSummary {
            total_cost,
            receivable,
            payable,
            status,
            status_label: status.label(),
        },
        receivables,
        payables,
    }
}

pub fn calculate_all_balances(groups: &[Group], viewer: &str) -> CalculatedBalances {
    calculate_all_balances_with(groups, viewer, &BalanceOptions::default())
}

pub fn calculate_all_balances_with(
    groups: &[Group],
    viewer: &str,
    options: &BalanceOptions,
) -> CalculatedBalances {
    let processed: Vec<GroupBalances> = groups
        .iter()
        .map(|group| compute_group_balances_with(group, viewer, options))
        .collect();

    let overall_summary = processed.iter().fold(
        OverallSummary {
            total_groups: groups.len(),
            ..OverallSummary::default()
        },
        |mut acc, group| {
            acc.total_spent += group.summary.total_cost;
            acc.total_receivable += group.summary.receivable;
            acc.total_payable += group.summary.payable;
            acc
        },
    );

    CalculatedBalances {
        groups: processed,
        overall_summary,
    }
}
