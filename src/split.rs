use std::collections::HashSet;

use crate::balance::{BalanceOptions, Balances, SharerPolicy};
use crate::schemas::ExpenseItem;

/// Sharers taking part in `item`, or `None` when the item must be skipped
/// because its cost is not positive, nobody shares it or nobody paid for it.
pub(crate) fn item_sharers<'a>(
    item: &'a ExpenseItem,
    payer: &str,
    options: &BalanceOptions,
) -> Option<Vec<&'a str>> {
    if item.cost.is_nan() || item.cost <= 0.0 || item.shared_by.is_empty() {
        return None;
    }
    if payer.is_empty() {
        return None;
    }
    let sharers = match options.sharers {
        SharerPolicy::PerEntry => item.shared_by.iter().map(String::as_str).collect(),
        SharerPolicy::Distinct => {
            let mut seen = HashSet::new();
            item.shared_by
                .iter()
                .map(String::as_str)
                .filter(|sharer| seen.insert(*sharer))
                .collect()
        }
    };
    Some(sharers)
}

/// Splits `item` evenly among its sharers and charges each share to the
/// payer's credit. Items with a non-positive cost, no sharers or an unresolved
/// payer are skipped.
pub fn split_item(item: &ExpenseItem, payer: &str, balances: &mut Balances, options: &BalanceOptions) {
    let Some(sharers) = item_sharers(item, payer, options) else {
        tracing::trace!(item = %item.name, cost = item.cost, "skipping item");
        return;
    };

    let share = item.cost / sharers.len() as f64;
    for sharer in sharers {
        // The payer's own share is already covered
        if sharer != payer {
            balances.debit(sharer, share);
            balances.credit(payer, share);
        }
    }
}
