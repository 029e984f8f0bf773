use std::collections::BTreeMap;
use std::mem::swap;

use serde::Serialize;

use crate::balance::{compute_balance_from_group, BalanceOptions};
use crate::schemas::{Group, UserNick};
use crate::split::item_sharers;

#[derive(Clone, Debug)]
struct PersonalBalance {
    id: UserNick,
    balance: f64,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
struct UserPair {
    user1: UserNick,
    user2: UserNick,
}

/// One transfer of a settlement plan: `payer` hands `amount` to `receiver`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Exchange {
    pub payer: UserNick,
    pub receiver: UserNick,
    pub amount: f64,
}

// The exchanges that will be made if no simplification happens
fn get_naive_exchanges(group: &Group, options: &BalanceOptions) -> Vec<Exchange> {
    let mut balances_between_people: BTreeMap<UserPair, f64> = BTreeMap::new();

    for expense in &group.expenses {
        for item in &expense.items {
            let Some(sharers) = item_sharers(item, &expense.payer, options) else {
                continue;
            };
            let share = item.cost / sharers.len() as f64;

            for sharer in sharers {
                if sharer == expense.payer {
                    continue;
                }
                let mut pair = UserPair {
                    user1: expense.payer.clone(),
                    user2: sharer.to_string(),
                };
                let mut amount = share;

                // Alphabetical order keeps every debt between the same two
                // people stored in the same direction
                if pair.user1 > pair.user2 {
                    swap(&mut pair.user1, &mut pair.user2);
                    amount = -amount;
                }

                *balances_between_people.entry(pair).or_insert(0.0) += amount;
            }
        }
    }

    // Positive means user2 owes user1
    let mut exchanges = Vec::new();
    for (people_pair, balance) in balances_between_people {
        if options.is_zero(balance) {
            continue;
        }
        let mut payer = people_pair.user2;
        let mut receiver = people_pair.user1;
        if balance < 0.0 {
            swap(&mut payer, &mut receiver);
        }

        exchanges.push(Exchange {
            payer,
            receiver,
            amount: balance.abs(),
        });
    }

    exchanges
}

// Greedily matches the largest debtor with the largest creditor
fn get_simplified_exchanges(
    mut payers: Vec<PersonalBalance>,
    mut receivers: Vec<PersonalBalance>,
    options: &BalanceOptions,
) -> Vec<Exchange> {
    let mut exchanges: Vec<Exchange> = Vec::new();

    loop {
        payers.sort_by(|a, b| a.balance.total_cmp(&b.balance));
        receivers.sort_by(|a, b| a.balance.total_cmp(&b.balance));

        let (Some(payer), Some(receiver)) = (payers.last_mut(), receivers.last_mut()) else {
            break;
        };

        let amount = payer.balance.min(receiver.balance);
        exchanges.push(Exchange {
            payer: payer.id.clone(),
            receiver: receiver.id.clone(),
            amount,
        });
        payer.balance -= amount;
        receiver.balance -= amount;

        let payer_done = !options.is_positive(payer.balance);
        let receiver_done = !options.is_positive(receiver.balance);
        if payer_done {
            payers.pop();
        }
        if receiver_done {
            receivers.pop();
        }
    }
    exchanges
}

/// Builds the transfers that bring every member of `group` back to zero.
///
/// Both the pairwise debts and a greedy simplification are computed, and the
/// shorter plan is returned.
pub fn settle_group(group: &Group, options: &BalanceOptions) -> Vec<Exchange> {
    let people_balances = compute_balance_from_group(group, options);

    // Divide people into payers and receivers
    let mut payers = Vec::new();
    let mut receivers = Vec::new();

    for (id, balance) in people_balances.iter() {
        let person = PersonalBalance {
            id: id.to_string(),
            balance: balance.abs(),
        };
        if options.is_negative(balance) {
            payers.push(person);
        } else if options.is_positive(balance) {
            receivers.push(person);
        }
    }

    let naive_exchanges = get_naive_exchanges(group, options);
    let simplified_exchanges = get_simplified_exchanges(payers, receivers, options);

    tracing::debug!(
        group = %group.id,
        naive = naive_exchanges.len(),
        simplified = simplified_exchanges.len(),
        "computed settlement plans"
    );

    // We ensure the simplification didn't accidentally end up being
    // more complicated than the naive exchanges
    if simplified_exchanges.len() < naive_exchanges.len() {
        simplified_exchanges
    } else {
        naive_exchanges
    }
}
