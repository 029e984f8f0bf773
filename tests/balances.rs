use chrono::{TimeZone, Utc};
use groupsplit::{
    calculate_all_balances, compute_balance_from_group, compute_group_balances, settle_group,
    BalanceOptions, BalanceStatus, Expense, ExpenseItem, Group, PersonListItem, PersonListKind,
};
use proptest::prelude::*;

fn item(cost: f64, shared_by: &[&str]) -> ExpenseItem {
    ExpenseItem {
        name: "dish".to_string(),
        cost,
        shared_by: shared_by.iter().map(|s| s.to_string()).collect(),
    }
}

fn expense(payer: &str, items: Vec<ExpenseItem>) -> Expense {
    let total_cost = items.iter().map(|item| item.cost).sum();
    Expense {
        date: Some(Utc.with_ymd_and_hms(2024, 6, 14, 13, 0, 0).unwrap()),
        restaurant: None,
        payer: payer.to_string(),
        items,
        total_cost,
    }
}

fn group(members: &[&str], expenses: Vec<Expense>) -> Group {
    Group {
        id: "lunch-club".to_string(),
        name: "Lunch club".to_string(),
        admin: members[0].to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
        expenses,
    }
}

fn person(name: &str, amount: f64, kind: PersonListKind) -> PersonListItem {
    PersonListItem {
        id: name.to_string(),
        name: name.to_string(),
        amount,
        kind,
    }
}

fn pair_group() -> Group {
    group(&["A", "B"], vec![expense("A", vec![item(100.0, &["A", "B"])])])
}

#[test]
fn scenario_a_payer_sees_receivable() {
    let balances = compute_balance_from_group(&pair_group(), &BalanceOptions::default());
    assert_eq!(balances.of("A"), 50.0);
    assert_eq!(balances.of("B"), -50.0);

    let result = compute_group_balances(&pair_group(), "A");
    assert_eq!(result.summary.total_cost, 100.0);
    assert_eq!(result.summary.receivable, 50.0);
    assert_eq!(result.summary.payable, 0.0);
    assert_eq!(result.summary.status, BalanceStatus::Ahead);
    assert!(result.payables.is_empty());
    assert_eq!(
        result.receivables,
        vec![person("B", 50.0, PersonListKind::Receivable)]
    );
}

#[test]
fn scenario_b_sharer_sees_payable() {
    let result = compute_group_balances(&pair_group(), "B");
    assert_eq!(result.summary.receivable, 0.0);
    assert_eq!(result.summary.payable, 50.0);
    assert_eq!(result.summary.status, BalanceStatus::Owes);
    assert!(result.receivables.is_empty());
    assert_eq!(
        result.payables,
        vec![person("A", 50.0, PersonListKind::Payable)]
    );
}

#[test]
fn scenario_c_three_way_split() {
    let group = group(
        &["A", "B", "C"],
        vec![expense("A", vec![item(90.0, &["A", "B", "C"])])],
    );
    let balances = compute_balance_from_group(&group, &BalanceOptions::default());
    assert_eq!(balances.of("A"), 60.0);
    assert_eq!(balances.of("B"), -30.0);
    assert_eq!(balances.of("C"), -30.0);

    let result = compute_group_balances(&group, "A");
    assert_eq!(
        result.receivables,
        vec![
            person("B", 30.0, PersonListKind::Receivable),
            person("C", 30.0, PersonListKind::Receivable),
        ]
    );
}

#[test]
fn scenario_d_malformed_items_change_nothing() {
    let baseline = compute_balance_from_group(&pair_group(), &BalanceOptions::default());

    let mut with_noise = pair_group();
    with_noise.expenses.push(expense(
        "B",
        vec![item(0.0, &["A", "B"]), item(25.0, &[]), item(-3.0, &["A"])],
    ));
    let balances = compute_balance_from_group(&with_noise, &BalanceOptions::default());

    assert_eq!(balances, baseline);
}

#[test]
fn scenario_e_balances_accumulate_across_expenses() {
    let group = group(
        &["A", "B"],
        vec![
            expense("A", vec![item(60.0, &["A", "B"])]),
            expense("B", vec![item(60.0, &["A", "B"])]),
            expense("A", vec![item(20.0, &["A", "B"])]),
        ],
    );
    let balances = compute_balance_from_group(&group, &BalanceOptions::default());
    assert_eq!(balances.of("A"), 10.0);
    assert_eq!(balances.of("B"), -10.0);

    let result = compute_group_balances(&group, "B");
    assert_eq!(result.summary.total_cost, 140.0);
    assert_eq!(result.summary.payable, 10.0);
}

#[test]
fn payer_never_owes_themselves() {
    let group = group(
        &["A", "B", "C"],
        vec![
            expense("A", vec![item(30.0, &["A"]), item(30.0, &["A", "B", "C"])]),
            expense("B", vec![item(12.0, &["B", "C"])]),
        ],
    );
    for viewer in ["A", "B", "C"] {
        let result = compute_group_balances(&group, viewer);
        assert!(result.receivables.iter().all(|p| p.id != viewer));
        assert!(result.payables.iter().all(|p| p.id != viewer));
    }
}

#[test]
fn idle_member_stays_out_of_lists() {
    let group = group(
        &["A", "B", "idle"],
        vec![expense("A", vec![item(100.0, &["A", "B"])])],
    );
    let balances = compute_balance_from_group(&group, &BalanceOptions::default());
    assert_eq!(balances.get("idle"), Some(0.0));

    for viewer in ["A", "B"] {
        let result = compute_group_balances(&group, viewer);
        assert!(result.receivables.iter().all(|p| p.id != "idle"));
        assert!(result.payables.iter().all(|p| p.id != "idle"));
    }

    let idle = compute_group_balances(&group, "idle");
    assert_eq!(idle.summary.status, BalanceStatus::Settled);
    assert!(idle.receivables.is_empty() && idle.payables.is_empty());
}

#[test]
fn empty_groups_yield_zero_output() {
    let result = calculate_all_balances(&[group(&["A"], vec![])], "A");
    assert_eq!(result.overall_summary.total_groups, 1);
    assert_eq!(result.overall_summary.total_spent, 0.0);
    assert_eq!(result.groups[0].summary.status, BalanceStatus::Settled);

    let none = calculate_all_balances(&[], "A");
    assert_eq!(none.overall_summary.total_groups, 0);
    assert!(none.groups.is_empty());
}

fn arbitrary_group() -> impl Strategy<Value = Group> {
    const MEMBERS: [&str; 5] = ["ana", "ben", "cho", "dev", "eli"];
    let item = (
        -10i32..=500,
        prop::collection::vec(0usize..MEMBERS.len(), 0..=6),
    )
        .prop_map(|(cents, sharers)| {
            let sharers: Vec<&str> = sharers.into_iter().map(|idx| MEMBERS[idx]).collect();
            self::item(f64::from(cents) / 4.0, &sharers)
        });
    let expense = (0usize..MEMBERS.len(), prop::collection::vec(item, 0..=4))
        .prop_map(|(payer, items)| self::expense(MEMBERS[payer], items));
    prop::collection::vec(expense, 0..=12).prop_map(|expenses| self::group(&MEMBERS, expenses))
}

proptest! {
    #[test]
    fn balances_sum_to_zero(group in arbitrary_group()) {
        let balances = compute_balance_from_group(&group, &BalanceOptions::default());
        prop_assert!(balances.total().abs() < 1e-6);
    }

    #[test]
    fn recomputation_is_idempotent(group in arbitrary_group(), viewer in 0usize..5) {
        let viewer = &group.members[viewer];
        prop_assert_eq!(
            compute_group_balances(&group, viewer),
            compute_group_balances(&group, viewer)
        );
    }

    #[test]
    fn listed_amounts_are_positive(group in arbitrary_group(), viewer in 0usize..5) {
        let result = compute_group_balances(&group, &group.members[viewer]);
        for person in result.receivables.iter().chain(result.payables.iter()) {
            prop_assert!(person.amount > 0.0);
        }
        prop_assert!(result.receivables.is_empty() || result.payables.is_empty());
    }

    #[test]
    fn settlement_plan_clears_every_balance(group in arbitrary_group()) {
        let options = BalanceOptions::default();
        let mut balances = compute_balance_from_group(&group, &options);
        for exchange in settle_group(&group, &options) {
            prop_assert!(exchange.amount > 0.0);
            prop_assert_ne!(&exchange.payer, &exchange.receiver);
            balances.credit(&exchange.payer, exchange.amount);
            balances.debit(&exchange.receiver, exchange.amount);
        }
        for (_, balance) in balances.iter() {
            prop_assert!(balance.abs() < 1e-6);
        }
    }
}
