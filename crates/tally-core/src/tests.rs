use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tally_domain::{Filter, TransactionDraft, TransactionId, TransactionKind};

use crate::{
    projection_service::ProjectionService,
    storage::{MemoryKeyValueStore, TransactionRepository},
    store::TransactionStore,
    summary_service::{SummaryService, Totals},
    time::FixedClock,
};

fn store() -> TransactionStore {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
    TransactionStore::new(Arc::new(FixedClock(now)))
}

fn salary_and_lunch(store: &mut TransactionStore) -> (TransactionId, TransactionId) {
    let salary = store
        .add(TransactionDraft::income(100.0, "Salary", "May"))
        .expect("salary");
    let lunch = store
        .add(TransactionDraft::expense(40.0, "Food", "Lunch"))
        .expect("lunch");
    (salary, lunch)
}

#[test]
fn salary_and_lunch_produce_expected_totals() {
    let mut store = store();
    salary_and_lunch(&mut store);

    let totals = SummaryService::totals(store.list());
    assert_eq!(
        totals,
        Totals {
            balance: 60.0,
            income: 100.0,
            expenses: 40.0
        }
    );
    let breakdown = SummaryService::category_breakdown(store.list());
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown.get("Food"), Some(40.0));
}

#[test]
fn editing_expense_amount_updates_aggregates() {
    let mut store = store();
    let (_, lunch) = salary_and_lunch(&mut store);
    let before = store.get(lunch).cloned().expect("lunch stored");

    store
        .update(lunch, TransactionDraft::expense(60.0, "Food", "Lunch"))
        .expect("edit");

    let after = store.get(lunch).expect("lunch still stored");
    assert_eq!(after.id, before.id);
    assert_eq!(after.date, before.date);
    assert_eq!(SummaryService::totals(store.list()).expenses, 60.0);
    assert_eq!(
        SummaryService::category_breakdown(store.list()).get("Food"),
        Some(60.0)
    );
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let mut store = store();
    salary_and_lunch(&mut store);
    let totals = SummaryService::totals(store.list());
    let breakdown = SummaryService::category_breakdown(store.list());

    assert!(store.remove(TransactionId::new()).is_none());

    assert_eq!(SummaryService::totals(store.list()), totals);
    assert_eq!(SummaryService::category_breakdown(store.list()), breakdown);
}

#[test]
fn income_projection_is_a_date_ordered_subset() {
    let mut store = store();
    let early = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    store
        .add(TransactionDraft::income(10.0, "Gift", "Early").with_date(early))
        .unwrap();
    store
        .add(TransactionDraft::expense(5.0, "Food", "Snack"))
        .unwrap();
    store
        .add(TransactionDraft::income(20.0, "Bonus", "Late").with_date(late))
        .unwrap();

    let projected = ProjectionService::project(store.list(), Filter::Income);
    assert_eq!(projected.len(), 2);
    assert!(projected.iter().all(|txn| txn.kind == TransactionKind::Income));
    assert!(projected.iter().all(|txn| store.get(txn.id) == Some(txn)));
    assert!(projected.windows(2).all(|pair| pair[0].date >= pair[1].date));
}

#[test]
fn persisted_log_restores_into_an_equal_store() {
    let mut store = store();
    salary_and_lunch(&mut store);
    let mut repo = TransactionRepository::new(MemoryKeyValueStore::new());
    repo.save(store.list()).expect("save");

    let restored = TransactionStore::from_transactions(
        repo.load().expect("load"),
        Arc::new(FixedClock(Utc::now())),
    )
    .expect("restore");
    assert_eq!(restored.snapshot(), store.snapshot());
}
