//! 거래 기록 도메인 통합 테스트
//!
//! 생성 → 검증 → 수정 → 합계 흐름을 도메인 타입만으로 확인합니다.

use rust_decimal_macros::dec;
use uuid::Uuid;

use finance_core::{
    NewTransaction, Transaction, TransactionPatch, TransactionSummary, TransactionType,
};

fn record(owner: Uuid, kind: TransactionType, amount: rust_decimal::Decimal) -> Transaction {
    Transaction::new(
        owner,
        NewTransaction {
            kind,
            category: "General".to_string(),
            amount,
            date: "2024-06-01".to_string(),
            description: Some("integration".to_string()),
        },
    )
}

#[test]
fn test_monthly_ledger_summary() {
    let owner = Uuid::new_v4();

    let ledger = vec![
        record(owner, TransactionType::Income, dec!(2500.99)),
        record(owner, TransactionType::Income, dec!(120.50)),
        record(owner, TransactionType::Expense, dec!(899.99)),
        record(owner, TransactionType::Expense, dec!(45.10)),
    ];

    let summary = TransactionSummary::from_transactions(&ledger);

    // 각 금액을 먼저 절삭: 2500 + 120, 899 + 45
    assert_eq!(summary.total_income, 2620);
    assert_eq!(summary.total_expenses, 944);
}

#[test]
fn test_patch_changes_summary_bucket() {
    let owner = Uuid::new_v4();
    let mut tx = record(owner, TransactionType::Expense, dec!(30));

    TransactionPatch {
        kind: Some(TransactionType::Income),
        ..Default::default()
    }
    .apply(&mut tx);

    let summary = TransactionSummary::from_transactions([&tx]);
    assert_eq!(summary.total_income, 30);
    assert_eq!(summary.total_expenses, 0);
}

#[test]
fn test_wire_format_of_record() {
    let tx = record(Uuid::new_v4(), TransactionType::Income, dec!(100.75));
    let json = serde_json::to_value(&tx).unwrap();

    assert_eq!(json["type"], "income");
    assert_eq!(json["amount"], 100.75);
    assert!(json.get("userId").is_some());
    assert!(json.get("createdAt").is_some());
    assert!(json.get("kind").is_none());
}
