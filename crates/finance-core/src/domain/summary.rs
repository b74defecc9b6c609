//! 수입/지출 합계.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Transaction, TransactionType};

/// 사용자별 수입/지출 합계.
///
/// 각 금액은 합산 전에 0 방향으로 정수 절삭됩니다 (반올림 아님).
/// `Decimal`의 정수부는 최대 96비트이므로 i128로 누적합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct TransactionSummary {
    /// 총 수입
    #[serde(rename = "Total_Income")]
    pub total_income: i128,
    /// 총 지출
    #[serde(rename = "Total_Expenses")]
    pub total_expenses: i128,
}

/// 금액을 0 방향으로 절삭한 정수.
pub fn truncate_amount(amount: Decimal) -> i128 {
    // 96비트 가수는 항상 i128에 들어간다
    amount.trunc().to_i128().unwrap_or_default()
}

impl TransactionSummary {
    /// 거래 한 건을 합계에 반영합니다.
    pub fn add(&mut self, kind: TransactionType, amount: Decimal) {
        let value = truncate_amount(amount);
        match kind {
            TransactionType::Income => {
                self.total_income = self.total_income.saturating_add(value);
            }
            TransactionType::Expense => {
                self.total_expenses = self.total_expenses.saturating_add(value);
            }
        }
    }

    /// 거래 목록에서 합계를 계산합니다.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::default(), |mut summary, tx| {
                summary.add(tx.kind, tx.amount);
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTransaction;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn tx(kind: TransactionType, amount: Decimal) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            NewTransaction {
                kind,
                category: "misc".to_string(),
                amount,
                date: "2024-01-01".to_string(),
                description: None,
            },
        )
    }

    #[test]
    fn test_truncates_each_amount_before_summing() {
        let transactions = vec![
            tx(TransactionType::Income, dec!(100.75)),
            tx(TransactionType::Expense, dec!(50.25)),
        ];

        let summary = TransactionSummary::from_transactions(&transactions);
        assert_eq!(summary.total_income, 100);
        assert_eq!(summary.total_expenses, 50);
    }

    #[test]
    fn test_truncation_is_per_transaction_not_per_total() {
        // 0.6 + 0.6 은 1.2 지만 각각 0 으로 절삭된다
        let transactions = vec![
            tx(TransactionType::Income, dec!(0.6)),
            tx(TransactionType::Income, dec!(0.6)),
        ];

        let summary = TransactionSummary::from_transactions(&transactions);
        assert_eq!(summary.total_income, 0);
    }

    #[test]
    fn test_negative_amounts_truncate_toward_zero() {
        assert_eq!(truncate_amount(dec!(-3.7)), -3);
        assert_eq!(truncate_amount(dec!(3.7)), 3);
        assert_eq!(truncate_amount(dec!(0.99)), 0);
    }

    #[test]
    fn test_amounts_beyond_i64_are_summed_exactly() {
        let transactions = vec![
            tx(TransactionType::Income, dec!(100.75)),
            tx(TransactionType::Income, dec!(0.1)),
            tx(TransactionType::Income, dec!(12.5)),
            tx(TransactionType::Income, dec!(-3.7)),
            tx(TransactionType::Income, dec!(12345678901234567890)),
        ];

        let summary = TransactionSummary::from_transactions(&transactions);
        assert_eq!(summary.total_income, 12_345_678_901_234_567_999);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""Total_Income":12345678901234567999"#));
    }

    #[test]
    fn test_max_decimal_amount_truncates_without_loss() {
        assert_eq!(truncate_amount(Decimal::MAX), 79_228_162_514_264_337_593_543_950_335);
        assert_eq!(truncate_amount(Decimal::MIN), -79_228_162_514_264_337_593_543_950_335);
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = TransactionSummary::from_transactions(&[]);
        assert_eq!(summary, TransactionSummary::default());
    }

    #[test]
    fn test_wire_field_names() {
        let summary = TransactionSummary {
            total_income: 10,
            total_expenses: 4,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"Total_Income":10,"Total_Expenses":4}"#);
    }

    proptest! {
        #[test]
        fn prop_truncation_never_exceeds_magnitude(cents in -1_000_000_000i64..1_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let truncated = Decimal::from_i128_with_scale(truncate_amount(amount), 0);
            prop_assert!(truncated.abs() <= amount.abs());
            prop_assert!((amount - truncated).abs() < Decimal::ONE);
        }
    }
}
