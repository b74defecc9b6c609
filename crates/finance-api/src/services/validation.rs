//! 요청 본문 검증 헬퍼.
//!
//! 요청 타입은 `validator::Validate`를 derive하고, 서비스는 필드 순서를 넘겨
//! 처음으로 실패한 필드의 메시지만 응답합니다.

use finance_core::FinanceError;
use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;

/// 금액 0은 누락으로 취급합니다.
pub(crate) fn validate_non_zero_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_zero() {
        return Err(ValidationError::new("amount_zero").with_message("amount is required".into()));
    }
    Ok(())
}

/// 요청을 검증하고, 실패 시 `order`에서 가장 앞선 필드의 에러를 반환합니다.
pub(crate) fn validate_in_order<T: Validate>(
    request: &T,
    order: &[&'static str],
) -> Result<(), ApiError> {
    match request.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(first_error(&errors, order)),
    }
}

fn first_error(errors: &ValidationErrors, order: &[&'static str]) -> ApiError {
    let field_errors = errors.field_errors();

    for &field in order {
        if let Some(list) = field_errors.get(field) {
            let message = list
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| FinanceError::MissingField(field).to_string());
            return ApiError::Validation(message);
        }
    }

    // 순서 목록에 없는 필드
    let message = field_errors
        .values()
        .flat_map(|list| list.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());
    ApiError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Debug, Default, Validate)]
    struct Sample {
        #[validate(
            required(message = "first is required"),
            length(min = 1, message = "first is required")
        )]
        first: Option<String>,
        #[validate(
            required(message = "second is required"),
            length(min = 1, message = "second is required")
        )]
        second: Option<String>,
        #[validate(
            required(message = "amount is required"),
            custom(function = "validate_non_zero_amount")
        )]
        amount: Option<Decimal>,
    }

    const ORDER: &[&str] = &["first", "second", "amount"];

    #[test]
    fn test_reports_first_field_in_given_order() {
        let err = validate_in_order(&Sample::default(), ORDER).unwrap_err();
        assert_eq!(err.to_string(), "first is required");

        let sample = Sample {
            first: Some("a".to_string()),
            second: Some(String::new()),
            amount: None,
        };
        let err = validate_in_order(&sample, ORDER).unwrap_err();
        assert_eq!(err.to_string(), "second is required");
    }

    #[test]
    fn test_zero_amount_counts_as_missing() {
        let sample = Sample {
            first: Some("a".to_string()),
            second: Some("b".to_string()),
            amount: Some(Decimal::ZERO),
        };
        let err = validate_in_order(&sample, ORDER).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "amount is required"));
    }

    #[test]
    fn test_valid_request_passes() {
        let sample = Sample {
            first: Some("a".to_string()),
            second: Some("b".to_string()),
            amount: Some(dec!(-3.5)),
        };
        assert!(validate_in_order(&sample, ORDER).is_ok());
    }
}
