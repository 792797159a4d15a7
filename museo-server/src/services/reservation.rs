//! Reservation money helpers
//!
//! Totals are computed with `Decimal` and stored as `f64` rounded to
//! 2 decimal places, half-up.

use rust_decimal::prelude::*;

use crate::utils::{AppError, AppResult};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Total to pay for a reservation: unit price × ticket count
pub fn compute_total(unit_price: f64, ticket_count: i32) -> AppResult<f64> {
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(AppError::validation(format!(
            "Ticket price must be a non-negative number, got {}",
            unit_price
        )));
    }
    if ticket_count <= 0 {
        return Err(AppError::validation(format!(
            "Ticket count must be at least 1, got {}",
            ticket_count
        )));
    }

    let price = Decimal::from_f64(unit_price)
        .ok_or_else(|| AppError::validation(format!("Invalid ticket price: {}", unit_price)))?;
    let total = (price * Decimal::from(ticket_count))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    total
        .to_f64()
        .ok_or_else(|| AppError::internal("Total does not fit in an f64".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_price_times_count() {
        assert_eq!(compute_total(42.50, 3).unwrap(), 127.50);
        assert_eq!(compute_total(19.99, 2).unwrap(), 39.98);
    }

    #[test]
    fn test_total_rounds_half_up() {
        // 0.125 is exactly representable; half-up gives 0.13
        assert_eq!(compute_total(0.125, 1).unwrap(), 0.13);
        assert_eq!(compute_total(0.125, 2).unwrap(), 0.25);
    }

    #[test]
    fn test_free_event_total_is_zero() {
        assert_eq!(compute_total(0.0, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(compute_total(-1.0, 2).is_err());
        assert!(compute_total(f64::NAN, 2).is_err());
        assert!(compute_total(10.0, 0).is_err());
        assert!(compute_total(10.0, -3).is_err());
    }
}
