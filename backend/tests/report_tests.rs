//! Monthly report tests
//!
//! Tests for report month parsing and the per-material summary arithmetic:
//! closing quantity = opening quantity + inbound total - outbound total.

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::models::MovementKind;
use shared::validation::parse_month;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_parse_month_accepts_valid_input() {
        assert_eq!(parse_month("2025-07"), Ok((2025, 7)));
        assert_eq!(parse_month("1999-12"), Ok((1999, 12)));
        assert_eq!(parse_month("2025-1"), Ok((2025, 1)));
    }

    #[test]
    fn test_parse_month_rejects_malformed_input() {
        assert!(parse_month("2025").is_err());
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-00").is_err());
        assert!(parse_month("july 2025").is_err());
        assert!(parse_month("").is_err());
    }

    #[test]
    fn test_parse_month_rejects_out_of_range_year() {
        assert!(parse_month("0500-01").is_err());
        assert!(parse_month("10000-01").is_err());
    }
}

// ============================================================================
// Summary Arithmetic Simulation
// ============================================================================

/// One logged movement with the day it happened, mirroring the rows the
/// monthly summary aggregates.
#[cfg(test)]
#[derive(Debug, Clone)]
struct LoggedMovement {
    kind: MovementKind,
    quantity: i64,
    day: NaiveDate,
}

/// Compute one material's monthly summary the way the report query buckets
/// the movement log.
#[cfg(test)]
fn summarize(movements: &[LoggedMovement], year: i32, month: u32) -> (i64, i64, i64, i64) {
    let month_start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let month_end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };

    let mut opening = 0i64;
    let mut inbound = 0i64;
    let mut outbound = 0i64;

    for movement in movements {
        if movement.day < month_start {
            match movement.kind {
                MovementKind::Inbound => opening += movement.quantity,
                MovementKind::Outbound => opening -= movement.quantity,
            }
        } else if movement.day < month_end {
            match movement.kind {
                MovementKind::Inbound => inbound += movement.quantity,
                MovementKind::Outbound => outbound += movement.quantity,
            }
        }
    }

    (opening, inbound, outbound, opening + inbound - outbound)
}

#[cfg(test)]
mod summary_tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_summary_buckets_movements_by_month() {
        let movements = vec![
            LoggedMovement {
                kind: MovementKind::Inbound,
                quantity: 200,
                day: day(2025, 5, 20),
            },
            LoggedMovement {
                kind: MovementKind::Outbound,
                quantity: 50,
                day: day(2025, 5, 28),
            },
            LoggedMovement {
                kind: MovementKind::Inbound,
                quantity: 80,
                day: day(2025, 6, 3),
            },
            LoggedMovement {
                kind: MovementKind::Outbound,
                quantity: 30,
                day: day(2025, 6, 15),
            },
            // The following month must not leak into June
            LoggedMovement {
                kind: MovementKind::Inbound,
                quantity: 999,
                day: day(2025, 7, 1),
            },
        ];

        let (opening, inbound, outbound, closing) = summarize(&movements, 2025, 6);

        assert_eq!(opening, 150);
        assert_eq!(inbound, 80);
        assert_eq!(outbound, 30);
        assert_eq!(closing, 200);
    }

    #[test]
    fn test_summary_of_month_without_movements() {
        let movements = vec![LoggedMovement {
            kind: MovementKind::Inbound,
            quantity: 120,
            day: day(2025, 3, 10),
        }];

        let (opening, inbound, outbound, closing) = summarize(&movements, 2025, 6);

        assert_eq!(opening, 120);
        assert_eq!(inbound, 0);
        assert_eq!(outbound, 0);
        assert_eq!(closing, 120);
    }

    #[test]
    fn test_december_summary_wraps_into_next_year() {
        let movements = vec![
            LoggedMovement {
                kind: MovementKind::Inbound,
                quantity: 40,
                day: day(2024, 12, 31),
            },
            LoggedMovement {
                kind: MovementKind::Inbound,
                quantity: 10,
                day: day(2025, 1, 1),
            },
        ];

        let (_, inbound, _, closing) = summarize(&movements, 2024, 12);

        assert_eq!(inbound, 40);
        assert_eq!(closing, 40);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn movement_strategy() -> impl Strategy<Value = LoggedMovement> {
        (
            prop_oneof![Just(MovementKind::Inbound), Just(MovementKind::Outbound)],
            1i64..=1_000,
            1u32..=12,
            1u32..=28,
        )
            .prop_map(|(kind, quantity, month, day)| LoggedMovement {
                kind,
                quantity,
                day: NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Closing quantity always equals opening + inbound - outbound
        #[test]
        fn prop_closing_balances(
            movements in prop::collection::vec(movement_strategy(), 0..40),
            month in 1u32..=12
        ) {
            let (opening, inbound, outbound, closing) = summarize(&movements, 2025, month);
            prop_assert_eq!(closing, opening + inbound - outbound);
        }

        /// Consecutive months chain: June's closing is July's opening
        #[test]
        fn prop_months_chain(
            movements in prop::collection::vec(movement_strategy(), 0..40),
            month in 1u32..=11
        ) {
            let (_, _, _, closing) = summarize(&movements, 2025, month);
            let (next_opening, _, _, _) = summarize(&movements, 2025, month + 1);
            prop_assert_eq!(closing, next_opening);
        }

        /// Parsing a formatted month string round-trips
        #[test]
        fn prop_month_string_round_trip(year in 1970i32..=9999, month in 1u32..=12) {
            let formatted = format!("{:04}-{:02}", year, month);
            prop_assert_eq!(parse_month(&formatted), Ok((year, month)));
        }
    }
}
