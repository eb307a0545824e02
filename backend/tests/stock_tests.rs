//! Stock mutation tests
//!
//! Tests for the inventory ledger mutation rules:
//! - Outbound movements never drive the ledger negative
//! - Inbound movements may initialize a missing ledger row, checks may not
//! - Physical checks set the ledger to the counted value exactly

use proptest::prelude::*;
use shared::models::{validate_counted_quantity, MovementKind, StockError};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_inbound_adds_to_existing_quantity() {
        let new_quantity = MovementKind::Inbound.apply(Some(100), 40).unwrap();
        assert_eq!(new_quantity, 140);
    }

    #[test]
    fn test_outbound_subtracts_from_existing_quantity() {
        let new_quantity = MovementKind::Outbound.apply(Some(100), 40).unwrap();
        assert_eq!(new_quantity, 60);
    }

    #[test]
    fn test_outbound_of_entire_quantity_reaches_zero() {
        let new_quantity = MovementKind::Outbound.apply(Some(75), 75).unwrap();
        assert_eq!(new_quantity, 0);
    }

    #[test]
    fn test_outbound_exceeding_stock_is_rejected() {
        let result = MovementKind::Outbound.apply(Some(100), 150);
        assert_eq!(
            result,
            Err(StockError::InsufficientStock {
                available: 100,
                requested: 150,
            })
        );
    }

    #[test]
    fn test_inbound_initializes_missing_ledger_row() {
        let new_quantity = MovementKind::Inbound.apply(None, 5).unwrap();
        assert_eq!(new_quantity, 5);
    }

    #[test]
    fn test_outbound_without_ledger_row_is_rejected() {
        let result = MovementKind::Outbound.apply(None, 5);
        assert_eq!(result, Err(StockError::NoStockRecord));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        assert_eq!(
            MovementKind::Inbound.apply(Some(10), 0),
            Err(StockError::NonPositiveQuantity)
        );
        assert_eq!(
            MovementKind::Outbound.apply(Some(10), 0),
            Err(StockError::NonPositiveQuantity)
        );
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        assert_eq!(
            MovementKind::Inbound.apply(Some(10), -3),
            Err(StockError::NonPositiveQuantity)
        );
    }

    #[test]
    fn test_counted_quantity_may_be_zero() {
        assert!(validate_counted_quantity(0).is_ok());
        assert!(validate_counted_quantity(250).is_ok());
    }

    #[test]
    fn test_negative_counted_quantity_is_rejected() {
        assert_eq!(
            validate_counted_quantity(-1),
            Err(StockError::NegativeQuantity)
        );
    }

    #[test]
    fn test_movement_kind_wire_names() {
        assert_eq!(MovementKind::Inbound.as_str(), "inbound");
        assert_eq!(MovementKind::Outbound.as_str(), "outbound");

        assert_eq!("inbound".parse::<MovementKind>(), Ok(MovementKind::Inbound));
        assert_eq!(
            "outbound".parse::<MovementKind>(),
            Ok(MovementKind::Outbound)
        );
        assert!("transfer".parse::<MovementKind>().is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid movement quantities
    fn quantity_strategy() -> impl Strategy<Value = i64> {
        1i64..=10_000
    }

    /// Strategy for generating on-hand quantities
    fn on_hand_strategy() -> impl Strategy<Value = i64> {
        0i64..=10_000
    }

    fn kind_strategy() -> impl Strategy<Value = MovementKind> {
        prop_oneof![Just(MovementKind::Inbound), Just(MovementKind::Outbound)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// An accepted movement never leaves a negative quantity
        #[test]
        fn prop_accepted_movement_never_negative(
            kind in kind_strategy(),
            on_hand in on_hand_strategy(),
            quantity in quantity_strategy()
        ) {
            if let Ok(new_quantity) = kind.apply(Some(on_hand), quantity) {
                prop_assert!(new_quantity >= 0);
            }
        }

        /// Inbound movements add exactly the moved quantity
        #[test]
        fn prop_inbound_adds_exactly(
            on_hand in on_hand_strategy(),
            quantity in quantity_strategy()
        ) {
            let new_quantity = MovementKind::Inbound.apply(Some(on_hand), quantity).unwrap();
            prop_assert_eq!(new_quantity, on_hand + quantity);
        }

        /// An outbound movement succeeds exactly when enough stock is on hand
        #[test]
        fn prop_outbound_succeeds_iff_covered(
            on_hand in on_hand_strategy(),
            quantity in quantity_strategy()
        ) {
            match MovementKind::Outbound.apply(Some(on_hand), quantity) {
                Ok(new_quantity) => {
                    prop_assert!(quantity <= on_hand);
                    prop_assert_eq!(new_quantity, on_hand - quantity);
                }
                Err(StockError::InsufficientStock { available, requested }) => {
                    prop_assert!(quantity > on_hand);
                    prop_assert_eq!(available, on_hand);
                    prop_assert_eq!(requested, quantity);
                }
                Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
            }
        }

        /// A sequence of accepted movements keeps the quantity non-negative
        #[test]
        fn prop_movement_sequence_stays_non_negative(
            movements in prop::collection::vec(
                (kind_strategy(), quantity_strategy()),
                1..30
            )
        ) {
            let mut on_hand: Option<i64> = None;

            for (kind, quantity) in movements {
                if let Ok(new_quantity) = kind.apply(on_hand, quantity) {
                    on_hand = Some(new_quantity);
                }
                if let Some(q) = on_hand {
                    prop_assert!(q >= 0);
                }
            }
        }
    }
}

// ============================================================================
// In-Memory Mutator Simulation
// ============================================================================

#[cfg(test)]
mod mutator_simulation {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum LogEntry {
        Movement {
            material_id: Uuid,
            kind: MovementKind,
            quantity: i64,
        },
        Check {
            material_id: Uuid,
            real_quantity: i64,
            recorded_quantity: i64,
        },
    }

    /// Ledger plus append-only log, mirroring the transactional mutator: a
    /// rejected mutation leaves both untouched.
    #[derive(Default)]
    struct InMemoryStore {
        ledger: HashMap<Uuid, i64>,
        log: Vec<LogEntry>,
    }

    impl InMemoryStore {
        fn apply_movement(
            &mut self,
            material_id: Uuid,
            kind: MovementKind,
            quantity: i64,
        ) -> Result<i64, StockError> {
            let current = self.ledger.get(&material_id).copied();
            let new_quantity = kind.apply(current, quantity)?;

            self.ledger.insert(material_id, new_quantity);
            self.log.push(LogEntry::Movement {
                material_id,
                kind,
                quantity,
            });
            Ok(new_quantity)
        }

        fn apply_check(&mut self, material_id: Uuid, real_quantity: i64) -> Result<i64, StockError> {
            validate_counted_quantity(real_quantity)?;

            let recorded_quantity = self
                .ledger
                .get(&material_id)
                .copied()
                .ok_or(StockError::NoStockRecord)?;

            self.ledger.insert(material_id, real_quantity);
            self.log.push(LogEntry::Check {
                material_id,
                real_quantity,
                recorded_quantity,
            });
            Ok(real_quantity)
        }
    }

    #[test]
    fn test_rejected_outbound_leaves_ledger_unchanged() {
        let mut store = InMemoryStore::default();
        let material = Uuid::new_v4();

        store.apply_movement(material, MovementKind::Inbound, 100).unwrap();
        let result = store.apply_movement(material, MovementKind::Outbound, 150);

        assert!(result.is_err());
        assert_eq!(store.ledger[&material], 100);
        assert_eq!(store.log.len(), 1);
    }

    #[test]
    fn test_outbound_on_unknown_material_appends_nothing() {
        let mut store = InMemoryStore::default();
        let material = Uuid::new_v4();

        let result = store.apply_movement(material, MovementKind::Outbound, 5);

        assert_eq!(result, Err(StockError::NoStockRecord));
        assert!(store.ledger.is_empty());
        assert!(store.log.is_empty());
    }

    #[test]
    fn test_inbound_on_unknown_material_initializes_ledger() {
        let mut store = InMemoryStore::default();
        let material = Uuid::new_v4();

        let new_quantity = store
            .apply_movement(material, MovementKind::Inbound, 5)
            .unwrap();

        assert_eq!(new_quantity, 5);
        assert_eq!(store.ledger[&material], 5);
    }

    #[test]
    fn test_check_sets_ledger_and_snapshots_prior_value() {
        let mut store = InMemoryStore::default();
        let material = Uuid::new_v4();

        store.apply_movement(material, MovementKind::Inbound, 80).unwrap();
        store.apply_check(material, 65).unwrap();

        assert_eq!(store.ledger[&material], 65);
        assert_eq!(
            store.log.last(),
            Some(&LogEntry::Check {
                material_id: material,
                real_quantity: 65,
                recorded_quantity: 80,
            })
        );
    }

    #[test]
    fn test_check_cannot_initialize_stock() {
        let mut store = InMemoryStore::default();
        let material = Uuid::new_v4();

        let result = store.apply_check(material, 30);

        assert_eq!(result, Err(StockError::NoStockRecord));
        assert!(store.ledger.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A check always lands the ledger exactly on the counted value
        #[test]
        fn prop_check_round_trip(
            initial in 1i64..=10_000,
            counted in 0i64..=10_000
        ) {
            let mut store = InMemoryStore::default();
            let material = Uuid::new_v4();

            store.apply_movement(material, MovementKind::Inbound, initial).unwrap();
            store.apply_check(material, counted).unwrap();

            prop_assert_eq!(store.ledger[&material], counted);
            prop_assert_eq!(
                store.log.last(),
                Some(&LogEntry::Check {
                    material_id: material,
                    real_quantity: counted,
                    recorded_quantity: initial,
                })
            );
        }

        /// One log entry exists per accepted mutation, none per rejection
        #[test]
        fn prop_log_grows_only_on_accepted_mutations(
            movements in prop::collection::vec(
                (prop_oneof![Just(MovementKind::Inbound), Just(MovementKind::Outbound)], 1i64..=500),
                1..40
            )
        ) {
            let mut store = InMemoryStore::default();
            let material = Uuid::new_v4();
            let mut accepted = 0usize;

            for (kind, quantity) in movements {
                if store.apply_movement(material, kind, quantity).is_ok() {
                    accepted += 1;
                }
            }

            prop_assert_eq!(store.log.len(), accepted);
        }
    }
}
