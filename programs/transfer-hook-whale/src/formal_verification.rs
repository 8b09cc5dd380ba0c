// ============================================================================
// INVARIANTS & PROPERTY-BASED TESTS
// ============================================================================
//
// Run with: cargo test --lib formal_verification
//
// This module implements:
// 1. Ledger invariants over transfer sequences
// 2. Deterministic fuzzing vectors for the threshold check
// ============================================================================

#[cfg(test)]
mod formal_tests {
    use anchor_lang::prelude::*;

    use crate::helpers::policy::*;
    use crate::state::*;

    const NOW: i64 = 1_700_000_000;

    fn setup(threshold: u64, policy: WhalePolicy) -> (MintConfig, WhaleLedger) {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let mut config = MintConfig::default();
        config.initialize(mint, authority, threshold, 255, NOW).unwrap();
        config.set_policy(&authority, policy, NOW).unwrap();
        let ledger = WhaleLedger::open(mint, Pubkey::new_unique(), 255, 0, NOW);
        (config, ledger)
    }

    /// Pseudo-random amounts from a fixed LCG so runs are reproducible
    fn amounts(seed: u64, count: usize, max: u64) -> Vec<u64> {
        let mut state = seed;
        (0..count)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                (state >> 33) % (max + 1)
            })
            .collect()
    }

    // ========================================================================
    // SECTION 1: LEDGER INVARIANTS
    // ========================================================================

    mod invariants {
        use super::*;

        /// INV-1: Volume equals the sum of accepted amounts; zero
        /// transfers are not counted
        #[test]
        fn inv1_volume_is_sum_of_accepted() {
            for seed in 1..=20u64 {
                let (config, mut ledger) = setup(10_000, WhalePolicy::Reject);
                let mut accepted_sum = 0u64;
                let mut accepted_count = 0u64;

                for (slot, amount) in amounts(seed, 50, 900).into_iter().enumerate() {
                    if apply_transfer(&config, &mut ledger, amount, slot as u64, NOW).is_ok()
                        && amount > 0
                    {
                        accepted_sum += amount;
                        accepted_count += 1;
                    }
                }

                assert_eq!(
                    ledger.cumulative_volume, accepted_sum,
                    "INV-1 violated for seed {}", seed
                );
                assert_eq!(ledger.transfer_count, accepted_count);
            }
        }

        /// INV-2: Volume never decreases between resets
        #[test]
        fn inv2_volume_monotonic() {
            for policy in [WhalePolicy::Reject, WhalePolicy::Flag] {
                let (config, mut ledger) = setup(5_000, policy);
                let mut previous = ledger.cumulative_volume;

                for amount in amounts(7, 100, 400) {
                    let _ = apply_transfer(&config, &mut ledger, amount, 0, NOW);
                    assert!(
                        ledger.cumulative_volume >= previous,
                        "INV-2 violated: {} < {}", ledger.cumulative_volume, previous
                    );
                    previous = ledger.cumulative_volume;
                }
            }
        }

        /// INV-3: Under Reject, volume never exceeds the threshold
        #[test]
        fn inv3_reject_caps_volume() {
            for threshold in [1u64, 10, 999, 1_000, 123_456] {
                let (config, mut ledger) = setup(threshold, WhalePolicy::Reject);
                for amount in amounts(threshold, 200, threshold) {
                    let _ = apply_transfer(&config, &mut ledger, amount, 0, NOW);
                    assert!(
                        ledger.cumulative_volume <= threshold,
                        "INV-3 violated: {} > {}", ledger.cumulative_volume, threshold
                    );
                }
            }
        }

        /// INV-4: A rejected transfer leaves the ledger bit-for-bit unchanged
        #[test]
        fn inv4_reject_is_all_or_nothing() {
            let (config, mut ledger) = setup(1_000, WhalePolicy::Reject);
            apply_transfer(&config, &mut ledger, 999, 1, NOW).unwrap();

            let mut before = Vec::new();
            ledger.try_serialize(&mut before).unwrap();

            for amount in [2u64, 500, 1_000, u64::MAX] {
                assert!(apply_transfer(&config, &mut ledger, amount, 99, NOW + 99).is_err());
                let mut after = Vec::new();
                ledger.try_serialize(&mut after).unwrap();
                assert_eq!(before, after, "INV-4 violated for amount {}", amount);
            }
        }

        /// INV-5: Under Flag, every transfer is committed
        #[test]
        fn inv5_flag_never_rejects() {
            let (config, mut ledger) = setup(100, WhalePolicy::Flag);
            let sequence = amounts(3, 40, 1_000);
            let total: u64 = sequence.iter().sum();
            let mut crossings = 0u64;

            for amount in sequence {
                let evaluation = apply_transfer(&config, &mut ledger, amount, 0, NOW).unwrap();
                if evaluation.crosses_threshold {
                    crossings += 1;
                }
            }

            assert_eq!(ledger.cumulative_volume, total);
            assert!(crossings > 0);
        }

        /// INV-6: Reset restores the full threshold headroom
        #[test]
        fn inv6_reset_restores_headroom() {
            let (config, mut ledger) = setup(1_000, WhalePolicy::Reject);
            apply_transfer(&config, &mut ledger, 1_000, 0, NOW).unwrap();
            assert!(apply_transfer(&config, &mut ledger, 1, 0, NOW).is_err());

            ledger.reset(1, NOW).unwrap();
            apply_transfer(&config, &mut ledger, 1_000, 2, NOW).unwrap();
            assert_eq!(ledger.cumulative_volume, 1_000);
        }

        /// INV-7: Ledgers of different destinations do not interfere
        #[test]
        fn inv7_subjects_are_independent() {
            let (config, mut a) = setup(1_000, WhalePolicy::Reject);
            let mut b = WhaleLedger::open(config.mint, Pubkey::new_unique(), 255, 0, NOW);

            apply_transfer(&config, &mut a, 1_000, 0, NOW).unwrap();
            assert!(apply_transfer(&config, &mut a, 1, 0, NOW).is_err());
            apply_transfer(&config, &mut b, 1_000, 0, NOW).unwrap();

            assert_eq!(a.cumulative_volume, 1_000);
            assert_eq!(b.cumulative_volume, 1_000);
        }
    }

    // ========================================================================
    // SECTION 2: FUZZING TARGETS (Property-Based)
    // ========================================================================

    mod fuzzing {
        use super::*;

        /// FUZZ-1: evaluate_transfer agrees with a plain u128 model
        #[test]
        fn fuzz1_evaluate_matches_model() {
            let test_vectors: Vec<(u64, u64, u64)> = vec![
                // (threshold, current, amount)
                (1, 0, 0),
                (1, 0, 1),
                (1, 0, 2),
                (1_000, 600, 400),
                (1_000, 600, 401),
                (u64::MAX, u64::MAX - 1, 1),
                (u64::MAX, u64::MAX, 1),
                (u64::MAX, 0, u64::MAX),
                (5, 10, 0),
            ];

            for (threshold, current, amount) in test_vectors {
                let model = current as u128 + amount as u128;

                for policy in [WhalePolicy::Reject, WhalePolicy::Flag] {
                    let result = evaluate_transfer(threshold, policy, current, amount);

                    if model > u64::MAX as u128 {
                        assert!(result.is_err(), "overflow must error for {:?}", (threshold, current, amount));
                        continue;
                    }

                    let crosses = model > threshold as u128;
                    match (policy, result) {
                        (WhalePolicy::Reject, Err(_)) => assert!(crosses),
                        (_, Ok(evaluation)) => {
                            assert_eq!(evaluation.prospective_volume as u128, model);
                            assert_eq!(evaluation.crosses_threshold, crosses);
                            if policy == WhalePolicy::Reject {
                                assert!(!crosses);
                            }
                        }
                        (WhalePolicy::Flag, Err(_)) => panic!("Flag policy rejected {:?}", (threshold, current, amount)),
                    }
                }
            }
        }

        /// FUZZ-2: threshold boundary at every position of a sequence
        #[test]
        fn fuzz2_boundary_sequences() {
            for threshold in 1..=64u64 {
                let (config, mut ledger) = setup(threshold, WhalePolicy::Reject);
                // Unit steps: exactly `threshold` accepts then rejection
                for _ in 0..threshold {
                    apply_transfer(&config, &mut ledger, 1, 0, NOW).unwrap();
                }
                assert!(apply_transfer(&config, &mut ledger, 1, 0, NOW).is_err());
                assert_eq!(ledger.cumulative_volume, threshold);
                assert_eq!(ledger.transfer_count, threshold);
            }
        }
    }
}
