//! Dynamic Fee Property Tests
//!
//! Invariants that must hold for any volatility, parameter set or sequence
//! of swaps: fee bounds, atomic rejection and monotonic accrual.

use fee_hook::constants::{MAX_FEE, MAX_PROTOCOL_SHARE, MIN_FEE};
use fee_hook::{
    Address, DynamicFeeHook, FeeCurve, GlobalConfig, HookError, PoolKey, ProtocolLedger,
    VolatilityParams, VolatilitySnapshot, VolatilityTracker, H160, U256,
};
use proptest::prelude::*;

const T0: u64 = 1_700_000_000;

fn owner() -> Address {
    H160::from_low_u64_be(0x01)
}

fn manager() -> Address {
    H160::from_low_u64_be(0x02)
}

fn pool_key() -> PoolKey {
    PoolKey::dynamic(
        H160::from_low_u64_be(0x1000),
        H160::from_low_u64_be(0x2000),
        60,
        H160::from_low_u64_be(0xf00),
    )
}

fn initialized_hook() -> DynamicFeeHook {
    let config = GlobalConfig::new(owner(), manager(), H160::from_low_u64_be(0x03)).unwrap();
    let mut hook = DynamicFeeHook::new(config);
    hook.after_initialize(manager(), &pool_key(), U256::from(1u128 << 96), T0)
        .unwrap();
    hook
}

prop_compose! {
    fn valid_params()
        (ewma_alpha in 1u64..=10_000, volatility_window in 1u64..=86_400, fee_multiplier in 1u64..=1_000_000)
        -> VolatilityParams {
        VolatilityParams { ewma_alpha, volatility_window, fee_multiplier }
    }
}

prop_compose! {
    /// (seconds since last swap, sqrt price in 2^80 units)
    fn swap_step()
        (gap in 0u64..1_000, price in 1u64..1_000_000) -> (u64, U256) {
        (gap, U256::from(price) * U256::from(1u128 << 80))
    }
}

proptest! {
    #[test]
    fn fee_always_within_bounds(volatility in any::<u128>(), multiplier in any::<u64>()) {
        let fee = FeeCurve::compute_fee(volatility, multiplier);
        prop_assert!(fee >= MIN_FEE);
        prop_assert!(fee <= MAX_FEE);
    }

    #[test]
    fn fee_is_monotonic_in_volatility(a in any::<u64>(), b in any::<u64>(), multiplier in 1u64..10_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            FeeCurve::compute_fee(low as u128, multiplier)
                <= FeeCurve::compute_fee(high as u128, multiplier)
        );
    }

    #[test]
    fn invalid_share_never_mutates(share in (MAX_PROTOCOL_SHARE + 1)..u64::MAX) {
        let mut hook = initialized_hook();
        let before = hook.config().clone();

        let result = hook.set_protocol_share(owner(), share);

        prop_assert_eq!(
            result,
            Err(HookError::InvalidProtocolShare { share, max: MAX_PROTOCOL_SHARE })
        );
        prop_assert_eq!(hook.config(), &before);
    }

    #[test]
    fn protocol_cut_never_exceeds_fee(fee in any::<u128>(), share in 0u64..=MAX_PROTOCOL_SHARE) {
        let cut = ProtocolLedger::protocol_cut(fee, share);
        prop_assert!(cut <= fee / 2 + 1);
    }

    #[test]
    fn accrual_is_monotonic(
        steps in prop::collection::vec(swap_step(), 1..20),
        amount_in in 0u64..1_000_000_000,
    ) {
        let mut hook = initialized_hook();
        let token = pool_key().currency0;
        let mut now = T0;
        let mut accrued = 0u128;

        for (gap, price) in steps {
            now += gap;
            let quote = hook.before_swap(manager(), &pool_key(), price, now).unwrap();
            prop_assert!(quote.fee >= MIN_FEE && quote.fee <= MAX_FEE);

            let fee_amount = FeeCurve::fee_amount(amount_in as u128, quote.fee);
            hook.after_swap(manager(), &pool_key(), token, fee_amount).unwrap();

            let next = hook.accrued_protocol_fees(token);
            prop_assert!(next >= accrued);
            accrued = next;
        }
    }

    #[test]
    fn queries_are_idempotent(steps in prop::collection::vec(swap_step(), 0..10)) {
        let mut hook = initialized_hook();
        let pool_id = pool_key().to_id();
        let mut now = T0;

        for (gap, price) in steps {
            now += gap;
            hook.before_swap(manager(), &pool_key(), price, now).unwrap();
            hook.abort_swap(manager(), &pool_key()).unwrap();
        }

        let state = hook.pool_state(&pool_id).cloned();
        let fee = hook.get_current_fee(&pool_id);
        let preview = hook.preview_fee(&pool_id, U256::from(1u128 << 96), now + 1);

        prop_assert_eq!(hook.get_current_fee(&pool_id), fee);
        prop_assert_eq!(hook.preview_fee(&pool_id, U256::from(1u128 << 96), now + 1), preview);
        prop_assert_eq!(hook.pool_state(&pool_id).cloned(), state);
    }

    #[test]
    fn estimate_resets_after_two_windows(params in valid_params(), volatility in any::<u64>()) {
        let prior = VolatilitySnapshot {
            ewma_volatility: volatility as u128,
            last_sqrt_price_x96: U256::from(1u128 << 96),
            last_update: T0,
        };
        let now = T0 + params.volatility_window * 2;

        let next = VolatilityTracker::update(&prior, U256::from(1u128 << 97), now, &params);

        prop_assert_eq!(next.ewma_volatility, 0);
        prop_assert_eq!(next.last_update, now);
    }

    #[test]
    fn blend_stays_between_estimate_and_sample(ewma in any::<u64>(), sample in any::<u64>(), alpha in 0u64..=10_000) {
        let blended = VolatilityTracker::ema_blend(ewma as u128, sample as u128, alpha);
        let (low, high) = if ewma <= sample { (ewma, sample) } else { (sample, ewma) };
        prop_assert!(blended >= low as u128 && blended <= high as u128);
    }
}
