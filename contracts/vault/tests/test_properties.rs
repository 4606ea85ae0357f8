//! Property tests for vault accounting
//!
//! Random sequences of deposits, mints, withdrawals, redemptions, share
//! transfers and yield events, checked after every step:
//! - Conservation: share balances sum to the share supply
//! - Custody: total assets equal the vault account's asset balance
//! - Backing: outstanding shares never claim more than the vault holds
//! - Atomicity: a rejected operation leaves every balance untouched
//! - Share price never decreases while shares are outstanding

mod helpers;

use helpers::test_builder::*;
use helpers::*;
use proptest::prelude::*;
use vault::vault_standards::mul_div;
use vault::{Rounding, VaultCore};

const HOLDERS: [&str; 3] = ["alice.test", "bob.test", "carol.test"];
const STRATEGY: &str = "strategy.test";
const FUNDING: u128 = 1_000_000;

#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, u128),
    Mint(usize, u128),
    Withdraw(usize, u128),
    Redeem(usize, u128),
    Transfer(usize, usize, u128),
    Yield(u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let holder = 0..HOLDERS.len();
    let amount = 0u128..5_000;
    prop_oneof![
        (holder.clone(), amount.clone()).prop_map(|(h, a)| Op::Deposit(h, a)),
        (holder.clone(), amount.clone()).prop_map(|(h, a)| Op::Mint(h, a)),
        (holder.clone(), amount.clone()).prop_map(|(h, a)| Op::Withdraw(h, a)),
        (holder.clone(), amount.clone()).prop_map(|(h, a)| Op::Redeem(h, a)),
        (holder.clone(), holder, amount.clone()).prop_map(|(f, t, a)| Op::Transfer(f, t, a)),
        (0u128..2_000).prop_map(Op::Yield),
    ]
}

#[derive(Debug, PartialEq, Eq)]
struct Snapshot {
    shares: Vec<u128>,
    assets: Vec<u128>,
    total_supply: u128,
    total_assets: u128,
}

fn snapshot(scenario: &TestScenario) -> Snapshot {
    Snapshot {
        shares: HOLDERS.iter().map(|h| scenario.shares_of(h)).collect(),
        assets: HOLDERS.iter().map(|h| scenario.asset_balance(h)).collect(),
        total_supply: scenario.total_supply(),
        total_assets: scenario.total_assets(),
    }
}

fn apply(scenario: &mut TestScenario, op: &Op) -> vault::Result<()> {
    match *op {
        Op::Deposit(h, amount) => scenario.deposit(HOLDERS[h], amount).map(drop),
        Op::Mint(h, amount) => scenario.mint(HOLDERS[h], amount).map(drop),
        Op::Withdraw(h, amount) => scenario.withdraw(HOLDERS[h], amount).map(drop),
        Op::Redeem(h, amount) => scenario.redeem(HOLDERS[h], amount).map(drop),
        Op::Transfer(from, to, amount) => scenario.vault.share_transfer(
            &account(HOLDERS[from]),
            &account(HOLDERS[to]),
            amount,
            None,
        ),
        Op::Yield(amount) => {
            if amount > 0 {
                scenario.accrue_yield(STRATEGY, amount);
            }
            Ok(())
        }
    }
}

fn build_scenario(extra_decimals: u8) -> TestScenario {
    let mut builder = TestScenarioBuilder::new()
        .extra_decimals(extra_decimals)
        .fund(STRATEGY, FUNDING);
    for holder in HOLDERS {
        builder = builder.fund(holder, FUNDING);
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: accounting invariants hold after any operation sequence
    #[test]
    fn vault_invariants_hold(
        extra_decimals in 0u8..=3,
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let mut scenario = build_scenario(extra_decimals);
        let asset_supply = scenario.asset.borrow().total_supply();

        for op in &ops {
            let before = snapshot(&scenario);
            let result = apply(&mut scenario, op);
            let after = snapshot(&scenario);

            if result.is_err() && !matches!(op, Op::Yield(_)) {
                prop_assert_eq!(&before, &after, "rejected {:?} changed state", op);
            }

            // Conservation
            let held: u128 = after.shares.iter().sum();
            prop_assert_eq!(held, after.total_supply);
            prop_assert_eq!(scenario.asset.borrow().total_supply(), asset_supply);

            // Custody
            prop_assert_eq!(
                after.total_assets,
                scenario.asset.borrow().balance_of(&account(VAULT))
            );

            // Backing
            let claimed = scenario.vault.convert_to_assets(after.total_supply).unwrap();
            prop_assert!(claimed <= after.total_assets);

            // Price: after.assets / after.supply >= before.assets / before.supply
            if before.total_supply > 0 && after.total_supply > 0 {
                prop_assert!(
                    after.total_assets * before.total_supply
                        >= before.total_assets * after.total_supply,
                    "share price fell on {:?}", op
                );
            }
        }
    }

    /// Property: previews that charge the caller never undercut the plain conversion
    #[test]
    fn previews_round_against_the_caller(
        seed_deposit in 1u128..100_000,
        yield_amount in 0u128..100_000,
        amount in 0u128..1_000_000
    ) {
        let mut scenario = build_scenario(0);
        scenario.deposit("alice.test", seed_deposit).unwrap();
        if yield_amount > 0 {
            scenario.accrue_yield(STRATEGY, yield_amount);
        }

        let vault = &scenario.vault;
        let shares_down = vault.convert_to_shares(amount).unwrap();
        let shares_up = vault.preview_withdraw(amount).unwrap();
        prop_assert!(shares_up >= shares_down && shares_up - shares_down <= 1);

        let assets_down = vault.convert_to_assets(amount).unwrap();
        let assets_up = vault.preview_mint(amount).unwrap();
        prop_assert!(assets_up >= assets_down && assets_up - assets_down <= 1);

        // A deposit followed by an immediate redeem never returns more
        let redeemed = vault.preview_redeem(vault.preview_deposit(amount).unwrap()).unwrap();
        prop_assert!(redeemed <= amount);
    }

    /// Property: rounding up differs from rounding down only by a remainder
    #[test]
    fn mul_div_rounding_brackets_exact_quotient(
        x in any::<u64>(),
        y in any::<u64>(),
        d in 1u64..=u64::MAX
    ) {
        let (x, y, d) = (x as u128, y as u128, d as u128);
        let down = mul_div(x, y, d, Rounding::Down).unwrap();
        let up = mul_div(x, y, d, Rounding::Up).unwrap();

        prop_assert_eq!(down, x * y / d);
        let exact = (x * y) % d == 0;
        prop_assert_eq!(up, if exact { down } else { down + 1 });
    }
}
