//! Trade settlement.
//!
//! Prices a trade against a snapshot of the token state and the four balances it touches,
//! runs every check the trade has to pass, and returns the exact deltas to apply. Nothing
//! here mutates state, so a failed check leaves no trace.

use crate::{
  curve::CurveError,
  types::{Balance, TokenState, TradeKind},
};

/// Reasons a trade is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementError {
  Curve(CurveError),
  /// The fixed side of the trade is zero
  ZeroAmount,
  /// The counter-amount violates the trader's bound
  SlippageExceeded,
  /// The vault cannot cover the tokens bought
  InsufficientTokenVaultBalance,
  /// The escrow cannot cover the base paid out
  InsufficientEscrowBalance,
  /// The trader cannot cover the base paid in
  InsufficientBaseBalance,
  /// The trader cannot cover the tokens sold
  InsufficientTokenBalance,
  /// Curve trading is closed for this token
  TokenIsGraduated,
}

impl From<CurveError> for SettlementError {
  fn from(error: CurveError) -> Self {
    SettlementError::Curve(error)
  }
}

/// Raw balances read before settling a trade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserves {
  /// Project tokens held by the vault
  pub vault_tokens: Balance,
  /// Base units held by the escrow
  pub escrow_base: Balance,
  /// Project tokens the trader can spend
  pub trader_tokens: Balance,
  /// Base units the trader can spend
  pub trader_base: Balance,
  /// Smallest nonzero balance the base asset store keeps alive
  pub base_minimum: Balance,
}

/// Deltas of a trade that passed every check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
  pub kind: TradeKind,
  /// Base units moved between trader and escrow
  pub base_amount: u64,
  /// Whole tokens moved between vault and trader
  pub tokens: u64,
  /// `tokens` in raw asset units
  pub token_amount: Balance,
  /// Cumulative deposits once the trade is applied
  pub deposited_after: u128,
}

/// Settle `amount` on the fixed side of `kind`, bounded by `limit` on the other side.
pub fn settle<AccountId>(
  state: &TokenState<AccountId>,
  reserves: Reserves,
  token_unit: Balance,
  kind: TradeKind,
  amount: u64,
  limit: u64,
) -> Result<Settlement, SettlementError> {
  if state.is_graduated {
    return Err(SettlementError::TokenIsGraduated);
  }
  if amount == 0 {
    return Err(SettlementError::ZeroAmount);
  }
  match kind {
    TradeKind::BuyExactIn => buy_exact_input(state, reserves, token_unit, amount, limit),
    TradeKind::BuyExactOut => buy_exact_output(state, reserves, token_unit, amount, limit),
    TradeKind::SellExactIn => sell_exact_input(state, reserves, token_unit, amount, limit),
    TradeKind::SellExactOut => sell_exact_output(state, reserves, token_unit, amount, limit),
  }
}

fn buy_exact_input<AccountId>(
  state: &TokenState<AccountId>,
  reserves: Reserves,
  token_unit: Balance,
  base_in: u64,
  min_tokens_out: u64,
) -> Result<Settlement, SettlementError> {
  let deposited = state.cumulative_base_deposited;
  let tokens_out = state
    .curve_params
    .tokens_out_for_base_in(deposited, base_in)?;
  if tokens_out < min_tokens_out {
    return Err(SettlementError::SlippageExceeded);
  }
  buy(
    reserves,
    token_unit,
    TradeKind::BuyExactIn,
    deposited,
    base_in,
    tokens_out,
  )
}

fn buy_exact_output<AccountId>(
  state: &TokenState<AccountId>,
  reserves: Reserves,
  token_unit: Balance,
  tokens_out: u64,
  max_base_in: u64,
) -> Result<Settlement, SettlementError> {
  let deposited = state.cumulative_base_deposited;
  let base_in = state
    .curve_params
    .base_in_for_tokens_out(deposited, tokens_out)?;
  if base_in > max_base_in {
    return Err(SettlementError::SlippageExceeded);
  }
  buy(
    reserves,
    token_unit,
    TradeKind::BuyExactOut,
    deposited,
    base_in,
    tokens_out,
  )
}

fn buy(
  reserves: Reserves,
  token_unit: Balance,
  kind: TradeKind,
  deposited: u128,
  base_in: u64,
  tokens_out: u64,
) -> Result<Settlement, SettlementError> {
  let token_amount = scale(tokens_out, token_unit)?;
  if token_amount > reserves.vault_tokens {
    return Err(SettlementError::InsufficientTokenVaultBalance);
  }
  if base_in as u128 > reserves.trader_base {
    return Err(SettlementError::InsufficientBaseBalance);
  }
  // An escrow below the store's minimum would be refused or reaped.
  let escrow_after = reserves.escrow_base.saturating_add(base_in as u128);
  if escrow_after < reserves.base_minimum {
    return Err(SettlementError::InsufficientEscrowBalance);
  }
  let deposited_after = deposited
    .checked_add(base_in as u128)
    .ok_or(CurveError::MathOverflow)?;
  Ok(Settlement {
    kind,
    base_amount: base_in,
    tokens: tokens_out,
    token_amount,
    deposited_after,
  })
}

fn sell_exact_input<AccountId>(
  state: &TokenState<AccountId>,
  reserves: Reserves,
  token_unit: Balance,
  tokens_in: u64,
  min_base_out: u64,
) -> Result<Settlement, SettlementError> {
  let deposited = state.cumulative_base_deposited;
  let base_out = state
    .curve_params
    .base_out_for_tokens_in(deposited, tokens_in)?;
  if base_out < min_base_out {
    return Err(SettlementError::SlippageExceeded);
  }
  sell(
    reserves,
    token_unit,
    TradeKind::SellExactIn,
    deposited,
    base_out,
    tokens_in,
  )
}

fn sell_exact_output<AccountId>(
  state: &TokenState<AccountId>,
  reserves: Reserves,
  token_unit: Balance,
  base_out: u64,
  max_tokens_in: u64,
) -> Result<Settlement, SettlementError> {
  let deposited = state.cumulative_base_deposited;
  let (tokens_in, paid) = state
    .curve_params
    .tokens_in_for_base_out(deposited, base_out)?;
  if tokens_in > max_tokens_in {
    return Err(SettlementError::SlippageExceeded);
  }
  sell(
    reserves,
    token_unit,
    TradeKind::SellExactOut,
    deposited,
    paid,
    tokens_in,
  )
}

fn sell(
  reserves: Reserves,
  token_unit: Balance,
  kind: TradeKind,
  deposited: u128,
  base_out: u64,
  tokens_in: u64,
) -> Result<Settlement, SettlementError> {
  let escrow_after = reserves
    .escrow_base
    .checked_sub(base_out as u128)
    .ok_or(SettlementError::InsufficientEscrowBalance)?;
  // Dust left under the minimum would be reaped while `x` still counts it.
  if escrow_after != 0 && escrow_after < reserves.base_minimum {
    return Err(SettlementError::InsufficientEscrowBalance);
  }
  let token_amount = scale(tokens_in, token_unit)?;
  if token_amount > reserves.trader_tokens {
    return Err(SettlementError::InsufficientTokenBalance);
  }
  // `x` moves by the base actually released, never by the token count.
  let deposited_after = deposited
    .checked_sub(base_out as u128)
    .ok_or(CurveError::MathOverflow)?;
  Ok(Settlement {
    kind,
    base_amount: base_out,
    tokens: tokens_in,
    token_amount,
    deposited_after,
  })
}

fn scale(tokens: u64, token_unit: Balance) -> Result<Balance, CurveError> {
  (tokens as u128)
    .checked_mul(token_unit)
    .ok_or(CurveError::MathOverflow)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::CurveParams;
  use primitives::{AssetKind, params::TOKEN_UNIT};

  const BASE_UNIT: u64 = 1_000_000_000;

  fn fresh_state() -> TokenState<u64> {
    TokenState::new(
      7,
      1,
      2,
      3,
      CurveParams::default(),
      AssetKind::Local(1),
    )
  }

  fn full_reserves() -> Reserves {
    Reserves {
      vault_tokens: CurveParams::default().total_supply(TOKEN_UNIT).unwrap(),
      escrow_base: 0,
      trader_tokens: 0,
      trader_base: 1_000 * BASE_UNIT as u128,
      base_minimum: 1,
    }
  }

  fn apply(state: &mut TokenState<u64>, reserves: &mut Reserves, settlement: &Settlement) {
    state.cumulative_base_deposited = settlement.deposited_after;
    if settlement.kind.is_buy() {
      reserves.vault_tokens -= settlement.token_amount;
      reserves.trader_tokens += settlement.token_amount;
      reserves.escrow_base += settlement.base_amount as u128;
      reserves.trader_base -= settlement.base_amount as u128;
    } else {
      reserves.vault_tokens += settlement.token_amount;
      reserves.trader_tokens -= settlement.token_amount;
      reserves.escrow_base -= settlement.base_amount as u128;
      reserves.trader_base += settlement.base_amount as u128;
    }
  }

  #[test]
  fn buy_exact_input_settles_curve_amount() {
    let state = fresh_state();
    let settlement = settle(
      &state,
      full_reserves(),
      TOKEN_UNIT,
      TradeKind::BuyExactIn,
      10 * BASE_UNIT,
      0,
    )
    .unwrap();
    assert_eq!(settlement.tokens, 268_250_048);
    assert_eq!(settlement.token_amount, 268_250_048 * TOKEN_UNIT);
    assert_eq!(settlement.base_amount, 10 * BASE_UNIT);
    assert_eq!(settlement.deposited_after, 10 * BASE_UNIT as u128);
  }

  #[test]
  fn zero_budget_never_covers_a_purchase() {
    let state = fresh_state();
    assert_eq!(
      settle(&state, full_reserves(), TOKEN_UNIT, TradeKind::BuyExactOut, 10, 0),
      Err(SettlementError::SlippageExceeded)
    );
  }

  #[test]
  fn graduated_token_refuses_every_trade() {
    let mut state = fresh_state();
    state.is_graduated = true;
    for kind in [
      TradeKind::BuyExactIn,
      TradeKind::BuyExactOut,
      TradeKind::SellExactIn,
      TradeKind::SellExactOut,
    ] {
      assert_eq!(
        settle(&state, full_reserves(), TOKEN_UNIT, kind, 1, kind.unbounded_limit()),
        Err(SettlementError::TokenIsGraduated)
      );
    }
  }

  #[test]
  fn zero_amounts_are_refused() {
    let state = fresh_state();
    assert_eq!(
      settle(&state, full_reserves(), TOKEN_UNIT, TradeKind::SellExactIn, 0, 0),
      Err(SettlementError::ZeroAmount)
    );
  }

  #[test]
  fn slippage_is_checked_before_vault_cover() {
    let state = fresh_state();
    let reserves = Reserves {
      vault_tokens: 0,
      ..full_reserves()
    };
    assert_eq!(
      settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, BASE_UNIT, u64::MAX),
      Err(SettlementError::SlippageExceeded)
    );
    assert_eq!(
      settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, BASE_UNIT, 0),
      Err(SettlementError::InsufficientTokenVaultBalance)
    );
  }

  #[test]
  fn buyer_must_cover_the_cost() {
    let state = fresh_state();
    let reserves = Reserves {
      trader_base: BASE_UNIT as u128 - 1,
      ..full_reserves()
    };
    assert_eq!(
      settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, BASE_UNIT, 0),
      Err(SettlementError::InsufficientBaseBalance)
    );
  }

  #[test]
  fn sell_checks_escrow_then_holdings() {
    let mut state = fresh_state();
    let mut reserves = full_reserves();
    let bought = settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, BASE_UNIT, 0).unwrap();
    apply(&mut state, &mut reserves, &bought);

    let drained = Reserves {
      escrow_base: 0,
      ..reserves
    };
    assert_eq!(
      settle(&state, drained, TOKEN_UNIT, TradeKind::SellExactIn, bought.tokens, 0),
      Err(SettlementError::InsufficientEscrowBalance)
    );

    let empty_handed = Reserves {
      trader_tokens: 0,
      ..reserves
    };
    assert_eq!(
      settle(&state, empty_handed, TOKEN_UNIT, TradeKind::SellExactIn, bought.tokens, 0),
      Err(SettlementError::InsufficientTokenBalance)
    );
  }

  #[test]
  fn sell_exact_output_pays_at_least_the_request() {
    let mut state = fresh_state();
    let mut reserves = full_reserves();
    let bought = settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, 5 * BASE_UNIT, 0).unwrap();
    apply(&mut state, &mut reserves, &bought);

    let sold = settle(
      &state,
      reserves,
      TOKEN_UNIT,
      TradeKind::SellExactOut,
      BASE_UNIT,
      u64::MAX,
    )
    .unwrap();
    assert!(sold.base_amount >= BASE_UNIT);
    assert_eq!(
      sold.deposited_after,
      state.cumulative_base_deposited - sold.base_amount as u128
    );
    assert_eq!(
      settle(
        &state,
        reserves,
        TOKEN_UNIT,
        TradeKind::SellExactOut,
        BASE_UNIT,
        sold.tokens - 1
      ),
      Err(SettlementError::SlippageExceeded)
    );
  }

  #[test]
  fn mixed_sequence_conserves_supply_and_deposits() {
    let mut state = fresh_state();
    let mut reserves = full_reserves();
    let supply = reserves.vault_tokens;
    let trades = [
      (TradeKind::BuyExactIn, 3 * BASE_UNIT),
      (TradeKind::BuyExactOut, 12_345_678),
      (TradeKind::SellExactIn, 40_000_000),
      (TradeKind::SellExactOut, BASE_UNIT / 3),
      (TradeKind::BuyExactIn, 777),
      (TradeKind::SellExactIn, 1),
      (TradeKind::BuyExactOut, 1),
    ];
    for (kind, amount) in trades {
      let settlement = settle(
        &state,
        reserves,
        TOKEN_UNIT,
        kind,
        amount,
        kind.unbounded_limit(),
      )
      .unwrap();
      apply(&mut state, &mut reserves, &settlement);

      let released = state
        .curve_params
        .released_since_creation(state.cumulative_base_deposited)
        .unwrap();
      assert_eq!(reserves.vault_tokens + reserves.trader_tokens, supply);
      assert_eq!(reserves.vault_tokens, supply - released * TOKEN_UNIT);
      assert_eq!(reserves.escrow_base, state.cumulative_base_deposited);
    }
  }

  #[test]
  fn first_deposit_must_reach_the_base_minimum() {
    let state = fresh_state();
    let reserves = Reserves {
      base_minimum: 1_000,
      ..full_reserves()
    };
    assert_eq!(
      settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, 999, 0),
      Err(SettlementError::InsufficientEscrowBalance)
    );
    assert!(settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, 1_000, 0).is_ok());
  }

  #[test]
  fn sell_never_leaves_escrow_dust() {
    let mut state = fresh_state();
    let mut reserves = Reserves {
      base_minimum: 1_000,
      ..full_reserves()
    };
    let bought = settle(&state, reserves, TOKEN_UNIT, TradeKind::BuyExactIn, 10_000, 0).unwrap();
    apply(&mut state, &mut reserves, &bought);

    let curve = state.curve_params;
    let x = state.cumulative_base_deposited;
    let rest = |tokens: u64| x - curve.base_out_for_tokens_in(x, tokens).unwrap() as u128;
    let dusty = (1..=bought.tokens)
      .find(|tokens| rest(*tokens) > 0 && rest(*tokens) < 1_000)
      .unwrap();
    assert_eq!(
      settle(&state, reserves, TOKEN_UNIT, TradeKind::SellExactIn, dusty, 0),
      Err(SettlementError::InsufficientEscrowBalance)
    );

    let sold = settle(&state, reserves, TOKEN_UNIT, TradeKind::SellExactIn, dusty - 1, 0).unwrap();
    apply(&mut state, &mut reserves, &sold);
    assert!(reserves.escrow_base >= 1_000);
    assert_eq!(reserves.escrow_base, state.cumulative_base_deposited);
  }
}
