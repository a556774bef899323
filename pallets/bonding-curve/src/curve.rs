//! Smooth bonding curve math.
//!
//! The curve releases `y(x) = A - K / (C + x)` whole tokens once `x` base units have been
//! deposited. Everything is evaluated through the supply the curve still holds back,
//! `q(x) = floor(K / (C + x))`, so the tokens released between two deposit levels are
//! `q(x1) - q(x2)` and truncation happens exactly once per evaluation.
//!
//! Rounding always favors the vault and the escrow: buyers pay the smallest cost that
//! releases at least what they asked for, sellers receive the largest payout the curve can
//! cover without releasing more than it holds.

use crate::types::CurveParams;
use frame::deps::frame_support::defensive;
use sp_arithmetic::{Rounding, helpers_128bit::multiply_by_rational_with_rounding};

/// Failures of a curve evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveError {
  /// An intermediate value left the working width
  MathOverflow,
  /// The curve cannot release (or take back) the requested amount
  InsufficientTokenSupply,
  /// The curve was evaluated at a zero denominator
  DivisionUndefined,
  /// A parameter is zero or the curve never releases a token
  InvalidParameters,
  /// `K > A * C`: the curve would start above the vault supply
  ExceedsSupply,
  /// `K > C^2`: a single base unit would release more than one token
  TooSteep,
}

fn narrow(value: u128) -> Result<u64, CurveError> {
  u64::try_from(value).map_err(|_| CurveError::MathOverflow)
}

impl CurveParams {
  /// Whole tokens the curve still holds back after `deposited` base units, `q(x)`.
  pub fn remaining_tokens(&self, deposited: u128) -> Result<u128, CurveError> {
    let denominator = (self.c_bonding_scale_factor as u128)
      .checked_add(deposited)
      .ok_or(CurveError::MathOverflow)?;
    self.remaining_at(denominator)
  }

  /// `floor(K / denominator)` where `denominator = C + x`.
  fn remaining_at(&self, denominator: u128) -> Result<u128, CurveError> {
    if denominator == 0 {
      defensive!("bonding curve evaluated at a zero denominator");
      return Err(CurveError::DivisionUndefined);
    }
    Ok(self.k_virtual_pool_offset / denominator)
  }

  /// `y(x)`, the cumulative whole tokens the curve has released at `deposited`.
  pub fn tokens_released(&self, deposited: u128) -> Result<u128, CurveError> {
    (self.a_total_tokens as u128)
      .checked_sub(self.remaining_tokens(deposited)?)
      .ok_or(CurveError::ExceedsSupply)
  }

  /// Whole tokens that left the vault between creation and `deposited`, `y(x) - y(0)`.
  pub fn released_since_creation(&self, deposited: u128) -> Result<u128, CurveError> {
    self
      .remaining_tokens(0)?
      .checked_sub(self.remaining_tokens(deposited)?)
      .ok_or(CurveError::MathOverflow)
  }

  /// Tokens released by depositing `base_in` on top of `deposited`.
  pub fn tokens_out_for_base_in(&self, deposited: u128, base_in: u64) -> Result<u64, CurveError> {
    let after = deposited
      .checked_add(base_in as u128)
      .ok_or(CurveError::MathOverflow)?;
    let released = self
      .remaining_tokens(deposited)?
      .checked_sub(self.remaining_tokens(after)?)
      .ok_or(CurveError::MathOverflow)?;
    narrow(released)
  }

  /// Smallest deposit on top of `deposited` that releases at least `tokens_out`.
  ///
  /// Solves `C + x_after = K / (q(x) - tokens_out)` and rounds `x_after` up until the
  /// forward evaluation holds back no more than the target. The curve never releases its
  /// last whole token, so asking for everything it holds back fails.
  pub fn base_in_for_tokens_out(
    &self,
    deposited: u128,
    tokens_out: u64,
  ) -> Result<u64, CurveError> {
    if tokens_out == 0 {
      return Ok(0);
    }
    let remaining = self.remaining_tokens(deposited)?;
    let target = remaining
      .checked_sub(tokens_out as u128)
      .filter(|target| *target > 0)
      .ok_or(CurveError::InsufficientTokenSupply)?;

    // `target < remaining`, so `target + 1` cannot overflow.
    let mut denominator = self.k_virtual_pool_offset / (target + 1);
    if self.remaining_at(denominator)? > target {
      denominator = denominator
        .checked_add(1)
        .ok_or(CurveError::MathOverflow)?;
    }

    let base_in = denominator
      .checked_sub(self.c_bonding_scale_factor as u128)
      .and_then(|after| after.checked_sub(deposited))
      .ok_or(CurveError::MathOverflow)?;
    narrow(base_in)
  }

  /// Base units paid out for returning `tokens_in` to the curve at `deposited`.
  ///
  /// The curve moves back to the largest deposit level that holds back at least
  /// `q(x) + tokens_in`; the payout is the distance to it, which truncates the payout down.
  pub fn base_out_for_tokens_in(&self, deposited: u128, tokens_in: u64) -> Result<u64, CurveError> {
    if tokens_in == 0 {
      return Ok(0);
    }
    let held_back = self
      .remaining_tokens(deposited)?
      .checked_add(tokens_in as u128)
      .ok_or(CurveError::MathOverflow)?;
    let after = self.deposit_level_holding(held_back)?;
    let base_out = deposited
      .checked_sub(after)
      .ok_or(CurveError::MathOverflow)?;
    narrow(base_out)
  }

  /// Fewest tokens to return at `deposited` for a payout of at least `base_out`.
  ///
  /// Returns the token amount and the payout it actually earns, which can exceed
  /// `base_out` when several base units map onto the same whole token.
  pub fn tokens_in_for_base_out(
    &self,
    deposited: u128,
    base_out: u64,
  ) -> Result<(u64, u64), CurveError> {
    if base_out == 0 {
      return Ok((0, 0));
    }
    let floor_level = deposited
      .checked_sub(base_out as u128)
      .ok_or(CurveError::InsufficientTokenSupply)?;
    // Smallest held-back amount whose deposit level does not exceed `floor_level`.
    let denominator = (self.c_bonding_scale_factor as u128)
      .checked_add(floor_level)
      .and_then(|d| d.checked_add(1))
      .ok_or(CurveError::MathOverflow)?;
    let held_back = self
      .remaining_at(denominator)?
      .checked_add(1)
      .ok_or(CurveError::MathOverflow)?;
    let tokens_in = narrow(
      held_back
        .checked_sub(self.remaining_tokens(deposited)?)
        .ok_or(CurveError::MathOverflow)?,
    )?;
    let paid = self.base_out_for_tokens_in(deposited, tokens_in)?;
    Ok((tokens_in, paid))
  }

  /// Largest deposit level `x` with `q(x) >= held_back`.
  fn deposit_level_holding(&self, held_back: u128) -> Result<u128, CurveError> {
    (self.k_virtual_pool_offset / held_back.max(1))
      .checked_sub(self.c_bonding_scale_factor as u128)
      .ok_or(CurveError::InsufficientTokenSupply)
  }

  /// Marginal price of one whole token at `deposited`, `(C + x)^2 / K` base units, rounded up.
  pub fn spot_price(&self, deposited: u128) -> Result<u128, CurveError> {
    let denominator = (self.c_bonding_scale_factor as u128)
      .checked_add(deposited)
      .ok_or(CurveError::MathOverflow)?;
    if self.k_virtual_pool_offset == 0 {
      return Err(CurveError::DivisionUndefined);
    }
    multiply_by_rational_with_rounding(
      denominator,
      denominator,
      self.k_virtual_pool_offset,
      Rounding::Up,
    )
    .ok_or(CurveError::MathOverflow)
  }
}
