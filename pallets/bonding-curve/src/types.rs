//! Persistent records of the launchpad and their validation predicates.

use crate::curve::CurveError;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use primitives::{AssetKind, params};
use scale_info::TypeInfo;

pub use primitives::Balance;

/// `pallet-assets` id of a project token
pub type TokenId = u32;

/// Shape of a smooth bonding curve `y(x) = A - K / (C + x)`.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub struct CurveParams {
  /// `A`: whole tokens the vault holds at creation
  pub a_total_tokens: u64,
  /// `K`: curvature constant in token * base units
  pub k_virtual_pool_offset: u128,
  /// `C`: virtual base offset added to deposits
  pub c_bonding_scale_factor: u64,
}

impl Default for CurveParams {
  fn default() -> Self {
    Self {
      a_total_tokens: params::TOTAL_TOKENS,
      k_virtual_pool_offset: params::VIRTUAL_POOL_OFFSET,
      c_bonding_scale_factor: params::BONDING_SCALE_FACTOR,
    }
  }
}

impl CurveParams {
  /// Check that the curve is well formed.
  ///
  /// Beyond positivity the curve must not promise more than the vault holds at zero deposits
  /// (`K <= A * C`), must release at least one token (`K >= C`) and must release at most one
  /// token per base unit (`K <= C^2`). The last bound keeps every integer supply level
  /// reachable, which makes the inverse operations land exactly on the requested amounts.
  pub fn validate(&self) -> Result<(), CurveError> {
    let a = self.a_total_tokens as u128;
    let k = self.k_virtual_pool_offset;
    let c = self.c_bonding_scale_factor as u128;

    if a == 0 || k == 0 || c == 0 || k < c {
      return Err(CurveError::InvalidParameters);
    }
    // Both products fit: each factor is at most 64 bits wide.
    if k > a * c {
      return Err(CurveError::ExceedsSupply);
    }
    if k > c * c {
      return Err(CurveError::TooSteep);
    }
    Ok(())
  }

  /// Full vault supply in raw asset units.
  pub fn total_supply(&self, token_unit: Balance) -> Result<Balance, CurveError> {
    (self.a_total_tokens as u128)
      .checked_mul(token_unit)
      .ok_or(CurveError::MathOverflow)
  }
}

/// Deployment-wide configuration.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo,
)]
pub struct CoreConfig<AccountId> {
  /// Account allowed to reconfigure the launchpad and drain graduated tokens
  pub admin: AccountId,
  /// Escrow balance, in raw base units, at which a token graduates
  pub graduation_threshold: u64,
  /// Curve applied to tokens created without explicit parameters
  pub curve_params: CurveParams,
  /// Asset accepted as payment by newly created tokens
  pub accepted_base_asset: AssetKind,
}

/// Partial update of [`CoreConfig`]; `None` keeps the current value.
#[derive(Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo)]
pub struct CoreConfigUpdate<AccountId> {
  pub admin: Option<AccountId>,
  pub graduation_threshold: Option<u64>,
  pub curve_params: Option<CurveParams>,
  pub accepted_base_asset: Option<AssetKind>,
}

impl<AccountId> Default for CoreConfigUpdate<AccountId> {
  fn default() -> Self {
    Self {
      admin: None,
      graduation_threshold: None,
      curve_params: None,
      accepted_base_asset: None,
    }
  }
}

/// Per-token curve state.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo,
)]
pub struct TokenState<AccountId> {
  /// Curve trading disabled; never reset once set
  pub is_graduated: bool,
  /// Admin drained vault and escrow after graduation
  pub liquidity_withdrawn: bool,
  /// Project token asset id
  pub mint: TokenId,
  /// Holder of the unsold supply
  pub vault: AccountId,
  /// Holder of the base deposits backing the curve
  pub escrow: AccountId,
  pub creator: AccountId,
  /// Net base units deposited through buys minus base units paid out by sells (`x`)
  pub cumulative_base_deposited: u128,
  /// Curve snapshot taken at creation
  pub curve_params: CurveParams,
  /// Payment asset snapshot taken at creation
  pub base_asset: AssetKind,
}

impl<AccountId> TokenState<AccountId> {
  pub fn new(
    mint: TokenId,
    vault: AccountId,
    escrow: AccountId,
    creator: AccountId,
    curve_params: CurveParams,
    base_asset: AssetKind,
  ) -> Self {
    Self {
      is_graduated: false,
      liquidity_withdrawn: false,
      mint,
      vault,
      escrow,
      creator,
      cumulative_base_deposited: 0,
      curve_params,
      base_asset,
    }
  }
}

/// Direction and fixed side of a curve trade.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum TradeKind {
  /// Exact base in, at least `min` tokens out
  BuyExactIn,
  /// Exact tokens out, at most `max` base in
  BuyExactOut,
  /// Exact tokens in, at least `min` base out
  SellExactIn,
  /// Exact base out, at most `max` tokens in
  SellExactOut,
}

impl TradeKind {
  pub fn is_buy(&self) -> bool {
    matches!(self, TradeKind::BuyExactIn | TradeKind::BuyExactOut)
  }

  /// Slippage bound that accepts any outcome.
  pub fn unbounded_limit(&self) -> u64 {
    match self {
      TradeKind::BuyExactIn | TradeKind::SellExactIn => 0,
      TradeKind::BuyExactOut | TradeKind::SellExactOut => u64::MAX,
    }
  }
}
