//! Launchpad constants
//!
//! Pallet identifiers and the canonical bonding-curve shape shared by the runtime, the pallet
//! defaults and the test runtime.

/// Balance type alias for consistency across the launchpad
pub type Balance = u128;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// Used with `PalletId::into_account_truncating()` / `into_sub_account_truncating()` to derive
/// the pallet account and the per-token vault and escrow accounts.
pub mod pallet_ids {
  /// Bonding curve pallet ID (token vaults and base-asset escrows)
  pub const BONDING_CURVE_PALLET_ID: &[u8; 8] = b"py/bcurv";
}

/// Canonical curve parameters.
///
/// The curve releases `y(x) = A - K / (C + x)` whole tokens once `x` base units have been
/// deposited. With these values `K = A * C`, so `y(0) = 0` and the full supply is released
/// only asymptotically.
pub mod params {
  use super::Balance;

  /// Decimals of every project token.
  pub const DECIMALS: u8 = 9;

  /// `A`: total whole tokens minted into each vault.
  pub const TOTAL_TOKENS: u64 = 1_073_000_191;

  /// `K`: curvature constant in token * base units.
  pub const VIRTUAL_POOL_OFFSET: u128 = 32_190_005_730 * 1_000_000_000;

  /// `C`: virtual base offset in base units (30 base tokens at 9 decimals).
  pub const BONDING_SCALE_FACTOR: u64 = 30_000_000_000;

  /// Default escrow balance that graduates a token (85 base tokens at 9 decimals).
  pub const GRADUATION_THRESHOLD: u64 = 85_000_000_000;

  /// One whole project token in raw asset units.
  pub const TOKEN_UNIT: Balance = 1_000_000_000;
}
