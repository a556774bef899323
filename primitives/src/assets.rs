use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Identity of a fungible asset the launchpad can move.
///
/// - `Native`: the chain's native currency (managed by pallet-balances).
/// - `Local(u32)` / `Foreign(u32)`: assets managed by pallet-assets.
///
/// Project tokens are always `pallet-assets` ids; the base (payment) asset may be any kind.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetKind {
  /// Native token managed by pallet-balances
  #[default]
  Native,
  /// Local asset managed by pallet-assets
  Local(u32),
  /// Foreign asset managed by pallet-assets under an XCM mapping
  Foreign(u32),
}

impl AssetKind {
  /// The `pallet-assets` id backing this asset, `None` for the native currency.
  pub fn asset_id(&self) -> Option<u32> {
    match self {
      AssetKind::Native => None,
      AssetKind::Local(id) | AssetKind::Foreign(id) => Some(*id),
    }
  }
}

impl From<u32> for AssetKind {
  fn from(asset_id: u32) -> Self {
    AssetKind::Local(asset_id)
  }
}
