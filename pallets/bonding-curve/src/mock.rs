extern crate alloc;

use crate as pallet_bonding_curve;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl, parameter_types,
  traits::{ConstU8, ConstU32, ConstU128, Get},
};
use polkadot_sdk::frame_system::{self, EnsureRoot};
use polkadot_sdk::sp_runtime::{
  AccountId32, BuildStorage,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  AssetKind,
  params::{DECIMALS, TOKEN_UNIT},
};

pub type AccountId = AccountId32;

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    BondingCurve: pallet_bonding_curve,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

parameter_types! {
  pub static ExistentialDeposit: u128 = 1;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ExistentialDeposit;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

pub struct BondingCurvePalletId;
impl Get<PalletId> for BondingCurvePalletId {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::BONDING_CURVE_PALLET_ID)
  }
}

impl pallet_bonding_curve::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type AdminOrigin = EnsureRoot<AccountId>;
  type PalletId = BondingCurvePalletId;
  type TokenDecimals = ConstU8<DECIMALS>;
  type WeightInfo = ();
}

pub const ADMIN: AccountId = AccountId32::new([1u8; 32]);
pub const ALICE: AccountId = AccountId32::new([2u8; 32]);
pub const BOB: AccountId = AccountId32::new([3u8; 32]);
pub const CHARLIE: AccountId = AccountId32::new([4u8; 32]);

/// One whole base token (9 decimals)
pub const BASE_UNIT: u64 = 1_000_000_000;

/// pallet-assets id of the base asset used by most tests
pub const BASE_ASSET_ID: u32 = 1;
pub const BASE_ASSET: AssetKind = AssetKind::Local(BASE_ASSET_ID);

/// Base asset whose accounts are reaped below `DUSTY_MIN_BALANCE`
pub const DUSTY_ASSET_ID: u32 = 2;
pub const DUSTY_MIN_BALANCE: u128 = 1_000;

/// Token ids used by the tests; none exist at genesis
pub const TOKEN: u32 = 100;
pub const OTHER_TOKEN: u32 = 101;

/// Default threshold, high enough that ordinary tests never graduate
pub const GRADUATION_THRESHOLD: u64 = primitives::params::GRADUATION_THRESHOLD;

/// Low threshold for graduation tests
pub const LOW_THRESHOLD: u64 = 2_000_000;

/// Base endowment of every trader, native and `BASE_ASSET`
pub const INITIAL_BASE: u128 = 1_000 * BASE_UNIT as u128;

/// Raw units of one whole project token
pub const UNIT: u128 = TOKEN_UNIT;

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: alloc::vec![
      (ADMIN, INITIAL_BASE),
      (ALICE, INITIAL_BASE),
      (BOB, INITIAL_BASE),
      (CHARLIE, INITIAL_BASE),
    ],
    dev_accounts: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: alloc::vec![
      (BASE_ASSET_ID, ADMIN, true, 1),
      (DUSTY_ASSET_ID, ADMIN, true, DUSTY_MIN_BALANCE),
    ],
    metadata: alloc::vec![],
    accounts: alloc::vec![
      (BASE_ASSET_ID, ALICE, INITIAL_BASE),
      (BASE_ASSET_ID, BOB, INITIAL_BASE),
      (BASE_ASSET_ID, CHARLIE, INITIAL_BASE),
      (DUSTY_ASSET_ID, ALICE, INITIAL_BASE),
      (DUSTY_ASSET_ID, BOB, INITIAL_BASE),
      (DUSTY_ASSET_ID, CHARLIE, INITIAL_BASE),
    ],
    reserves: alloc::vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_bonding_curve::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();

  let mut ext = polkadot_sdk::sp_io::TestExternalities::new(t);
  ext.execute_with(|| System::set_block_number(1));
  ext
}

/// Test externalities with a native existential deposit of `existential_deposit`.
pub fn new_test_ext_with_existential_deposit(
  existential_deposit: u128,
) -> polkadot_sdk::sp_io::TestExternalities {
  ExistentialDeposit::set(existential_deposit);
  new_test_ext()
}

/// Initialize the launchpad with the canonical curve, `BASE_ASSET` payments and
/// `GRADUATION_THRESHOLD`.
pub fn init_core() {
  init_core_with(GRADUATION_THRESHOLD, BASE_ASSET);
}

pub fn init_core_with(graduation_threshold: u64, base_asset: AssetKind) {
  BondingCurve::initialize_core(
    RuntimeOrigin::root(),
    ADMIN,
    graduation_threshold,
    crate::CurveParams::default(),
    base_asset,
  )
  .unwrap();
}

/// Launchpad plus one token created by ALICE without an initial buy.
pub fn new_launch_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut ext = new_test_ext();
  ext.execute_with(|| {
    init_core();
    BondingCurve::create_token(RuntimeOrigin::signed(ALICE), TOKEN, None, None).unwrap();
  });
  ext
}
