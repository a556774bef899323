#![cfg(feature = "runtime-benchmarks")]

use super::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;

const TOKEN: TokenId = 1_000;
const BASE_UNIT: u64 = 1_000_000_000;

fn funded_caller<T: Config>() -> T::AccountId {
  let caller: T::AccountId = whitelisted_caller();
  T::Currency::mint_into(&caller, 1_000 * BASE_UNIT as Balance).unwrap();
  caller
}

/// Native-paid launchpad administered by `admin`.
fn setup_core<T: Config>(admin: &T::AccountId, graduation_threshold: u64) {
  Pallet::<T>::initialize_core(
    RawOrigin::Root.into(),
    admin.clone(),
    graduation_threshold,
    CurveParams::default(),
    AssetKind::Native,
  )
  .unwrap();
}

/// Launchpad plus `TOKEN` with `caller` holding tokens bought for 10 base.
fn setup_trading<T: Config>() -> T::AccountId {
  let caller = funded_caller::<T>();
  setup_core::<T>(&caller, primitives::params::GRADUATION_THRESHOLD);
  Pallet::<T>::create_token(RawOrigin::Signed(caller.clone()).into(), TOKEN, None, None)
    .unwrap();
  Pallet::<T>::do_buy_exact_input(&caller, TOKEN, 10 * BASE_UNIT, 0).unwrap();
  caller
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn initialize_core() {
    let admin: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    initialize_core(
      RawOrigin::Root,
      admin,
      primitives::params::GRADUATION_THRESHOLD,
      CurveParams::default(),
      AssetKind::Native,
    );

    assert!(Core::<T>::exists());
  }

  #[benchmark]
  fn update_core_config() {
    let admin: T::AccountId = whitelisted_caller();
    setup_core::<T>(&admin, primitives::params::GRADUATION_THRESHOLD);
    let update = CoreConfigUpdate {
      admin: Some(admin.clone()),
      graduation_threshold: Some(BASE_UNIT),
      curve_params: Some(CurveParams::default()),
      accepted_base_asset: Some(AssetKind::Native),
    };

    #[extrinsic_call]
    update_core_config(RawOrigin::Signed(admin), update);

    assert_eq!(
      Core::<T>::get().map(|config| config.graduation_threshold),
      Some(BASE_UNIT)
    );
  }

  #[benchmark]
  fn create_token() {
    let caller = funded_caller::<T>();
    setup_core::<T>(&caller, primitives::params::GRADUATION_THRESHOLD);

    #[extrinsic_call]
    create_token(RawOrigin::Signed(caller), TOKEN, None, None);

    assert!(Tokens::<T>::contains_key(TOKEN));
  }

  #[benchmark]
  fn buy_exact_input() {
    let caller = setup_trading::<T>();

    #[extrinsic_call]
    buy_exact_input(RawOrigin::Signed(caller), TOKEN, BASE_UNIT, 0);
  }

  #[benchmark]
  fn buy_exact_output() {
    let caller = setup_trading::<T>();

    #[extrinsic_call]
    buy_exact_output(RawOrigin::Signed(caller), TOKEN, 1_000_000, u64::MAX);
  }

  #[benchmark]
  fn sell_exact_input() {
    let caller = setup_trading::<T>();

    #[extrinsic_call]
    sell_exact_input(RawOrigin::Signed(caller), TOKEN, 1_000_000, 0);
  }

  #[benchmark]
  fn sell_exact_output() {
    let caller = setup_trading::<T>();

    #[extrinsic_call]
    sell_exact_output(RawOrigin::Signed(caller), TOKEN, BASE_UNIT, u64::MAX);
  }

  #[benchmark]
  fn withdraw_liquidity() {
    let caller = funded_caller::<T>();
    setup_core::<T>(&caller, BASE_UNIT);
    Pallet::<T>::create_token(
      RawOrigin::Signed(caller.clone()).into(),
      TOKEN,
      None,
      Some(2 * BASE_UNIT),
    )
    .unwrap();
    assert!(Tokens::<T>::get(TOKEN).is_some_and(|state| state.is_graduated));

    #[extrinsic_call]
    withdraw_liquidity(RawOrigin::Signed(caller), TOKEN);

    assert!(Tokens::<T>::get(TOKEN).is_some_and(|state| state.liquidity_withdrawn));
  }

  #[benchmark]
  fn close_core() {
    let admin: T::AccountId = whitelisted_caller();
    setup_core::<T>(&admin, primitives::params::GRADUATION_THRESHOLD);

    #[extrinsic_call]
    close_core(RawOrigin::Signed(admin));

    assert!(!Core::<T>::exists());
  }

  impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
