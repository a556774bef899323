//! Bonding Curve Pallet
//!
//! Launchpad for project tokens priced by the smooth bonding curve `y(x) = A - K / (C + x)`.
//! Each token's full supply is minted once into a pallet-owned vault; buyers pay a base asset
//! into a pallet-owned escrow and receive tokens released by the curve, sellers hand tokens back
//! for base paid out of the escrow. Once the escrow reaches the configured threshold the token
//! graduates: curve trading stops for good and the admin may drain vault and escrow once.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

pub mod curve;
pub mod lifecycle;
pub mod settlement;
pub mod types;

pub use curve::CurveError;
pub use lifecycle::LifecycleError;
pub use settlement::{Reserves, Settlement, SettlementError};
pub use types::{
  Balance, CoreConfig, CoreConfigUpdate, CurveParams, TokenId, TokenState, TradeKind,
};

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

use frame::prelude::*;

use frame::deps::{
  frame_support::{
    defensive,
    traits::{
      fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
      fungibles::{Create as FungiblesCreate, Inspect as FungiblesInspect, Mutate as FungiblesMutate},
      tokens::{Fortitude, Preservation},
    },
  },
  sp_runtime::traits::{AccountIdConversion, Zero},
};
use primitives::AssetKind;

pub(crate) const LOG_TARGET: &str = "runtime::bonding-curve";

/// Largest supported project token precision; `10^18` still leaves room for whole-token counts.
pub const MAX_TOKEN_DECIMALS: u8 = 18;

#[frame::pallet]
pub mod pallet {
  use super::WeightInfo;
  use super::*;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Asset store for project tokens and non-native base assets
    type Assets: FungiblesInspect<Self::AccountId, AssetId = TokenId, Balance = Balance>
      + FungiblesMutate<Self::AccountId, AssetId = TokenId, Balance = Balance>
      + FungiblesCreate<Self::AccountId, AssetId = TokenId, Balance = Balance>;

    /// Currency interface for a native base asset
    type Currency: NativeMutate<Self::AccountId, Balance = Balance>
      + NativeInspect<Self::AccountId, Balance = Balance>;

    /// Origin allowed to initialize the launchpad
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Pallet ID for the pallet account and the per-token vault and escrow accounts
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Decimals of every project token
    #[pallet::constant]
    type TokenDecimals: Get<u8>;

    /// Weight information
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  #[pallet::storage_version(STORAGE_VERSION)]
  pub struct Pallet<T>(_);

  /// The current storage version.
  const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

  /// Launchpad configuration, absent until initialized and after teardown
  #[pallet::storage]
  pub type Core<T: Config> = StorageValue<_, CoreConfig<T::AccountId>>;

  /// Curve state of every created token
  #[pallet::storage]
  pub type Tokens<T: Config> =
    StorageMap<_, Blake2_128Concat, TokenId, TokenState<T::AccountId>>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Launchpad configured
    CoreInitialized {
      admin: T::AccountId,
      graduation_threshold: u64,
      curve_params: CurveParams,
      accepted_base_asset: AssetKind,
    },
    /// Launchpad configuration replaced by an admin update
    CoreConfigUpdated {
      admin: T::AccountId,
      graduation_threshold: u64,
      curve_params: CurveParams,
      accepted_base_asset: AssetKind,
    },
    /// Launchpad configuration removed
    CoreClosed { admin: T::AccountId },
    /// Token created and its full supply minted into the vault
    TokenCreated {
      token_id: TokenId,
      creator: T::AccountId,
      vault: T::AccountId,
      escrow: T::AccountId,
      curve_params: CurveParams,
      base_asset: AssetKind,
      total_supply: Balance,
    },
    /// Curve trade settled
    Swap {
      kind: TradeKind,
      token_id: TokenId,
      who: T::AccountId,
      base_amount: u64,
      token_amount: Balance,
      vault_token_amount: Balance,
    },
    /// Escrow reached the graduation threshold; curve trading is closed
    GraduationTriggered {
      token_id: TokenId,
      buyer: T::AccountId,
      escrow_balance: Balance,
      vault: T::AccountId,
      escrow: T::AccountId,
      creator: T::AccountId,
    },
    /// Vault and escrow of a graduated token drained to the admin
    LiquidityWithdrawn {
      token_id: TokenId,
      admin: T::AccountId,
      base_amount: Balance,
      token_amount: Balance,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Arithmetic overflow occurred
    MathOverflow,
    /// The curve cannot release or take back the requested amount
    InsufficientTokenSupply,
    /// Curve evaluated at a zero denominator
    DivisionUndefined,
    /// Vault holds fewer tokens than the trade releases
    InsufficientTokenVaultBalance,
    /// Escrow holds less base than the trade pays out
    InsufficientEscrowBalance,
    /// Counter-amount violates the caller's bound
    SlippageExceeded,
    /// Token graduated; curve trading is closed
    TokenIsGraduated,
    /// Liquidity can only be withdrawn after graduation
    BondingCurveNotGraduated,
    /// Caller is not the launchpad admin
    Unauthorized,
    /// Token id already in use
    InvalidSeed,
    /// Curve parameter is zero or the curve never releases a token
    InvalidCurveParams,
    /// Curve would start above the vault supply
    CurveExceedsSupply,
    /// Curve releases more than one token per base unit
    CurveTooSteep,
    /// Graduation threshold must be positive
    InvalidGraduationThreshold,
    /// Launchpad not initialized
    CoreNotInitialized,
    /// Launchpad already initialized
    CoreAlreadyInitialized,
    /// No token with this id
    UnknownToken,
    /// Zero amount not allowed
    ZeroAmount,
    /// Caller cannot cover the base paid in
    InsufficientBaseBalance,
    /// Caller cannot cover the tokens sold
    InsufficientTokenBalance,
    /// Liquidity of this token was already withdrawn
    LiquidityAlreadyWithdrawn,
    /// Vault balance differs from the minted supply
    VaultMisfunded,
    /// Base asset does not exist or is a launchpad token
    InvalidBaseAsset,
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    fn integrity_test() {
      assert!(
        T::TokenDecimals::get() <= MAX_TOKEN_DECIMALS,
        "TokenDecimals must not exceed {MAX_TOKEN_DECIMALS}"
      );
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Configure the launchpad
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::initialize_core())]
    pub fn initialize_core(
      origin: OriginFor<T>,
      admin: T::AccountId,
      graduation_threshold: u64,
      curve_params: CurveParams,
      accepted_base_asset: AssetKind,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(!Core::<T>::exists(), Error::<T>::CoreAlreadyInitialized);

      let config = CoreConfig {
        admin,
        graduation_threshold,
        curve_params,
        accepted_base_asset,
      };
      lifecycle::validate_core_config(&config).map_err(Error::<T>::from)?;
      Self::ensure_base_asset(accepted_base_asset)?;
      Core::<T>::put(&config);

      Self::deposit_event(Event::CoreInitialized {
        admin: config.admin,
        graduation_threshold,
        curve_params,
        accepted_base_asset,
      });

      Ok(())
    }

    /// Change any subset of the launchpad configuration (admin only)
    ///
    /// Curves releasing more than one token per base unit (`K > C^2`) are refused with
    /// `CurveTooSteep`; base assets with few decimals need a larger `C` or a smaller `A`.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::update_core_config())]
    pub fn update_core_config(
      origin: OriginFor<T>,
      update: CoreConfigUpdate<T::AccountId>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let current = Core::<T>::get().ok_or(Error::<T>::CoreNotInitialized)?;
      let updated = lifecycle::apply_update(&current, &who, update).map_err(Error::<T>::from)?;
      Self::ensure_base_asset(updated.accepted_base_asset)?;
      Core::<T>::put(&updated);

      Self::deposit_event(Event::CoreConfigUpdated {
        admin: updated.admin,
        graduation_threshold: updated.graduation_threshold,
        curve_params: updated.curve_params,
        accepted_base_asset: updated.accepted_base_asset,
      });

      Ok(())
    }

    /// Create a token, mint its full supply into the vault and optionally buy into it
    ///
    /// Custom `curve_params` go through the same validation as the launchpad default,
    /// including the `K <= C^2` bound (`CurveTooSteep`).
    #[pallet::call_index(2)]
    #[pallet::weight(
      T::WeightInfo::create_token().saturating_add(
        if initial_buy.is_some() { T::WeightInfo::buy_exact_input() } else { Weight::zero() }
      )
    )]
    pub fn create_token(
      origin: OriginFor<T>,
      token_id: TokenId,
      curve_params: Option<CurveParams>,
      initial_buy: Option<u64>,
    ) -> DispatchResult {
      let creator = ensure_signed(origin)?;
      Self::do_create_token(&creator, token_id, curve_params)?;
      if let Some(base_in) = initial_buy.filter(|base_in| !base_in.is_zero()) {
        Self::do_buy_exact_input(&creator, token_id, base_in, 0)?;
      }
      Ok(())
    }

    /// Pay exactly `base_in` for at least `min_tokens_out` whole tokens
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::buy_exact_input())]
    pub fn buy_exact_input(
      origin: OriginFor<T>,
      token_id: TokenId,
      base_in: u64,
      min_tokens_out: u64,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_buy_exact_input(&who, token_id, base_in, min_tokens_out)?;
      Ok(())
    }

    /// Receive exactly `tokens_out` whole tokens for at most `max_base_in`
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::buy_exact_output())]
    pub fn buy_exact_output(
      origin: OriginFor<T>,
      token_id: TokenId,
      tokens_out: u64,
      max_base_in: u64,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_buy_exact_output(&who, token_id, tokens_out, max_base_in)?;
      Ok(())
    }

    /// Return exactly `tokens_in` whole tokens for at least `min_base_out`
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::sell_exact_input())]
    pub fn sell_exact_input(
      origin: OriginFor<T>,
      token_id: TokenId,
      tokens_in: u64,
      min_base_out: u64,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_sell_exact_input(&who, token_id, tokens_in, min_base_out)?;
      Ok(())
    }

    /// Receive at least `base_out` for at most `max_tokens_in` whole tokens
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::sell_exact_output())]
    pub fn sell_exact_output(
      origin: OriginFor<T>,
      token_id: TokenId,
      base_out: u64,
      max_tokens_in: u64,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_sell_exact_output(&who, token_id, base_out, max_tokens_in)?;
      Ok(())
    }

    /// Drain vault and escrow of a graduated token (admin only, once)
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::withdraw_liquidity())]
    pub fn withdraw_liquidity(origin: OriginFor<T>, token_id: TokenId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_withdraw_liquidity(&who, token_id)?;
      Ok(())
    }

    /// Remove the launchpad configuration (admin only)
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::close_core())]
    pub fn close_core(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let config = Core::<T>::get().ok_or(Error::<T>::CoreNotInitialized)?;
      lifecycle::ensure_admin(&config, &who).map_err(Error::<T>::from)?;
      Core::<T>::kill();

      Self::deposit_event(Event::CoreClosed { admin: who });

      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Get the account ID of the pallet
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Account holding the unsold supply of `token_id`
    pub fn vault_account(token_id: TokenId) -> T::AccountId {
      T::PalletId::get().into_sub_account_truncating((*b"vault", token_id))
    }

    /// Account holding the base deposits of `token_id`
    pub fn escrow_account(token_id: TokenId) -> T::AccountId {
      T::PalletId::get().into_sub_account_truncating((*b"escrw", token_id))
    }

    /// One whole project token in raw asset units
    pub fn token_unit() -> Balance {
      10u128.saturating_pow(T::TokenDecimals::get().into())
    }

    pub fn get_core_config() -> Option<CoreConfig<T::AccountId>> {
      Core::<T>::get()
    }

    pub fn get_token_state(token_id: TokenId) -> Option<TokenState<T::AccountId>> {
      Tokens::<T>::get(token_id)
    }

    /// Price a trade against the current state without executing it.
    ///
    /// Ignores any trader's balances and slippage bounds.
    pub fn quote(
      token_id: TokenId,
      kind: TradeKind,
      amount: u64,
    ) -> Result<Settlement, DispatchError> {
      let state = Tokens::<T>::get(token_id).ok_or(Error::<T>::UnknownToken)?;
      let settlement = settlement::settle(
        &state,
        Self::reserves(&state, None),
        Self::token_unit(),
        kind,
        amount,
        kind.unbounded_limit(),
      )
      .map_err(Error::<T>::from)?;
      Ok(settlement)
    }

    /// Marginal price of one whole token in base units
    pub fn spot_price(token_id: TokenId) -> Result<u128, DispatchError> {
      let state = Tokens::<T>::get(token_id).ok_or(Error::<T>::UnknownToken)?;
      let price = state
        .curve_params
        .spot_price(state.cumulative_base_deposited)
        .map_err(Error::<T>::from)?;
      Ok(price)
    }

    /// Create `token_id` with its full supply in the vault
    pub fn do_create_token(
      creator: &T::AccountId,
      token_id: TokenId,
      curve_params: Option<CurveParams>,
    ) -> Result<TokenState<T::AccountId>, DispatchError> {
      let config = Core::<T>::get().ok_or(Error::<T>::CoreNotInitialized)?;
      let curve_params = curve_params.unwrap_or(config.curve_params);
      curve_params.validate().map_err(Error::<T>::from)?;
      ensure!(
        !Tokens::<T>::contains_key(token_id) && !T::Assets::asset_exists(token_id),
        Error::<T>::InvalidSeed
      );

      let total_supply = curve_params
        .total_supply(Self::token_unit())
        .map_err(Error::<T>::from)?;
      let vault = Self::vault_account(token_id);
      let escrow = Self::escrow_account(token_id);

      T::Assets::create(token_id, Self::account_id(), true, 1)?;
      frame_system::Pallet::<T>::inc_providers(&vault);
      frame_system::Pallet::<T>::inc_providers(&escrow);
      T::Assets::mint_into(token_id, &vault, total_supply)?;

      // The supply is minted exactly once; anything else in the vault is a broken setup.
      let funded = T::Assets::balance(token_id, &vault);
      if funded != total_supply {
        defensive!("vault balance differs from the minted supply");
        return Err(Error::<T>::VaultMisfunded.into());
      }

      let state = TokenState::new(
        token_id,
        vault.clone(),
        escrow.clone(),
        creator.clone(),
        curve_params,
        config.accepted_base_asset,
      );
      Tokens::<T>::insert(token_id, &state);

      log::info!(
        target: LOG_TARGET,
        "token {} created by {:?} with {} units in vault",
        token_id,
        creator,
        total_supply
      );
      Self::deposit_event(Event::TokenCreated {
        token_id,
        creator: creator.clone(),
        vault,
        escrow,
        curve_params,
        base_asset: config.accepted_base_asset,
        total_supply,
      });

      Ok(state)
    }

    /// Buy with exactly `base_in`; returns the whole tokens received
    pub fn do_buy_exact_input(
      who: &T::AccountId,
      token_id: TokenId,
      base_in: u64,
      min_tokens_out: u64,
    ) -> Result<u64, DispatchError> {
      let settlement = Self::do_trade(
        who,
        token_id,
        TradeKind::BuyExactIn,
        base_in,
        min_tokens_out,
      )?;
      Ok(settlement.tokens)
    }

    /// Buy exactly `tokens_out`; returns the base paid
    pub fn do_buy_exact_output(
      who: &T::AccountId,
      token_id: TokenId,
      tokens_out: u64,
      max_base_in: u64,
    ) -> Result<u64, DispatchError> {
      let settlement = Self::do_trade(
        who,
        token_id,
        TradeKind::BuyExactOut,
        tokens_out,
        max_base_in,
      )?;
      Ok(settlement.base_amount)
    }

    /// Sell exactly `tokens_in`; returns the base received
    pub fn do_sell_exact_input(
      who: &T::AccountId,
      token_id: TokenId,
      tokens_in: u64,
      min_base_out: u64,
    ) -> Result<u64, DispatchError> {
      let settlement = Self::do_trade(
        who,
        token_id,
        TradeKind::SellExactIn,
        tokens_in,
        min_base_out,
      )?;
      Ok(settlement.base_amount)
    }

    /// Sell for at least `base_out`; returns the whole tokens returned
    pub fn do_sell_exact_output(
      who: &T::AccountId,
      token_id: TokenId,
      base_out: u64,
      max_tokens_in: u64,
    ) -> Result<u64, DispatchError> {
      let settlement = Self::do_trade(
        who,
        token_id,
        TradeKind::SellExactOut,
        base_out,
        max_tokens_in,
      )?;
      Ok(settlement.tokens)
    }

    /// Drain a graduated token; returns the base and raw token amounts moved to the admin
    pub fn do_withdraw_liquidity(
      who: &T::AccountId,
      token_id: TokenId,
    ) -> Result<(Balance, Balance), DispatchError> {
      let config = Core::<T>::get().ok_or(Error::<T>::CoreNotInitialized)?;
      let mut state = Tokens::<T>::get(token_id).ok_or(Error::<T>::UnknownToken)?;
      lifecycle::ensure_withdrawable(&config, &state, who).map_err(Error::<T>::from)?;

      let base_amount = Self::base_balance(state.base_asset, &state.escrow);
      let token_amount = T::Assets::balance(token_id, &state.vault);
      if !base_amount.is_zero() {
        Self::transfer_base(state.base_asset, &state.escrow, who, base_amount)?;
      }
      if !token_amount.is_zero() {
        T::Assets::transfer(
          token_id,
          &state.vault,
          who,
          token_amount,
          Preservation::Expendable,
        )?;
      }

      state.liquidity_withdrawn = true;
      Tokens::<T>::insert(token_id, state);

      log::info!(
        target: LOG_TARGET,
        "liquidity of token {} withdrawn: {} base, {} tokens",
        token_id,
        base_amount,
        token_amount
      );
      Self::deposit_event(Event::LiquidityWithdrawn {
        token_id,
        admin: who.clone(),
        base_amount,
        token_amount,
      });

      Ok((base_amount, token_amount))
    }

    /// Settle one trade, apply its deltas and evaluate graduation after buys.
    fn do_trade(
      who: &T::AccountId,
      token_id: TokenId,
      kind: TradeKind,
      amount: u64,
      limit: u64,
    ) -> Result<Settlement, DispatchError> {
      let config = Core::<T>::get().ok_or(Error::<T>::CoreNotInitialized)?;
      let mut state = Tokens::<T>::get(token_id).ok_or(Error::<T>::UnknownToken)?;

      // Every check runs before the first transfer.
      let settlement = settlement::settle(
        &state,
        Self::reserves(&state, Some(who)),
        Self::token_unit(),
        kind,
        amount,
        limit,
      )
      .map_err(Error::<T>::from)?;

      let base_amount = Balance::from(settlement.base_amount);
      if kind.is_buy() {
        if !base_amount.is_zero() {
          Self::transfer_base(state.base_asset, who, &state.escrow, base_amount)?;
        }
        if !settlement.token_amount.is_zero() {
          T::Assets::transfer(
            token_id,
            &state.vault,
            who,
            settlement.token_amount,
            Preservation::Expendable,
          )?;
        }
      } else {
        if !settlement.token_amount.is_zero() {
          T::Assets::transfer(
            token_id,
            who,
            &state.vault,
            settlement.token_amount,
            Preservation::Expendable,
          )?;
        }
        if !base_amount.is_zero() {
          Self::transfer_base(state.base_asset, &state.escrow, who, base_amount)?;
        }
      }
      state.cumulative_base_deposited = settlement.deposited_after;

      let vault_token_amount = T::Assets::balance(token_id, &state.vault);
      log::debug!(
        target: LOG_TARGET,
        "{:?} on token {}: {} base, {} tokens, x = {}",
        kind,
        token_id,
        settlement.base_amount,
        settlement.tokens,
        state.cumulative_base_deposited
      );
      Self::deposit_event(Event::Swap {
        kind,
        token_id,
        who: who.clone(),
        base_amount: settlement.base_amount,
        token_amount: settlement.token_amount,
        vault_token_amount,
      });

      if kind.is_buy() {
        Self::evaluate_graduation(token_id, &mut state, who, config.graduation_threshold);
      }
      Tokens::<T>::insert(token_id, state);

      Ok(settlement)
    }

    fn evaluate_graduation(
      token_id: TokenId,
      state: &mut TokenState<T::AccountId>,
      buyer: &T::AccountId,
      threshold: u64,
    ) {
      let escrow_balance = Self::base_balance(state.base_asset, &state.escrow);
      if !state.evaluate_graduation(escrow_balance, threshold) {
        return;
      }
      log::info!(
        target: LOG_TARGET,
        "token {} graduated with {} base in escrow",
        token_id,
        escrow_balance
      );
      Self::deposit_event(Event::GraduationTriggered {
        token_id,
        buyer: buyer.clone(),
        escrow_balance,
        vault: state.vault.clone(),
        escrow: state.escrow.clone(),
        creator: state.creator.clone(),
      });
    }

    /// Snapshot of the balances a trade touches; `None` leaves the trader unconstrained.
    fn reserves(state: &TokenState<T::AccountId>, trader: Option<&T::AccountId>) -> Reserves {
      let (trader_tokens, trader_base) = match trader {
        Some(who) => (
          T::Assets::reducible_balance(
            state.mint,
            who,
            Preservation::Expendable,
            Fortitude::Polite,
          ),
          Self::spendable_base(state.base_asset, who),
        ),
        None => (Balance::MAX, Balance::MAX),
      };
      Reserves {
        vault_tokens: T::Assets::balance(state.mint, &state.vault),
        escrow_base: Self::base_balance(state.base_asset, &state.escrow),
        trader_tokens,
        trader_base,
        base_minimum: Self::base_minimum(state.base_asset),
      }
    }

    /// Payment must be native or an existing asset that is not a launchpad token.
    fn ensure_base_asset(asset: AssetKind) -> DispatchResult {
      if let Some(id) = asset.asset_id() {
        ensure!(
          T::Assets::asset_exists(id) && !Tokens::<T>::contains_key(id),
          Error::<T>::InvalidBaseAsset
        );
      }
      Ok(())
    }

    fn base_minimum(asset: AssetKind) -> Balance {
      match asset.asset_id() {
        None => T::Currency::minimum_balance(),
        Some(id) => T::Assets::minimum_balance(id),
      }
    }

    fn base_balance(asset: AssetKind, who: &T::AccountId) -> Balance {
      match asset.asset_id() {
        None => T::Currency::balance(who),
        Some(id) => T::Assets::balance(id, who),
      }
    }

    fn spendable_base(asset: AssetKind, who: &T::AccountId) -> Balance {
      match asset.asset_id() {
        None => T::Currency::reducible_balance(who, Preservation::Expendable, Fortitude::Polite),
        Some(id) => {
          T::Assets::reducible_balance(id, who, Preservation::Expendable, Fortitude::Polite)
        }
      }
    }

    fn transfer_base(
      asset: AssetKind,
      from: &T::AccountId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      match asset.asset_id() {
        None => {
          T::Currency::transfer(from, to, amount, Preservation::Expendable)?;
        }
        Some(id) => {
          T::Assets::transfer(id, from, to, amount, Preservation::Expendable)?;
        }
      }
      Ok(())
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }
}

impl<T: Config> From<CurveError> for Error<T> {
  fn from(error: CurveError) -> Self {
    match error {
      CurveError::MathOverflow => Error::MathOverflow,
      CurveError::InsufficientTokenSupply => Error::InsufficientTokenSupply,
      CurveError::DivisionUndefined => Error::DivisionUndefined,
      CurveError::InvalidParameters => Error::InvalidCurveParams,
      CurveError::ExceedsSupply => Error::CurveExceedsSupply,
      CurveError::TooSteep => Error::CurveTooSteep,
    }
  }
}

impl<T: Config> From<SettlementError> for Error<T> {
  fn from(error: SettlementError) -> Self {
    match error {
      SettlementError::Curve(error) => error.into(),
      SettlementError::ZeroAmount => Error::ZeroAmount,
      SettlementError::SlippageExceeded => Error::SlippageExceeded,
      SettlementError::InsufficientTokenVaultBalance => Error::InsufficientTokenVaultBalance,
      SettlementError::InsufficientEscrowBalance => Error::InsufficientEscrowBalance,
      SettlementError::InsufficientBaseBalance => Error::InsufficientBaseBalance,
      SettlementError::InsufficientTokenBalance => Error::InsufficientTokenBalance,
      SettlementError::TokenIsGraduated => Error::TokenIsGraduated,
    }
  }
}

impl<T: Config> From<LifecycleError> for Error<T> {
  fn from(error: LifecycleError) -> Self {
    match error {
      LifecycleError::Unauthorized => Error::Unauthorized,
      LifecycleError::InvalidCurve(error) => error.into(),
      LifecycleError::InvalidGraduationThreshold => Error::InvalidGraduationThreshold,
      LifecycleError::BondingCurveNotGraduated => Error::BondingCurveNotGraduated,
      LifecycleError::LiquidityAlreadyWithdrawn => Error::LiquidityAlreadyWithdrawn,
    }
  }
}
