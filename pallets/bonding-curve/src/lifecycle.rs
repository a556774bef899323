//! Token lifecycle rules: configuration changes, graduation and the post-graduation drain.

use crate::{
  curve::CurveError,
  types::{Balance, CoreConfig, CoreConfigUpdate, TokenState},
};

/// Reasons a lifecycle transition is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleError {
  /// Caller is not the configured admin
  Unauthorized,
  InvalidCurve(CurveError),
  /// Graduation threshold must be positive
  InvalidGraduationThreshold,
  BondingCurveNotGraduated,
  LiquidityAlreadyWithdrawn,
}

impl From<CurveError> for LifecycleError {
  fn from(error: CurveError) -> Self {
    LifecycleError::InvalidCurve(error)
  }
}

pub fn ensure_admin<AccountId: PartialEq>(
  config: &CoreConfig<AccountId>,
  who: &AccountId,
) -> Result<(), LifecycleError> {
  if &config.admin != who {
    return Err(LifecycleError::Unauthorized);
  }
  Ok(())
}

pub fn validate_core_config<AccountId>(
  config: &CoreConfig<AccountId>,
) -> Result<(), LifecycleError> {
  if config.graduation_threshold == 0 {
    return Err(LifecycleError::InvalidGraduationThreshold);
  }
  config.curve_params.validate()?;
  Ok(())
}

/// Apply an admin's partial update, returning the validated configuration.
///
/// The caller is checked before anything in the update is looked at.
pub fn apply_update<AccountId: Clone + PartialEq>(
  config: &CoreConfig<AccountId>,
  who: &AccountId,
  update: CoreConfigUpdate<AccountId>,
) -> Result<CoreConfig<AccountId>, LifecycleError> {
  ensure_admin(config, who)?;
  let updated = CoreConfig {
    admin: update.admin.unwrap_or_else(|| config.admin.clone()),
    graduation_threshold: update
      .graduation_threshold
      .unwrap_or(config.graduation_threshold),
    curve_params: update.curve_params.unwrap_or(config.curve_params),
    accepted_base_asset: update
      .accepted_base_asset
      .unwrap_or(config.accepted_base_asset),
  };
  validate_core_config(&updated)?;
  Ok(updated)
}

/// Whether an escrow holding `escrow_balance` base units has reached `threshold`.
pub fn graduation_reached(escrow_balance: Balance, threshold: u64) -> bool {
  escrow_balance >= threshold as Balance
}

impl<AccountId> TokenState<AccountId> {
  /// Graduate the token once its escrow reaches `threshold`.
  ///
  /// Returns `true` only on the call that performs the transition.
  pub fn evaluate_graduation(&mut self, escrow_balance: Balance, threshold: u64) -> bool {
    if self.is_graduated || !graduation_reached(escrow_balance, threshold) {
      return false;
    }
    self.is_graduated = true;
    true
  }
}

/// Admin first, then graduation, then the one-time drain.
pub fn ensure_withdrawable<AccountId: PartialEq>(
  config: &CoreConfig<AccountId>,
  state: &TokenState<AccountId>,
  who: &AccountId,
) -> Result<(), LifecycleError> {
  ensure_admin(config, who)?;
  if !state.is_graduated {
    return Err(LifecycleError::BondingCurveNotGraduated);
  }
  if state.liquidity_withdrawn {
    return Err(LifecycleError::LiquidityAlreadyWithdrawn);
  }
  Ok(())
}
