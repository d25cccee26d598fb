//! Conversion of contract coins into host coins.

use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use cosmwasm_std::{Coin, Coins};

use crate::error::DispatchError;

/// Minimum length of a denomination
pub const MIN_DENOM_LEN: usize = 3;
/// Maximum length of a denomination
pub const MAX_DENOM_LEN: usize = 128;

/// Validate a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
/// # Errors
/// Returns an error if the denomination does not match.
pub fn validate_denom(denom: &str) -> Result<(), DispatchError> {
    let invalid = || DispatchError::InvalidCoins(format!("invalid denom: {denom}"));

    if !(MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&denom.len()) {
        return Err(invalid());
    }
    let mut chars = denom.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')) {
        return Err(invalid());
    }
    Ok(())
}

/// Convert the coins of a contract message into a sorted set of host coins.
/// Duplicate denominations are summed and zero amounts dropped.
/// # Errors
/// Returns an error if a denomination is invalid or an amount overflows.
pub fn convert_wasm_coins_to_host_coins(coins: &[Coin]) -> Result<Coins, DispatchError> {
    let mut host_coins = Coins::default();
    for coin in coins {
        validate_denom(&coin.denom)?;
        host_coins
            .add(coin.clone())
            .map_err(|e| DispatchError::InvalidCoins(format!("{coin}: {e}")))?;
    }
    Ok(host_coins)
}

/// Convert a single contract coin into a protobuf coin.
/// # Errors
/// Returns an error if the denomination is invalid.
pub fn convert_wasm_coin_to_proto_coin(coin: &Coin) -> Result<ProtoCoin, DispatchError> {
    validate_denom(&coin.denom)?;
    Ok(ProtoCoin {
        denom: coin.denom.clone(),
        amount: coin.amount.to_string(),
    })
}

/// Convert the coins of a contract message into protobuf coins.
/// # Errors
/// Returns an error if a denomination is invalid or an amount overflows.
pub fn convert_wasm_coins_to_proto_coins(coins: &[Coin]) -> Result<Vec<ProtoCoin>, DispatchError> {
    Ok(to_proto_coins(&convert_wasm_coins_to_host_coins(coins)?))
}

/// Convert host coins into protobuf coins.
#[must_use]
pub fn to_proto_coins(coins: &Coins) -> Vec<ProtoCoin> {
    coins
        .to_vec()
        .into_iter()
        .map(|c| ProtoCoin {
            denom: c.denom,
            amount: c.amount.to_string(),
        })
        .collect()
}
