//! Host messages: the concrete module messages contract messages are encoded into.

use std::{fmt, str::FromStr};

use cosmos_sdk_proto::{
    cosmos::{
        bank::v1beta1::MsgSend,
        base::v1beta1::Coin,
        distribution::v1beta1::{
            MsgFundCommunityPool, MsgSetWithdrawAddress, MsgWithdrawDelegatorReward,
        },
        gov::v1beta1::{MsgVote, VoteOption},
        staking::v1beta1::{MsgBeginRedelegate, MsgDelegate, MsgUndelegate},
    },
    cosmwasm::wasm::v1::{
        MsgClearAdmin, MsgExecuteContract, MsgInstantiateContract, MsgInstantiateContract2,
        MsgMigrateContract, MsgUpdateAdmin,
    },
};
use cosmwasm_std::Uint256;
use ibc_proto::{
    google::protobuf::Any,
    ibc::{applications::transfer::v1::MsgTransfer, core::channel::v1::MsgChannelCloseInit},
};

use crate::{coins::validate_denom, error::DispatchError};

/// A message a host module can execute.
///
/// Host messages are only ever built by encoders, never by contracts.
pub trait HostMsg: fmt::Debug {
    /// The protobuf type url, used by the service router.
    fn type_url(&self) -> &'static str;

    /// The route key of the legacy route table, if the message has one.
    fn legacy_route(&self) -> Option<&'static str>;

    /// The accounts that must authorize the message.
    fn signers(&self) -> Vec<&str>;

    /// Stateless validation of the message fields.
    /// # Errors
    /// Returns an error if a field is malformed.
    fn validate_basic(&self) -> Result<(), DispatchError>;

    /// The message packed into an [`Any`].
    fn to_any(&self) -> Any;

    /// Used to downcast to the concrete message type.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// A protobuf message with a fixed type url and signers.
/// Every [`SignedMsg`] is a [`HostMsg`].
pub trait SignedMsg: prost::Message + Default + 'static {
    /// The protobuf type url
    const TYPE_URL: &'static str;
    /// The route key of the legacy route table
    const LEGACY_ROUTE: Option<&'static str>;

    /// The accounts that must authorize the message.
    fn signers(&self) -> Vec<&str>;

    /// Stateless validation of the message fields.
    /// # Errors
    /// Returns an error if a field is malformed.
    fn validate_basic(&self) -> Result<(), DispatchError>;
}

impl<T: SignedMsg> HostMsg for T {
    fn type_url(&self) -> &'static str {
        T::TYPE_URL
    }

    fn legacy_route(&self) -> Option<&'static str> {
        T::LEGACY_ROUTE
    }

    fn signers(&self) -> Vec<&str> {
        SignedMsg::signers(self)
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        SignedMsg::validate_basic(self)
    }

    fn to_any(&self) -> Any {
        Any {
            type_url: T::TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Downcast a host message to its concrete type.
#[must_use]
pub fn downcast<T: 'static>(msg: &dyn HostMsg) -> Option<&T> {
    msg.as_any().downcast_ref::<T>()
}

/// Validate a bech32 account or validator address.
/// # Errors
/// Returns an error if the address is not valid bech32.
pub fn validate_address(addr: &str) -> Result<(), DispatchError> {
    bech32::primitives::decode::CheckedHrpstring::new::<bech32::Bech32>(addr)
        .map(|_| ())
        .map_err(|e| DispatchError::InvalidAddress(format!("{addr}: {e}")))
}

fn validate_positive_coin(coin: &Coin) -> Result<(), DispatchError> {
    validate_denom(&coin.denom)?;
    match Uint256::from_str(&coin.amount) {
        Ok(amount) if !amount.is_zero() => Ok(()),
        _ => Err(DispatchError::InvalidCoins(format!(
            "{}{}",
            coin.amount, coin.denom
        ))),
    }
}

fn validate_positive_coins(coins: &[Coin]) -> Result<(), DispatchError> {
    if coins.is_empty() {
        return Err(DispatchError::InvalidCoins("empty amount".to_string()));
    }
    coins.iter().try_for_each(validate_positive_coin)
}

fn validate_funds(funds: &[Coin]) -> Result<(), DispatchError> {
    funds.iter().try_for_each(validate_positive_coin)
}

fn validate_optional_coin(coin: Option<&Coin>) -> Result<(), DispatchError> {
    coin.map_or_else(
        || Err(DispatchError::InvalidCoins("missing amount".to_string())),
        validate_positive_coin,
    )
}

fn validate_json(msg: &[u8]) -> Result<(), DispatchError> {
    serde_json::from_slice::<serde_json::Value>(msg)
        .map(|_| ())
        .map_err(|e| DispatchError::InvalidRequest(format!("msg must be json: {e}")))
}

fn require_non_empty(value: &str, field: &str) -> Result<(), DispatchError> {
    if value.is_empty() {
        return Err(DispatchError::Empty(field.to_string()));
    }
    Ok(())
}

impl SignedMsg for MsgSend {
    const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";
    const LEGACY_ROUTE: Option<&'static str> = Some("bank");

    fn signers(&self) -> Vec<&str> {
        vec![self.from_address.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.from_address)?;
        validate_address(&self.to_address)?;
        validate_positive_coins(&self.amount)
    }
}

impl SignedMsg for MsgDelegate {
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgDelegate";
    const LEGACY_ROUTE: Option<&'static str> = Some("staking");

    fn signers(&self) -> Vec<&str> {
        vec![self.delegator_address.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.delegator_address)?;
        validate_address(&self.validator_address)?;
        validate_optional_coin(self.amount.as_ref())
    }
}

impl SignedMsg for MsgUndelegate {
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgUndelegate";
    const LEGACY_ROUTE: Option<&'static str> = Some("staking");

    fn signers(&self) -> Vec<&str> {
        vec![self.delegator_address.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.delegator_address)?;
        validate_address(&self.validator_address)?;
        validate_optional_coin(self.amount.as_ref())
    }
}

impl SignedMsg for MsgBeginRedelegate {
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgBeginRedelegate";
    const LEGACY_ROUTE: Option<&'static str> = Some("staking");

    fn signers(&self) -> Vec<&str> {
        vec![self.delegator_address.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.delegator_address)?;
        validate_address(&self.validator_src_address)?;
        validate_address(&self.validator_dst_address)?;
        validate_optional_coin(self.amount.as_ref())
    }
}

impl SignedMsg for MsgSetWithdrawAddress {
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress";
    const LEGACY_ROUTE: Option<&'static str> = Some("distribution");

    fn signers(&self) -> Vec<&str> {
        vec![self.delegator_address.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.delegator_address)?;
        validate_address(&self.withdraw_address)
    }
}

impl SignedMsg for MsgWithdrawDelegatorReward {
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward";
    const LEGACY_ROUTE: Option<&'static str> = Some("distribution");

    fn signers(&self) -> Vec<&str> {
        vec![self.delegator_address.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.delegator_address)?;
        validate_address(&self.validator_address)
    }
}

impl SignedMsg for MsgFundCommunityPool {
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgFundCommunityPool";
    const LEGACY_ROUTE: Option<&'static str> = Some("distribution");

    fn signers(&self) -> Vec<&str> {
        vec![self.depositor.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.depositor)?;
        validate_positive_coins(&self.amount)
    }
}

impl SignedMsg for MsgVote {
    const TYPE_URL: &'static str = "/cosmos.gov.v1beta1.MsgVote";
    const LEGACY_ROUTE: Option<&'static str> = Some("gov");

    fn signers(&self) -> Vec<&str> {
        vec![self.voter.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.voter)?;
        match VoteOption::try_from(self.option) {
            Ok(VoteOption::Unspecified) | Err(_) => Err(DispatchError::InvalidRequest(format!(
                "invalid vote option: {}",
                self.option
            ))),
            Ok(_) => Ok(()),
        }
    }
}

impl SignedMsg for MsgTransfer {
    const TYPE_URL: &'static str = "/ibc.applications.transfer.v1.MsgTransfer";
    const LEGACY_ROUTE: Option<&'static str> = Some("transfer");

    fn signers(&self) -> Vec<&str> {
        vec![self.sender.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        require_non_empty(&self.source_port, "source port")?;
        require_non_empty(&self.source_channel, "source channel")?;
        validate_address(&self.sender)?;
        require_non_empty(&self.receiver, "receiver")?;
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| DispatchError::InvalidCoins("missing token".to_string()))?;
        validate_positive_coin(&Coin {
            denom: token.denom.clone(),
            amount: token.amount.clone(),
        })?;
        let no_height = self
            .timeout_height
            .as_ref()
            .is_none_or(|h| h.revision_number == 0 && h.revision_height == 0);
        if no_height && self.timeout_timestamp == 0 {
            return Err(DispatchError::InvalidRequest(
                "packet timeout height and packet timeout timestamp cannot both be 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl SignedMsg for MsgChannelCloseInit {
    const TYPE_URL: &'static str = "/ibc.core.channel.v1.MsgChannelCloseInit";
    const LEGACY_ROUTE: Option<&'static str> = Some("ibc");

    fn signers(&self) -> Vec<&str> {
        vec![self.signer.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        require_non_empty(&self.port_id, "port id")?;
        require_non_empty(&self.channel_id, "channel id")?;
        validate_address(&self.signer)
    }
}

impl SignedMsg for MsgExecuteContract {
    const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgExecuteContract";
    const LEGACY_ROUTE: Option<&'static str> = Some("wasm");

    fn signers(&self) -> Vec<&str> {
        vec![self.sender.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.sender)?;
        validate_address(&self.contract)?;
        validate_funds(&self.funds)?;
        validate_json(&self.msg)
    }
}

impl SignedMsg for MsgInstantiateContract {
    const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgInstantiateContract";
    const LEGACY_ROUTE: Option<&'static str> = Some("wasm");

    fn signers(&self) -> Vec<&str> {
        vec![self.sender.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.sender)?;
        if !self.admin.is_empty() {
            validate_address(&self.admin)?;
        }
        if self.code_id == 0 {
            return Err(DispatchError::InvalidRequest("code id is required".to_string()));
        }
        require_non_empty(&self.label, "label")?;
        validate_funds(&self.funds)?;
        validate_json(&self.msg)
    }
}

impl SignedMsg for MsgInstantiateContract2 {
    const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgInstantiateContract2";
    const LEGACY_ROUTE: Option<&'static str> = Some("wasm");

    fn signers(&self) -> Vec<&str> {
        vec![self.sender.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.sender)?;
        if !self.admin.is_empty() {
            validate_address(&self.admin)?;
        }
        if self.code_id == 0 {
            return Err(DispatchError::InvalidRequest("code id is required".to_string()));
        }
        require_non_empty(&self.label, "label")?;
        if self.salt.is_empty() {
            return Err(DispatchError::Empty("salt".to_string()));
        }
        validate_funds(&self.funds)?;
        validate_json(&self.msg)
    }
}

impl SignedMsg for MsgMigrateContract {
    const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgMigrateContract";
    const LEGACY_ROUTE: Option<&'static str> = Some("wasm");

    fn signers(&self) -> Vec<&str> {
        vec![self.sender.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.sender)?;
        validate_address(&self.contract)?;
        if self.code_id == 0 {
            return Err(DispatchError::InvalidRequest("code id is required".to_string()));
        }
        validate_json(&self.msg)
    }
}

impl SignedMsg for MsgUpdateAdmin {
    const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgUpdateAdmin";
    const LEGACY_ROUTE: Option<&'static str> = Some("wasm");

    fn signers(&self) -> Vec<&str> {
        vec![self.sender.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.sender)?;
        validate_address(&self.contract)?;
        validate_address(&self.new_admin)?;
        if self.new_admin == self.sender {
            return Err(DispatchError::InvalidRequest(
                "new admin is the same as the old".to_string(),
            ));
        }
        Ok(())
    }
}

impl SignedMsg for MsgClearAdmin {
    const TYPE_URL: &'static str = "/cosmwasm.wasm.v1.MsgClearAdmin";
    const LEGACY_ROUTE: Option<&'static str> = Some("wasm");

    fn signers(&self) -> Vec<&str> {
        vec![self.sender.as_str()]
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        validate_address(&self.sender)?;
        validate_address(&self.contract)
    }
}
