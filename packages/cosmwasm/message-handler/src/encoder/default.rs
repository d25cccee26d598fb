//! The default encoders, one per contract message variant.

use cosmos_sdk_proto::{
    cosmos::{
        bank::v1beta1::MsgSend,
        distribution::v1beta1::{
            MsgFundCommunityPool, MsgSetWithdrawAddress, MsgWithdrawDelegatorReward,
        },
        gov::v1beta1::{MsgVote, VoteOption as ProtoVoteOption},
        staking::v1beta1::{MsgBeginRedelegate, MsgDelegate, MsgUndelegate},
    },
    cosmwasm::wasm::v1::{
        MsgClearAdmin, MsgExecuteContract, MsgInstantiateContract, MsgInstantiateContract2,
        MsgMigrateContract, MsgUpdateAdmin,
    },
};
use cosmwasm_std::{
    Addr, BankMsg, DistributionMsg, GovMsg, IbcMsg, StakingMsg, VoteOption, WasmMsg,
};
use ibc_proto::{
    cosmos::base::v1beta1::Coin as IbcCoin,
    google::protobuf::Any,
    ibc::{applications::transfer::v1::MsgTransfer, core::channel::v1::MsgChannelCloseInit},
};

use super::EncodeResult;
use crate::{
    coins::{convert_wasm_coin_to_proto_coin, convert_wasm_coins_to_proto_coins},
    context::Context,
    error::DispatchError,
    host_msg::HostMsg,
    ibc::{convert_wasm_ibc_timeout_height_to_cosmos_height, convert_wasm_ibc_timeout_timestamp},
    keeper::Ics20TransferPortSource,
    msg::RawCustomMsg,
    unpacker::AnyUnpacker,
};

#[allow(clippy::unnecessary_wraps)]
fn single(msg: impl HostMsg + 'static) -> EncodeResult {
    Ok(vec![Box::new(msg) as Box<dyn HostMsg>])
}

fn unknown_variant(kind: &str) -> DispatchError {
    DispatchError::UnknownMsg(format!("unknown variant of {kind}"))
}

/// Encodes `BankMsg::Send` into `MsgSend`.
/// Every other bank variant is left to the other handlers.
/// # Errors
/// Returns an error if the coins are invalid.
pub fn encode_bank_msg(sender: &Addr, msg: &BankMsg) -> EncodeResult {
    match msg {
        BankMsg::Send { to_address, amount } => single(MsgSend {
            from_address: sender.to_string(),
            to_address: to_address.clone(),
            amount: convert_wasm_coins_to_proto_coins(amount)?,
        }),
        _ => Err(unknown_variant("Bank")),
    }
}

/// Custom messages are chain specific, so the default rejects them.
/// # Errors
/// Always returns [`DispatchError::UnknownMsg`].
pub fn encode_custom_msg(_sender: &Addr, _msg: &RawCustomMsg) -> EncodeResult {
    Err(DispatchError::UnknownMsg(
        "custom variant not supported".to_string(),
    ))
}

/// Encodes distribution messages.
/// # Errors
/// Returns an error if the coins are invalid.
pub fn encode_distribution_msg(sender: &Addr, msg: &DistributionMsg) -> EncodeResult {
    match msg {
        DistributionMsg::SetWithdrawAddress { address } => single(MsgSetWithdrawAddress {
            delegator_address: sender.to_string(),
            withdraw_address: address.clone(),
        }),
        DistributionMsg::WithdrawDelegatorReward { validator } => {
            single(MsgWithdrawDelegatorReward {
                delegator_address: sender.to_string(),
                validator_address: validator.clone(),
            })
        }
        DistributionMsg::FundCommunityPool { amount } => single(MsgFundCommunityPool {
            amount: convert_wasm_coins_to_proto_coins(amount)?,
            depositor: sender.to_string(),
        }),
        _ => Err(unknown_variant("Distribution")),
    }
}

/// Encodes staking messages.
/// # Errors
/// Returns an error if the coin is invalid.
pub fn encode_staking_msg(sender: &Addr, msg: &StakingMsg) -> EncodeResult {
    match msg {
        StakingMsg::Delegate { validator, amount } => single(MsgDelegate {
            delegator_address: sender.to_string(),
            validator_address: validator.clone(),
            amount: Some(convert_wasm_coin_to_proto_coin(amount)?),
        }),
        StakingMsg::Undelegate { validator, amount } => single(MsgUndelegate {
            delegator_address: sender.to_string(),
            validator_address: validator.clone(),
            amount: Some(convert_wasm_coin_to_proto_coin(amount)?),
        }),
        StakingMsg::Redelegate {
            src_validator,
            dst_validator,
            amount,
        } => single(MsgBeginRedelegate {
            delegator_address: sender.to_string(),
            validator_src_address: src_validator.clone(),
            validator_dst_address: dst_validator.clone(),
            amount: Some(convert_wasm_coin_to_proto_coin(amount)?),
        }),
        _ => Err(unknown_variant("Staking")),
    }
}

/// Unpacks a protobuf message sent by the contract.
/// # Errors
/// Returns an error if the unpacker does not know the type url.
pub fn encode_stargate_msg(unpacker: &dyn AnyUnpacker, _sender: &Addr, any: &Any) -> EncodeResult {
    Ok(vec![unpacker.unpack_any(any)?])
}

/// Encodes `IbcMsg::Transfer` and `IbcMsg::CloseChannel`.
/// Packets are left to the packet handler.
/// # Errors
/// Returns an error if the coin is invalid, or if a contract without IBC port
/// closes a channel.
pub fn encode_ibc_msg(
    port_source: &dyn Ics20TransferPortSource,
    ctx: &Context<'_>,
    sender: &Addr,
    contract_ibc_port_id: &str,
    msg: &IbcMsg,
) -> EncodeResult {
    match msg {
        IbcMsg::Transfer {
            channel_id,
            to_address,
            amount,
            timeout,
            memo,
        } => {
            let token = convert_wasm_coin_to_proto_coin(amount)?;
            single(MsgTransfer {
                source_port: port_source.get_port(ctx),
                source_channel: channel_id.clone(),
                token: Some(IbcCoin {
                    denom: token.denom,
                    amount: token.amount,
                }),
                sender: sender.to_string(),
                receiver: to_address.clone(),
                timeout_height: Some(convert_wasm_ibc_timeout_height_to_cosmos_height(
                    timeout.block(),
                )),
                timeout_timestamp: convert_wasm_ibc_timeout_timestamp(timeout),
                memo: memo.clone().unwrap_or_default(),
            })
        }
        IbcMsg::CloseChannel { channel_id } => {
            if contract_ibc_port_id.is_empty() {
                return Err(DispatchError::UnsupportedForContract(
                    "ibc not supported".to_string(),
                ));
            }
            single(MsgChannelCloseInit {
                port_id: contract_ibc_port_id.to_string(),
                channel_id: channel_id.clone(),
                signer: sender.to_string(),
            })
        }
        _ => Err(unknown_variant("IBC")),
    }
}

/// Encodes wasm messages.
/// # Errors
/// Returns an error if the funds are invalid.
pub fn encode_wasm_msg(sender: &Addr, msg: &WasmMsg) -> EncodeResult {
    match msg {
        WasmMsg::Execute {
            contract_addr,
            msg,
            funds,
        } => single(MsgExecuteContract {
            sender: sender.to_string(),
            contract: contract_addr.clone(),
            msg: msg.to_vec(),
            funds: convert_wasm_coins_to_proto_coins(funds)?,
        }),
        WasmMsg::Instantiate {
            admin,
            code_id,
            msg,
            funds,
            label,
        } => single(MsgInstantiateContract {
            sender: sender.to_string(),
            admin: admin.clone().unwrap_or_default(),
            code_id: *code_id,
            label: label.clone(),
            msg: msg.to_vec(),
            funds: convert_wasm_coins_to_proto_coins(funds)?,
        }),
        WasmMsg::Instantiate2 {
            admin,
            code_id,
            label,
            msg,
            funds,
            salt,
        } => single(MsgInstantiateContract2 {
            sender: sender.to_string(),
            admin: admin.clone().unwrap_or_default(),
            code_id: *code_id,
            label: label.clone(),
            msg: msg.to_vec(),
            funds: convert_wasm_coins_to_proto_coins(funds)?,
            salt: salt.to_vec(),
            fix_msg: false,
        }),
        WasmMsg::Migrate {
            contract_addr,
            new_code_id,
            msg,
        } => single(MsgMigrateContract {
            sender: sender.to_string(),
            contract: contract_addr.clone(),
            code_id: *new_code_id,
            msg: msg.to_vec(),
        }),
        WasmMsg::UpdateAdmin {
            contract_addr,
            admin,
        } => single(MsgUpdateAdmin {
            sender: sender.to_string(),
            new_admin: admin.clone(),
            contract: contract_addr.clone(),
        }),
        WasmMsg::ClearAdmin { contract_addr } => single(MsgClearAdmin {
            sender: sender.to_string(),
            contract: contract_addr.clone(),
        }),
        _ => Err(unknown_variant("Wasm")),
    }
}

/// Encodes `GovMsg::Vote`.
/// # Errors
/// Returns [`DispatchError::UnknownMsg`] for weighted votes.
pub fn encode_gov_msg(sender: &Addr, msg: &GovMsg) -> EncodeResult {
    match msg {
        GovMsg::Vote {
            proposal_id,
            option,
        } => single(MsgVote {
            proposal_id: *proposal_id,
            voter: sender.to_string(),
            option: convert_vote_option(option) as i32,
        }),
        GovMsg::VoteWeighted { .. } => Err(unknown_variant("Gov")),
    }
}

const fn convert_vote_option(option: &VoteOption) -> ProtoVoteOption {
    match option {
        VoteOption::Yes => ProtoVoteOption::Yes,
        VoteOption::No => ProtoVoteOption::No,
        VoteOption::Abstain => ProtoVoteOption::Abstain,
        VoteOption::NoWithVeto => ProtoVoteOption::NoWithVeto,
    }
}
