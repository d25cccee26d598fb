//! Unpacking of protobuf [`Any`] messages sent by contracts.

use cosmos_sdk_proto::{
    cosmos::{
        bank::v1beta1::MsgSend,
        distribution::v1beta1::{
            MsgFundCommunityPool, MsgSetWithdrawAddress, MsgWithdrawDelegatorReward,
        },
        gov::v1beta1::MsgVote,
        staking::v1beta1::{MsgBeginRedelegate, MsgDelegate, MsgUndelegate},
    },
    cosmwasm::wasm::v1::{
        MsgClearAdmin, MsgExecuteContract, MsgInstantiateContract, MsgInstantiateContract2,
        MsgMigrateContract, MsgUpdateAdmin,
    },
};
use ibc_proto::{
    google::protobuf::Any,
    ibc::{applications::transfer::v1::MsgTransfer, core::channel::v1::MsgChannelCloseInit},
};

use crate::{
    error::DispatchError,
    host_msg::{HostMsg, SignedMsg},
};

/// Resolves an [`Any`] into a host message.
pub trait AnyUnpacker {
    /// Decode the message registered under the type url of `any`.
    /// # Errors
    /// Returns an error if the type url is not registered or the value does not decode.
    fn unpack_any(&self, any: &Any) -> Result<Box<dyn HostMsg>, DispatchError>;
}

impl<T: AnyUnpacker + ?Sized> AnyUnpacker for Box<T> {
    fn unpack_any(&self, any: &Any) -> Result<Box<dyn HostMsg>, DispatchError> {
        (**self).unpack_any(any)
    }
}

type Decoder = fn(&[u8]) -> Result<Box<dyn HostMsg>, DispatchError>;

fn decode<T: SignedMsg>(value: &[u8]) -> Result<Box<dyn HostMsg>, DispatchError> {
    Ok(Box::new(T::decode(value)?))
}

const KNOWN_MSGS: &[(&str, Decoder)] = &[
    (MsgSend::TYPE_URL, decode::<MsgSend>),
    (MsgDelegate::TYPE_URL, decode::<MsgDelegate>),
    (MsgUndelegate::TYPE_URL, decode::<MsgUndelegate>),
    (MsgBeginRedelegate::TYPE_URL, decode::<MsgBeginRedelegate>),
    (MsgSetWithdrawAddress::TYPE_URL, decode::<MsgSetWithdrawAddress>),
    (MsgWithdrawDelegatorReward::TYPE_URL, decode::<MsgWithdrawDelegatorReward>),
    (MsgFundCommunityPool::TYPE_URL, decode::<MsgFundCommunityPool>),
    (MsgVote::TYPE_URL, decode::<MsgVote>),
    (MsgTransfer::TYPE_URL, decode::<MsgTransfer>),
    (MsgChannelCloseInit::TYPE_URL, decode::<MsgChannelCloseInit>),
    (MsgExecuteContract::TYPE_URL, decode::<MsgExecuteContract>),
    (MsgInstantiateContract::TYPE_URL, decode::<MsgInstantiateContract>),
    (MsgInstantiateContract2::TYPE_URL, decode::<MsgInstantiateContract2>),
    (MsgMigrateContract::TYPE_URL, decode::<MsgMigrateContract>),
    (MsgUpdateAdmin::TYPE_URL, decode::<MsgUpdateAdmin>),
    (MsgClearAdmin::TYPE_URL, decode::<MsgClearAdmin>),
];

/// Unpacks every message type this crate implements [`SignedMsg`] for.
#[derive(Clone, Copy, Debug, Default)]
pub struct KnownMsgUnpacker;

impl KnownMsgUnpacker {
    /// The type urls this unpacker resolves.
    pub fn type_urls() -> impl Iterator<Item = &'static str> {
        KNOWN_MSGS.iter().map(|(type_url, _)| *type_url)
    }
}

impl AnyUnpacker for KnownMsgUnpacker {
    fn unpack_any(&self, any: &Any) -> Result<Box<dyn HostMsg>, DispatchError> {
        let (_, decoder) = KNOWN_MSGS
            .iter()
            .find(|(type_url, _)| *type_url == any.type_url)
            .ok_or_else(|| {
                DispatchError::InvalidRequest(format!(
                    "cannot unpack proto message with type url: {}",
                    any.type_url
                ))
            })?;
        decoder(&any.value)
    }
}
