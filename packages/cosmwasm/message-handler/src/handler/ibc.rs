//! Sends raw IBC packets on the channels bound to a contract.

use cosmwasm_std::{Addr, Binary, CosmosMsg, IbcMsg, IbcTimeout};
use ibc_proto::ibc::core::channel::v1::Packet;

use super::Messenger;
use crate::{
    context::Context,
    error::DispatchError,
    ibc::{
        channel_capability_path, convert_wasm_ibc_timeout_height_to_cosmos_height,
        convert_wasm_ibc_timeout_timestamp,
    },
    keeper::{CapabilityKeeper, ChannelKeeper},
    msg::{ContractMsg, DispatchResponse},
};

/// Handles `IbcMsg::SendPacket`, every other message is unknown to it.
pub struct IbcRawPacketHandler {
    channel_keeper: Box<dyn ChannelKeeper>,
    capability_keeper: Box<dyn CapabilityKeeper>,
}

impl IbcRawPacketHandler {
    /// Create a handler sending through the given channel keeper.
    #[must_use]
    pub fn new(
        channel_keeper: Box<dyn ChannelKeeper>,
        capability_keeper: Box<dyn CapabilityKeeper>,
    ) -> Self {
        Self {
            channel_keeper,
            capability_keeper,
        }
    }

    fn send_packet(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
        data: &Binary,
        timeout: &IbcTimeout,
    ) -> Result<(), DispatchError> {
        if port_id.is_empty() {
            return Err(DispatchError::UnsupportedForContract(
                "ibc not supported".to_string(),
            ));
        }
        if channel_id.is_empty() {
            return Err(DispatchError::Empty("ibc channel".to_string()));
        }

        let sequence = self
            .channel_keeper
            .get_next_sequence_send(ctx, port_id, channel_id)
            .ok_or_else(|| DispatchError::SequenceSendNotFound {
                port_id: port_id.to_string(),
                channel_id: channel_id.to_string(),
            })?;

        let counterparty = self
            .channel_keeper
            .get_channel(ctx, port_id, channel_id)
            .and_then(|channel| channel.counterparty)
            .ok_or_else(|| DispatchError::InvalidChannel {
                port_id: port_id.to_string(),
                channel_id: channel_id.to_string(),
            })?;

        let channel_cap = self
            .capability_keeper
            .get_capability(ctx, &channel_capability_path(port_id, channel_id))
            .ok_or(DispatchError::ChannelCapabilityNotFound)?;

        let packet = Packet {
            sequence,
            source_port: port_id.to_string(),
            source_channel: channel_id.to_string(),
            destination_port: counterparty.port_id,
            destination_channel: counterparty.channel_id,
            data: data.to_vec(),
            timeout_height: Some(convert_wasm_ibc_timeout_height_to_cosmos_height(
                timeout.block(),
            )),
            timeout_timestamp: convert_wasm_ibc_timeout_timestamp(timeout),
        };

        tracing::debug!(
            parent: ctx.logger(),
            sequence,
            port_id,
            channel_id,
            "sending packet"
        );
        Ok(self.channel_keeper.send_packet(ctx, &channel_cap, packet)?)
    }
}

impl Messenger for IbcRawPacketHandler {
    fn dispatch_msg(
        &self,
        ctx: &mut Context<'_>,
        _contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> Result<DispatchResponse, DispatchError> {
        let CosmosMsg::Ibc(IbcMsg::SendPacket {
            channel_id,
            data,
            timeout,
        }) = msg
        else {
            return Err(DispatchError::UnknownMsg(
                "not an ibc send packet message".to_string(),
            ));
        };

        self.send_packet(ctx, contract_ibc_port_id, channel_id, data, timeout)?;
        Ok(DispatchResponse::default())
    }
}

impl std::fmt::Debug for IbcRawPacketHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IbcRawPacketHandler").finish_non_exhaustive()
    }
}
