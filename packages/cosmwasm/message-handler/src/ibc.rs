//! IBC naming and conversion helpers.

use cosmwasm_std::{IbcTimeout, IbcTimeoutBlock};
use ibc_proto::ibc::core::client::v1::Height;

use crate::error::DispatchError;

/// The port prefix of contracts with IBC entry points.
pub const DEFAULT_CONTRACT_PORT_PREFIX: &str = "wasm.";

/// The port id bound to a contract: `<prefix><contract address>`.
#[must_use]
pub fn port_id_for_contract(prefix: &str, contract_addr: &str) -> String {
    format!("{prefix}{contract_addr}")
}

/// The contract address bound to a port id.
/// # Errors
/// Returns an error if the port was not bound by a contract.
pub fn contract_from_port_id<'a>(prefix: &str, port_id: &'a str) -> Result<&'a str, DispatchError> {
    port_id
        .strip_prefix(prefix)
        .filter(|addr| !addr.is_empty())
        .ok_or_else(|| DispatchError::InvalidRequest(format!("port {port_id} is not a contract port")))
}

/// The capability path of a channel end.
#[must_use]
pub fn channel_capability_path(port_id: &str, channel_id: &str) -> String {
    format!("capabilities/ports/{port_id}/channels/{channel_id}")
}

/// Converts the block timeout of a contract message into a client height.
/// A missing block timeout is the zero height, which disables the height timeout.
#[must_use]
pub fn convert_wasm_ibc_timeout_height_to_cosmos_height(block: Option<IbcTimeoutBlock>) -> Height {
    block.map_or_else(Height::default, |b| Height {
        revision_number: b.revision,
        revision_height: b.height,
    })
}

/// Converts the timestamp timeout of a contract message into unix nanoseconds.
/// A missing timestamp is `0`, which disables the timestamp timeout.
#[must_use]
pub fn convert_wasm_ibc_timeout_timestamp(timeout: &IbcTimeout) -> u64 {
    timeout.timestamp().map_or(0, |t| t.nanos())
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::Timestamp;

    use super::*;

    #[test]
    fn test_contract_port_roundtrip() {
        let port = port_id_for_contract(DEFAULT_CONTRACT_PORT_PREFIX, "cosmwasm1abc");
        assert_eq!("wasm.cosmwasm1abc", port);
        assert_eq!(
            "cosmwasm1abc",
            contract_from_port_id(DEFAULT_CONTRACT_PORT_PREFIX, &port).unwrap()
        );
        assert!(contract_from_port_id(DEFAULT_CONTRACT_PORT_PREFIX, "transfer").is_err());
        assert!(contract_from_port_id(DEFAULT_CONTRACT_PORT_PREFIX, "wasm.").is_err());
    }

    #[test]
    fn test_channel_capability_path() {
        assert_eq!(
            "capabilities/ports/wasm.c1/channels/channel-0",
            channel_capability_path("wasm.c1", "channel-0")
        );
    }

    #[test]
    fn test_convert_timeouts() {
        let timeout = IbcTimeout::with_both(
            IbcTimeoutBlock {
                revision: 1,
                height: 1000,
            },
            Timestamp::from_nanos(42),
        );
        assert_eq!(
            Height {
                revision_number: 1,
                revision_height: 1000,
            },
            convert_wasm_ibc_timeout_height_to_cosmos_height(timeout.block())
        );
        assert_eq!(42, convert_wasm_ibc_timeout_timestamp(&timeout));

        let timeout = IbcTimeout::with_timestamp(Timestamp::from_nanos(7));
        assert_eq!(
            Height::default(),
            convert_wasm_ibc_timeout_height_to_cosmos_height(timeout.block())
        );
    }
}
