//! Messages flowing in and out of the dispatcher.

use cosmwasm_std::{Binary, CosmosMsg, CustomMsg, Event};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A message emitted by a contract.
pub type ContractMsg = CosmosMsg<RawCustomMsg>;

/// The opaque JSON payload of a [`CosmosMsg::Custom`] message.
/// Only custom encoders registered by the chain know how to interpret it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct RawCustomMsg(pub serde_json::Value);

impl CustomMsg for RawCustomMsg {}

/// The result of a host module executing a single message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostResponse {
    /// The data returned by the module
    pub data: Binary,
    /// The events emitted by the module
    pub events: Vec<Event>,
}

/// The result of dispatching a contract message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchResponse {
    /// The events of all executed host messages, in execution order
    pub events: Vec<Event>,
    /// The data of all executed host messages, in execution order
    pub data: Vec<Binary>,
}

impl DispatchResponse {
    /// Append the result of one host message.
    pub fn push(&mut self, res: HostResponse) {
        self.data.push(res.data);
        self.events.extend(res.events);
    }
}
