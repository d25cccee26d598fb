//! Defines the [`DispatchError`] type.

use thiserror::Error;

/// Error types that can be returned while dispatching a contract message
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum DispatchError {
    /// The handler does not recognize the message variant.
    /// Only used to move on to the next handler of a chain.
    #[error("unknown message from the contract: {0}")]
    UnknownMsg(String),

    /// No handler of a chain recognized the message
    #[error("unknown message from the contract: no handler found")]
    NoHandlerFound,

    /// Structurally invalid message
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid coin amount or denomination
    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    /// Invalid bech32 address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A declared signer is not the contract
    #[error("unauthorized: contract doesn't have permission")]
    Unauthorized,

    /// No router knows how to execute the message
    #[error("unknown request: {0}")]
    UnknownRequest(String),

    /// The contract can not use this feature
    #[error("unsupported for this contract: {0}")]
    UnsupportedForContract(String),

    /// A required field is empty
    #[error("empty value: {0}")]
    Empty(String),

    /// The channel store has no next send sequence for the channel
    #[error("sequence send not found: source port: {port_id}, source channel: {channel_id}")]
    SequenceSendNotFound {
        /// The source port
        port_id: String,
        /// The source channel
        channel_id: String,
    },

    /// The channel does not exist
    #[error("invalid channel: not found: port: {port_id}, channel: {channel_id}")]
    InvalidChannel {
        /// The source port
        port_id: String,
        /// The source channel
        channel_id: String,
    },

    /// The module does not own the channel capability
    #[error("channel capability not found: module does not own channel capability")]
    ChannelCapabilityNotFound,

    /// A host module failed, labeled with the step that failed
    #[error("{context}: {source}")]
    External {
        /// The step that failed
        context: &'static str,
        /// The host module error
        #[source]
        source: anyhow::Error,
    },

    /// A host module failed, propagated unchanged
    #[error(transparent)]
    Host(#[from] anyhow::Error),

    /// Prost decoding error
    #[error("prost decoding error: {0}")]
    ProstDecodeError(#[from] prost::DecodeError),
}

impl DispatchError {
    /// Returns `true` if the error only signals that the message variant was not recognized.
    #[must_use]
    pub const fn is_unknown_msg(&self) -> bool {
        matches!(self, Self::UnknownMsg(_))
    }

    /// Returns a closure wrapping a host module error with the given label.
    pub fn wrap(context: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::External { context, source }
    }
}
