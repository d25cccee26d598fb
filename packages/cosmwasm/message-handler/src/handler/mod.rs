//! The handlers a contract message is dispatched through.

mod burn;
mod chain;
mod ibc;
mod sdk;

use cosmwasm_std::Addr;

pub use burn::BurnCoinMessageHandler;
pub use chain::MessageHandlerChain;
pub use ibc::IbcRawPacketHandler;
pub use sdk::SdkMessageHandler;

use crate::{
    context::Context,
    error::DispatchError,
    msg::{ContractMsg, DispatchResponse},
};

/// Executes the messages emitted by a contract.
pub trait Messenger {
    /// Dispatch a message emitted by the contract.
    /// # Errors
    /// Returns [`DispatchError::UnknownMsg`] if the handler does not recognize the
    /// message, or the error of executing it.
    fn dispatch_msg(
        &self,
        ctx: &mut Context<'_>,
        contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> Result<DispatchResponse, DispatchError>;
}

impl<T: Messenger + ?Sized> Messenger for Box<T> {
    fn dispatch_msg(
        &self,
        ctx: &mut Context<'_>,
        contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> Result<DispatchResponse, DispatchError> {
        (**self).dispatch_msg(ctx, contract_addr, contract_ibc_port_id, msg)
    }
}

/// A [`Messenger`] backed by a closure.
pub struct MessageHandlerFunc<F>(F);

impl<F> MessageHandlerFunc<F> {
    /// Wrap the closure.
    pub const fn new(f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Addr, &str, &ContractMsg) -> Result<DispatchResponse, DispatchError>,
    {
        Self(f)
    }
}

impl<F> Messenger for MessageHandlerFunc<F>
where
    F: Fn(&mut Context<'_>, &Addr, &str, &ContractMsg) -> Result<DispatchResponse, DispatchError>,
{
    fn dispatch_msg(
        &self,
        ctx: &mut Context<'_>,
        contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> Result<DispatchResponse, DispatchError> {
        (self.0)(ctx, contract_addr, contract_ibc_port_id, msg)
    }
}

impl<F> std::fmt::Debug for MessageHandlerFunc<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandlerFunc").finish_non_exhaustive()
    }
}
