//! Dispatches encoded host messages through the host routers.

use cosmwasm_std::Addr;

use super::Messenger;
use crate::{
    authz::authorize_signers,
    context::Context,
    encoder::MessageEncoder,
    error::DispatchError,
    host_msg::HostMsg,
    msg::{ContractMsg, DispatchResponse, HostResponse},
    router::{LegacyRouter, MsgServiceRouter},
};

/// Encodes contract messages and executes the resulting host messages on
/// behalf of the contract.
pub struct SdkMessageHandler {
    legacy_router: Box<dyn LegacyRouter>,
    msg_service_router: Box<dyn MsgServiceRouter>,
    encoders: Box<dyn MessageEncoder>,
}

impl SdkMessageHandler {
    /// Create a handler routing through the given routers.
    #[must_use]
    pub fn new(
        legacy_router: Box<dyn LegacyRouter>,
        msg_service_router: Box<dyn MsgServiceRouter>,
        encoders: Box<dyn MessageEncoder>,
    ) -> Self {
        Self {
            legacy_router,
            msg_service_router,
            encoders,
        }
    }

    fn handle_sdk_message(
        &self,
        ctx: &mut Context<'_>,
        contract_addr: &Addr,
        msg: &dyn HostMsg,
    ) -> Result<HostResponse, DispatchError> {
        msg.validate_basic()?;
        authorize_signers(msg, contract_addr)?;

        if let Some(handler) = self.msg_service_router.handler(msg.type_url()) {
            return Ok(handler(ctx, msg)?);
        }

        let Some(route) = msg.legacy_route() else {
            tracing::debug!(parent: ctx.logger(), type_url = msg.type_url(), "no route");
            return Err(DispatchError::UnknownRequest(format!(
                "can't route message {}",
                msg.type_url()
            )));
        };
        let handler = self.legacy_router.route(route).ok_or_else(|| {
            tracing::debug!(parent: ctx.logger(), route, "no legacy route");
            DispatchError::UnknownRequest(format!("unrecognized message route: {route}"))
        })?;
        Ok(handler(ctx, msg)?)
    }
}

impl Messenger for SdkMessageHandler {
    fn dispatch_msg(
        &self,
        ctx: &mut Context<'_>,
        contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> Result<DispatchResponse, DispatchError> {
        let host_msgs = self
            .encoders
            .encode(ctx, contract_addr, contract_ibc_port_id, msg)?;

        let mut res = DispatchResponse::default();
        for host_msg in &host_msgs {
            res.push(self.handle_sdk_message(ctx, contract_addr, host_msg.as_ref())?);
        }
        Ok(res)
    }
}

impl std::fmt::Debug for SdkMessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkMessageHandler").finish_non_exhaustive()
    }
}
