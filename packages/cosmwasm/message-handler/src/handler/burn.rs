//! Burns coins held by a contract.

use cosmwasm_std::{Addr, BankMsg, CosmosMsg};

use super::Messenger;
use crate::{
    coins::convert_wasm_coins_to_host_coins,
    context::Context,
    error::DispatchError,
    keeper::Burner,
    msg::{ContractMsg, DispatchResponse},
};

/// Handles `BankMsg::Burn` by moving the coins into a module account and
/// burning them there.
pub struct BurnCoinMessageHandler {
    burner: Box<dyn Burner>,
    module_name: String,
}

impl BurnCoinMessageHandler {
    /// Create a handler burning through the account of `module_name`.
    #[must_use]
    pub fn new(burner: Box<dyn Burner>, module_name: impl Into<String>) -> Self {
        Self {
            burner,
            module_name: module_name.into(),
        }
    }
}

impl Messenger for BurnCoinMessageHandler {
    fn dispatch_msg(
        &self,
        ctx: &mut Context<'_>,
        contract_addr: &Addr,
        _contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> Result<DispatchResponse, DispatchError> {
        let CosmosMsg::Bank(BankMsg::Burn { amount }) = msg else {
            return Err(DispatchError::UnknownMsg(
                "not a bank burn message".to_string(),
            ));
        };

        let coins = convert_wasm_coins_to_host_coins(amount)?;
        self.burner
            .send_coins_from_account_to_module(ctx, contract_addr, &self.module_name, &coins)
            .map_err(DispatchError::wrap("transfer to module"))?;
        self.burner
            .burn_coins(ctx, &self.module_name, &coins)
            .map_err(DispatchError::wrap("burn coins"))?;

        tracing::info!(
            parent: &ctx.module_logger(&self.module_name),
            amount = %coins,
            "Burned"
        );
        Ok(DispatchResponse::default())
    }
}

impl std::fmt::Debug for BurnCoinMessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BurnCoinMessageHandler")
            .field("module_name", &self.module_name)
            .finish_non_exhaustive()
    }
}
