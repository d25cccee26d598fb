//! Makes sure a contract only acts on its own behalf.

use cosmwasm_std::Addr;

use crate::{error::DispatchError, host_msg::HostMsg};

/// Checks that the contract is the one and only signer of the message.
/// A message without signers is rejected as well.
/// # Errors
/// Returns [`DispatchError::Unauthorized`] if any signer is not the contract.
pub fn authorize_signers(msg: &dyn HostMsg, contract_addr: &Addr) -> Result<(), DispatchError> {
    let signers = msg.signers();
    if signers.is_empty() || signers.iter().any(|s| *s != contract_addr.as_str()) {
        return Err(DispatchError::Unauthorized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::MockApi;

    use super::*;
    use crate::test::helpers::TestMsg;

    #[test]
    fn test_contract_is_sole_signer() {
        let contract = MockApi::default().addr_make("contract");
        let msg = TestMsg::signed_by(&[contract.as_str()]);
        authorize_signers(&msg, &contract).unwrap();

        // the same signer listed twice is still only the contract
        let msg = TestMsg::signed_by(&[contract.as_str(), contract.as_str()]);
        authorize_signers(&msg, &contract).unwrap();
    }

    #[test]
    fn test_other_signer_rejected() {
        let api = MockApi::default();
        let contract = api.addr_make("contract");
        let other = api.addr_make("other");

        let msg = TestMsg::signed_by(&[other.as_str()]);
        assert!(matches!(
            authorize_signers(&msg, &contract),
            Err(DispatchError::Unauthorized)
        ));

        let msg = TestMsg::signed_by(&[contract.as_str(), other.as_str()]);
        assert!(matches!(
            authorize_signers(&msg, &contract),
            Err(DispatchError::Unauthorized)
        ));
    }

    #[test]
    fn test_no_signers_rejected() {
        let contract = MockApi::default().addr_make("contract");
        let msg = TestMsg::signed_by(&[]);
        assert!(matches!(
            authorize_signers(&msg, &contract),
            Err(DispatchError::Unauthorized)
        ));
    }
}
