//! Chain of responsibility over [`Messenger`]s.

use cosmwasm_std::Addr;

use super::Messenger;
use crate::{
    context::Context,
    error::DispatchError,
    msg::{ContractMsg, DispatchResponse},
};

/// Offers a message to each handler in order until one recognizes it.
pub struct MessageHandlerChain {
    handlers: Vec<Box<dyn Messenger>>,
}

impl MessageHandlerChain {
    /// Create a chain trying the handlers in the given order.
    /// # Panics
    /// Panics if `handlers` is empty.
    #[must_use]
    pub fn new(handlers: Vec<Box<dyn Messenger>>) -> Self {
        assert!(
            !handlers.is_empty(),
            "message handler chain requires at least one handler"
        );
        Self { handlers }
    }

    /// Create a chain trying `first` before `others`.
    #[must_use]
    pub fn new_with_first(
        first: Box<dyn Messenger>,
        others: impl IntoIterator<Item = Box<dyn Messenger>>,
    ) -> Self {
        Self {
            handlers: std::iter::once(first).chain(others).collect(),
        }
    }

    /// The number of handlers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Always `false`, a chain holds at least one handler.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Messenger for MessageHandlerChain {
    fn dispatch_msg(
        &self,
        ctx: &mut Context<'_>,
        contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> Result<DispatchResponse, DispatchError> {
        for (i, handler) in self.handlers.iter().enumerate() {
            match handler.dispatch_msg(ctx, contract_addr, contract_ibc_port_id, msg) {
                Err(err) if err.is_unknown_msg() => {
                    tracing::debug!(parent: ctx.logger(), handler = i, %err, "falling through");
                }
                res => return res,
            }
        }
        Err(DispatchError::NoHandlerFound)
    }
}

impl std::fmt::Debug for MessageHandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandlerChain")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use cosmwasm_std::{coins, testing::MockApi, BankMsg, Binary, CosmosMsg, Event, MemoryStorage};

    use super::*;
    use crate::{handler::MessageHandlerFunc, test::helpers::test_context};

    type Calls = Rc<RefCell<Vec<&'static str>>>;

    fn unknown(name: &'static str, calls: &Calls) -> Box<dyn Messenger> {
        let calls = Rc::clone(calls);
        Box::new(MessageHandlerFunc::new(move |_, _, _, _| {
            calls.borrow_mut().push(name);
            Err(DispatchError::UnknownMsg(name.to_string()))
        }))
    }

    fn handled(name: &'static str, calls: &Calls) -> Box<dyn Messenger> {
        let calls = Rc::clone(calls);
        Box::new(MessageHandlerFunc::new(move |_, _, _, _| {
            calls.borrow_mut().push(name);
            Ok(DispatchResponse {
                events: vec![Event::new(name)],
                data: vec![Binary::from(name.as_bytes())],
            })
        }))
    }

    fn failing(name: &'static str, calls: &Calls) -> Box<dyn Messenger> {
        let calls = Rc::clone(calls);
        Box::new(MessageHandlerFunc::new(move |_, _, _, _| {
            calls.borrow_mut().push(name);
            Err(DispatchError::Unauthorized)
        }))
    }

    fn burn_msg() -> ContractMsg {
        CosmosMsg::Bank(BankMsg::Burn {
            amount: coins(100, "uatom"),
        })
    }

    #[test]
    fn test_first_recognizing_handler_wins() {
        let mut storage = MemoryStorage::new();
        let mut ctx = test_context(&mut storage);
        let contract = MockApi::default().addr_make("c1");
        let calls = Calls::default();

        let chain = MessageHandlerChain::new(vec![
            unknown("a", &calls),
            unknown("b", &calls),
            handled("c", &calls),
            handled("d", &calls),
        ]);
        let res = chain.dispatch_msg(&mut ctx, &contract, "", &burn_msg()).unwrap();

        assert_eq!(vec![Event::new("c")], res.events);
        assert_eq!(vec![Binary::from(b"c")], res.data);
        assert_eq!(vec!["a", "b", "c"], *calls.borrow());
    }

    #[test]
    fn test_real_errors_short_circuit() {
        let mut storage = MemoryStorage::new();
        let mut ctx = test_context(&mut storage);
        let contract = MockApi::default().addr_make("c1");
        let calls = Calls::default();

        let chain = MessageHandlerChain::new_with_first(
            unknown("a", &calls),
            [failing("b", &calls), handled("c", &calls)],
        );
        let err = chain
            .dispatch_msg(&mut ctx, &contract, "", &burn_msg())
            .unwrap_err();

        assert!(matches!(err, DispatchError::Unauthorized));
        assert_eq!(vec!["a", "b"], *calls.borrow());
    }

    #[test]
    fn test_no_handler_found() {
        let mut storage = MemoryStorage::new();
        let mut ctx = test_context(&mut storage);
        let contract = MockApi::default().addr_make("c1");
        let calls = Calls::default();

        let chain = MessageHandlerChain::new(vec![
            unknown("a", &calls),
            unknown("b", &calls),
            unknown("c", &calls),
        ]);
        let err = chain
            .dispatch_msg(&mut ctx, &contract, "", &burn_msg())
            .unwrap_err();

        assert!(matches!(err, DispatchError::NoHandlerFound));
        assert!(!err.is_unknown_msg());
        assert_eq!(vec!["a", "b", "c"], *calls.borrow());
    }

    #[test]
    fn test_nested_chain_reports_no_handler_found() {
        let mut storage = MemoryStorage::new();
        let mut ctx = test_context(&mut storage);
        let contract = MockApi::default().addr_make("c1");
        let calls = Calls::default();

        let inner = MessageHandlerChain::new(vec![unknown("a", &calls)]);
        let outer = MessageHandlerChain::new_with_first(Box::new(inner), [handled("b", &calls)]);
        assert_eq!(2, outer.len());

        // an exhausted inner chain is a terminal error, not a fall through
        let err = outer
            .dispatch_msg(&mut ctx, &contract, "", &burn_msg())
            .unwrap_err();
        assert!(matches!(err, DispatchError::NoHandlerFound));
        assert_eq!(vec!["a"], *calls.borrow());
    }

    #[test]
    #[should_panic(expected = "at least one handler")]
    fn test_empty_chain_panics() {
        let _ = MessageHandlerChain::new(vec![]);
    }
}
