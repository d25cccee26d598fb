//! Defines the [`Context`] every handler and host module receives.

use cosmwasm_std::{BlockInfo, Storage};
use tracing::Span;

/// The state of the enclosing transaction.
///
/// All host modules read and write through the context's store, so dropping the
/// transaction drops every mutation made while dispatching.
pub struct Context<'a> {
    storage: &'a mut dyn Storage,
    block: BlockInfo,
    logger: Span,
}

impl<'a> Context<'a> {
    /// Create a new context over the transaction store.
    /// The logger is a span tagged with the block's chain id and height.
    #[must_use]
    pub fn new(storage: &'a mut dyn Storage, block: BlockInfo) -> Self {
        let logger = tracing::info_span!(
            "dispatch",
            chain_id = %block.chain_id,
            height = block.height
        );
        Self {
            storage,
            block,
            logger,
        }
    }

    /// The transaction store.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        &*self.storage
    }

    /// The transaction store, mutably.
    pub fn storage_mut(&mut self) -> &mut dyn Storage {
        &mut *self.storage
    }

    /// The logger of the context.
    #[must_use]
    pub const fn logger(&self) -> &Span {
        &self.logger
    }

    /// A child logger tagged with `module = "x/<module_name>"`.
    #[must_use]
    pub fn module_logger(&self, module_name: &str) -> Span {
        tracing::info_span!(
            parent: &self.logger,
            "module",
            module = %format_args!("x/{module_name}")
        )
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}
