//! The two host routers a [`HostMsg`] can be executed through.
//!
//! The service router resolves messages by protobuf type url. The legacy route
//! table resolves them by route key and is only consulted for messages the
//! service router does not know.

use std::collections::HashMap;

use crate::{context::Context, host_msg::HostMsg, msg::HostResponse};

/// A host module entry point executing a message.
pub type MsgHandler = dyn Fn(&mut Context<'_>, &dyn HostMsg) -> anyhow::Result<HostResponse>;

/// Resolves handlers by message type url.
pub trait MsgServiceRouter {
    /// Returns the handler for the type url, if any.
    fn handler(&self, type_url: &str) -> Option<&MsgHandler>;
}

/// Resolves handlers by legacy route key.
pub trait LegacyRouter {
    /// Returns the handler for the route, if any.
    fn route(&self, path: &str) -> Option<&MsgHandler>;
}

/// In memory [`MsgServiceRouter`].
#[derive(Default)]
pub struct ServiceRouter {
    routes: HashMap<String, Box<MsgHandler>>,
}

impl ServiceRouter {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a message type url.
    /// # Panics
    /// Panics if a handler is already registered for the type url.
    pub fn add_route<F>(&mut self, type_url: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut Context<'_>, &dyn HostMsg) -> anyhow::Result<HostResponse> + 'static,
    {
        let type_url = type_url.into();
        assert!(
            !self.routes.contains_key(&type_url),
            "handler already registered for {type_url}"
        );
        self.routes.insert(type_url, Box::new(handler));
        self
    }
}

impl MsgServiceRouter for ServiceRouter {
    fn handler(&self, type_url: &str) -> Option<&MsgHandler> {
        self.routes.get(type_url).map(|h| &**h)
    }
}

/// In memory [`LegacyRouter`].
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<String, Box<MsgHandler>>,
}

impl RouteTable {
    /// Create an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a route key.
    /// # Panics
    /// Panics if the route key is empty or already registered.
    pub fn add_route<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut Context<'_>, &dyn HostMsg) -> anyhow::Result<HostResponse> + 'static,
    {
        let path = path.into();
        assert!(!path.is_empty(), "route expects a non-empty path");
        assert!(
            !self.routes.contains_key(&path),
            "route {path} has already been initialized"
        );
        self.routes.insert(path, Box::new(handler));
        self
    }
}

impl LegacyRouter for RouteTable {
    fn route(&self, path: &str) -> Option<&MsgHandler> {
        self.routes.get(path).map(|h| &**h)
    }
}
