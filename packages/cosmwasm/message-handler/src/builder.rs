//! Defines the [`MessengerBuilder`] that assembles the default message handler chain.

use tracing::instrument;

use crate::{
    config::MessengerConfig,
    encoder::MessageEncoders,
    handler::{
        BurnCoinMessageHandler, IbcRawPacketHandler, MessageHandlerChain, SdkMessageHandler,
    },
    keeper::{Burner, CapabilityKeeper, ChannelKeeper, Ics20TransferPortSource, StaticPortSource},
    router::{LegacyRouter, MsgServiceRouter},
    unpacker::{AnyUnpacker, KnownMsgUnpacker},
};

/// Collects the host modules the handlers depend on and builds the chain
/// `[SdkMessageHandler, IbcRawPacketHandler, BurnCoinMessageHandler]`.
#[derive(Default)]
#[allow(clippy::module_name_repetitions)]
pub struct MessengerBuilder {
    config: MessengerConfig,
    legacy_router: Option<Box<dyn LegacyRouter>>,
    msg_service_router: Option<Box<dyn MsgServiceRouter>>,
    channel_keeper: Option<Box<dyn ChannelKeeper>>,
    capability_keeper: Option<Box<dyn CapabilityKeeper>>,
    burner: Option<Box<dyn Burner>>,
    unpacker: Option<Box<dyn AnyUnpacker>>,
    port_source: Option<Box<dyn Ics20TransferPortSource>>,
    custom_encoders: Vec<MessageEncoders>,
}

impl MessengerBuilder {
    /// Create a new `MessengerBuilder` with the given configuration.
    #[must_use]
    pub fn new(config: MessengerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the legacy route table.
    #[must_use]
    pub fn legacy_router(mut self, router: impl LegacyRouter + 'static) -> Self {
        self.legacy_router = Some(Box::new(router));
        self
    }

    /// Set the message service router.
    #[must_use]
    pub fn msg_service_router(mut self, router: impl MsgServiceRouter + 'static) -> Self {
        self.msg_service_router = Some(Box::new(router));
        self
    }

    /// Set the channel keeper packets are sent through.
    #[must_use]
    pub fn channel_keeper(mut self, keeper: impl ChannelKeeper + 'static) -> Self {
        self.channel_keeper = Some(Box::new(keeper));
        self
    }

    /// Set the keeper owning the channel capabilities.
    #[must_use]
    pub fn capability_keeper(mut self, keeper: impl CapabilityKeeper + 'static) -> Self {
        self.capability_keeper = Some(Box::new(keeper));
        self
    }

    /// Set the module burning coins.
    #[must_use]
    pub fn burner(mut self, burner: impl Burner + 'static) -> Self {
        self.burner = Some(Box::new(burner));
        self
    }

    /// Replace the default [`KnownMsgUnpacker`].
    #[must_use]
    pub fn unpacker(mut self, unpacker: impl AnyUnpacker + 'static) -> Self {
        self.unpacker = Some(Box::new(unpacker));
        self
    }

    /// Replace the transfer port of the configuration.
    #[must_use]
    pub fn port_source(mut self, port_source: impl Ics20TransferPortSource + 'static) -> Self {
        self.port_source = Some(Box::new(port_source));
        self
    }

    /// Merge encoders over the defaults.
    /// Encoders added later take precedence over those added earlier.
    #[must_use]
    pub fn add_encoders(mut self, encoders: MessageEncoders) -> Self {
        self.custom_encoders.push(encoders);
        self
    }

    /// Build the default message handler chain.
    /// # Errors
    /// Returns an error if a required host module was not set.
    #[instrument(skip_all, fields(module_name = %self.config.module_name), err(Debug))]
    pub fn build(self) -> anyhow::Result<MessageHandlerChain> {
        let legacy_router = required(self.legacy_router, "legacy router")?;
        let msg_service_router = required(self.msg_service_router, "msg service router")?;
        let channel_keeper = required(self.channel_keeper, "channel keeper")?;
        let capability_keeper = required(self.capability_keeper, "capability keeper")?;
        let burner = required(self.burner, "burner")?;

        let unpacker = self
            .unpacker
            .unwrap_or_else(|| Box::new(KnownMsgUnpacker));
        let port_source = self
            .port_source
            .unwrap_or_else(|| Box::new(StaticPortSource(self.config.ics20_port.clone())));

        let encoders = self
            .custom_encoders
            .into_iter()
            .fold(MessageEncoders::default_encoders(unpacker, port_source), MessageEncoders::merge);

        tracing::debug!("Built default message handler chain");
        Ok(MessageHandlerChain::new(vec![
            Box::new(SdkMessageHandler::new(
                legacy_router,
                msg_service_router,
                Box::new(encoders),
            )),
            Box::new(IbcRawPacketHandler::new(channel_keeper, capability_keeper)),
            Box::new(BurnCoinMessageHandler::new(burner, self.config.module_name)),
        ]))
    }
}

fn required<T>(value: Option<T>, name: &str) -> anyhow::Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("{name} is required to build the message handler chain"))
}
