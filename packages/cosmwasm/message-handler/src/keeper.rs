//! The host modules the handlers depend on.

use cosmwasm_std::{Addr, Coins};
use ibc_proto::ibc::core::channel::v1::{Channel, Packet};

use crate::context::Context;

/// An unforgeable token granting its owner the right to act on an IBC channel end.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Capability {
    index: u64,
}

impl Capability {
    /// Create a capability with the index assigned by the capability store.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }

    /// The index assigned by the capability store.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }
}

/// Read and write access to IBC channels.
pub trait ChannelKeeper {
    /// The next sequence to send on the channel.
    fn get_next_sequence_send(&self, ctx: &Context<'_>, port_id: &str, channel_id: &str)
        -> Option<u64>;

    /// The channel end.
    fn get_channel(&self, ctx: &Context<'_>, port_id: &str, channel_id: &str) -> Option<Channel>;

    /// Commit to the packet and advance the next send sequence of its channel.
    /// # Errors
    /// Returns an error if the capability does not authenticate the channel or the
    /// packet is invalid.
    fn send_packet(
        &self,
        ctx: &mut Context<'_>,
        channel_cap: &Capability,
        packet: Packet,
    ) -> anyhow::Result<()>;
}

/// Lookup of the capabilities owned by this module.
pub trait CapabilityKeeper {
    /// The capability registered under the name, if this module owns it.
    fn get_capability(&self, ctx: &Context<'_>, name: &str) -> Option<Capability>;
}

/// Moves coins into a module account and destroys them.
pub trait Burner {
    /// Move coins from an account to the account of a module.
    /// # Errors
    /// Returns an error if the sender has insufficient funds.
    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        recipient_module: &str,
        amount: &Coins,
    ) -> anyhow::Result<()>;

    /// Destroy coins held by a module account.
    /// # Errors
    /// Returns an error if the module may not burn or holds insufficient funds.
    fn burn_coins(&self, ctx: &mut Context<'_>, module_name: &str, amount: &Coins)
        -> anyhow::Result<()>;
}

/// The port ICS-20 transfers are sent from.
pub trait Ics20TransferPortSource {
    /// The transfer port id.
    fn get_port(&self, ctx: &Context<'_>) -> String;
}

impl<T: Ics20TransferPortSource + ?Sized> Ics20TransferPortSource for Box<T> {
    fn get_port(&self, ctx: &Context<'_>) -> String {
        (**self).get_port(ctx)
    }
}

/// An [`Ics20TransferPortSource`] with a fixed port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticPortSource(pub String);

impl Ics20TransferPortSource for StaticPortSource {
    fn get_port(&self, _: &Context<'_>) -> String {
        self.0.clone()
    }
}
