//! Mock host modules and messages for the handler tests

use std::{
    cell::RefCell,
    collections::HashMap,
    io,
    rc::Rc,
    sync::{Arc, Mutex},
};

use cosmwasm_std::{testing::mock_env, Addr, Coins, MemoryStorage};
use ibc_proto::{
    google::protobuf::Any,
    ibc::core::channel::v1::{Channel, Counterparty, Packet},
};
use serde_json::Value;

use crate::{
    context::Context,
    error::DispatchError,
    host_msg::HostMsg,
    keeper::{Burner, Capability, CapabilityKeeper, ChannelKeeper},
};

/// A context over the given storage at the mock block
#[must_use]
pub fn test_context(storage: &mut MemoryStorage) -> Context<'_> {
    Context::new(storage, mock_env().block)
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber formatting every `info` event and return the log lines
/// # Panics
/// Panics if the logs are not valid utf-8.
#[must_use]
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    let res = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    (res, logs.lines().map(ToString::to_string).collect())
}

/// A host message with free signers and payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestMsg {
    /// The declared signers
    pub signers: Vec<String>,
    /// An opaque payload
    pub payload: Value,
    /// The legacy route key
    pub route: Option<&'static str>,
}

impl TestMsg {
    /// The type url of every test message
    pub const TYPE_URL: &'static str = "/cw.message_handler.test.v1.MsgTest";

    /// A message declaring the given signers
    #[must_use]
    pub fn signed_by(signers: &[&str]) -> Self {
        Self {
            signers: signers.iter().map(ToString::to_string).collect(),
            payload: Value::Null,
            route: None,
        }
    }

    /// A message signed by `sender` carrying `payload`
    #[must_use]
    pub fn with_payload(sender: &str, payload: &Value) -> Self {
        Self {
            payload: payload.clone(),
            ..Self::signed_by(&[sender])
        }
    }

    /// Set the legacy route key
    #[must_use]
    pub const fn with_route(mut self, route: &'static str) -> Self {
        self.route = Some(route);
        self
    }
}

impl HostMsg for TestMsg {
    fn type_url(&self) -> &'static str {
        Self::TYPE_URL
    }

    fn legacy_route(&self) -> Option<&'static str> {
        self.route
    }

    fn signers(&self) -> Vec<&str> {
        self.signers.iter().map(String::as_str).collect()
    }

    fn validate_basic(&self) -> Result<(), DispatchError> {
        Ok(())
    }

    fn to_any(&self) -> Any {
        Any {
            type_url: Self::TYPE_URL.to_string(),
            value: self.payload.to_string().into_bytes(),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Default)]
struct ChannelStore {
    channels: HashMap<(String, String), Channel>,
    sent: Vec<(Capability, Packet)>,
    send_error: Option<String>,
}

/// Channel keeper keeping channels in memory and send sequences in the context store
#[derive(Clone, Default)]
pub struct MockChannelKeeper(Rc<RefCell<ChannelStore>>);

fn next_sequence_send_key(port_id: &str, channel_id: &str) -> Vec<u8> {
    format!("nextSequenceSend/ports/{port_id}/channels/{channel_id}").into_bytes()
}

impl MockChannelKeeper {
    /// Open a channel to the counterparty channel end
    pub fn open_channel(
        &self,
        port_id: &str,
        channel_id: &str,
        counterparty_port_id: &str,
        counterparty_channel_id: &str,
    ) {
        self.0.borrow_mut().channels.insert(
            (port_id.to_string(), channel_id.to_string()),
            Channel {
                counterparty: Some(Counterparty {
                    port_id: counterparty_port_id.to_string(),
                    channel_id: counterparty_channel_id.to_string(),
                }),
                ..Default::default()
            },
        );
    }

    /// Set the next send sequence of a channel
    pub fn set_next_sequence_send(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
    ) {
        ctx.storage_mut().set(
            &next_sequence_send_key(port_id, channel_id),
            &sequence.to_be_bytes(),
        );
    }

    /// Make every following send fail
    pub fn fail_sends_with(&self, err: &str) {
        self.0.borrow_mut().send_error = Some(err.to_string());
    }

    /// The packets sent so far with the capability they were sent with
    #[must_use]
    pub fn sent_packets(&self) -> Vec<(Capability, Packet)> {
        self.0.borrow().sent.clone()
    }
}

impl ChannelKeeper for MockChannelKeeper {
    fn get_next_sequence_send(
        &self,
        ctx: &Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Option<u64> {
        let bz = ctx
            .storage()
            .get(&next_sequence_send_key(port_id, channel_id))?;
        Some(u64::from_be_bytes(bz.try_into().ok()?))
    }

    fn get_channel(&self, _: &Context<'_>, port_id: &str, channel_id: &str) -> Option<Channel> {
        self.0
            .borrow()
            .channels
            .get(&(port_id.to_string(), channel_id.to_string()))
            .cloned()
    }

    fn send_packet(
        &self,
        ctx: &mut Context<'_>,
        channel_cap: &Capability,
        packet: Packet,
    ) -> anyhow::Result<()> {
        if let Some(err) = &self.0.borrow().send_error {
            anyhow::bail!("{err}");
        }
        let sequence = self
            .get_next_sequence_send(ctx, &packet.source_port, &packet.source_channel)
            .ok_or_else(|| anyhow::anyhow!("sequence send not found"))?;
        anyhow::ensure!(sequence == packet.sequence, "packet sequence mismatch");

        self.set_next_sequence_send(
            ctx,
            &packet.source_port,
            &packet.source_channel,
            sequence + 1,
        );
        self.0
            .borrow_mut()
            .sent
            .push((channel_cap.clone(), packet));
        Ok(())
    }
}

/// Capability keeper owning the claimed capabilities
#[derive(Clone, Default)]
pub struct MockCapabilityKeeper(Rc<RefCell<HashMap<String, Capability>>>);

impl MockCapabilityKeeper {
    /// Claim the capability under the name
    pub fn claim(&self, name: &str, cap: Capability) {
        self.0.borrow_mut().insert(name.to_string(), cap);
    }
}

impl CapabilityKeeper for MockCapabilityKeeper {
    fn get_capability(&self, _: &Context<'_>, name: &str) -> Option<Capability> {
        self.0.borrow().get(name).cloned()
    }
}

/// A call made to the [`RecordingBurner`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BurnerCall {
    /// `send_coins_from_account_to_module`
    SendToModule {
        /// The account sending the coins
        sender: String,
        /// The receiving module
        module: String,
        /// The coins sent
        amount: String,
    },
    /// `burn_coins`
    Burn {
        /// The module burning the coins
        module: String,
        /// The coins burned
        amount: String,
    },
}

/// Burner recording its calls, optionally failing them
#[derive(Clone, Default)]
pub struct RecordingBurner {
    calls: Rc<RefCell<Vec<BurnerCall>>>,
    send_error: Option<String>,
    burn_error: Option<String>,
}

impl RecordingBurner {
    /// Fail every transfer to the module account
    #[must_use]
    pub fn fail_send_with(mut self, err: &str) -> Self {
        self.send_error = Some(err.to_string());
        self
    }

    /// Fail every burn
    #[must_use]
    pub fn fail_burn_with(mut self, err: &str) -> Self {
        self.burn_error = Some(err.to_string());
        self
    }

    /// The calls made so far
    #[must_use]
    pub fn calls(&self) -> Vec<BurnerCall> {
        self.calls.borrow().clone()
    }
}

impl Burner for RecordingBurner {
    fn send_coins_from_account_to_module(
        &self,
        _: &mut Context<'_>,
        sender: &Addr,
        recipient_module: &str,
        amount: &Coins,
    ) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(BurnerCall::SendToModule {
            sender: sender.to_string(),
            module: recipient_module.to_string(),
            amount: amount.to_string(),
        });
        self.send_error
            .as_ref()
            .map_or(Ok(()), |err| Err(anyhow::anyhow!("{err}")))
    }

    fn burn_coins(
        &self,
        _: &mut Context<'_>,
        module_name: &str,
        amount: &Coins,
    ) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(BurnerCall::Burn {
            module: module_name.to_string(),
            amount: amount.to_string(),
        });
        self.burn_error
            .as_ref()
            .map_or(Ok(()), |err| Err(anyhow::anyhow!("{err}")))
    }
}
