//! Encoding of contract messages into host messages.
//!
//! A [`MessageEncoders`] set holds at most one encoder per [`CosmosMsg`] variant.
//! Chains extend or override the defaults by merging their own set on top.

mod default;

use cosmwasm_std::{
    Addr, BankMsg, CosmosMsg, DistributionMsg, GovMsg, IbcMsg, StakingMsg, WasmMsg,
};
use ibc_proto::google::protobuf::Any;

pub use default::{
    encode_bank_msg, encode_custom_msg, encode_distribution_msg, encode_gov_msg,
    encode_ibc_msg, encode_staking_msg, encode_stargate_msg, encode_wasm_msg,
};

use crate::{
    context::Context,
    error::DispatchError,
    host_msg::HostMsg,
    keeper::Ics20TransferPortSource,
    msg::{ContractMsg, RawCustomMsg},
    unpacker::AnyUnpacker,
};

/// The host messages a contract message encodes into.
pub type EncodeResult = Result<Vec<Box<dyn HostMsg>>, DispatchError>;

/// Encodes [`CosmosMsg::Bank`]
pub type BankEncoder = Box<dyn Fn(&Addr, &BankMsg) -> EncodeResult>;
/// Encodes [`CosmosMsg::Custom`]
pub type CustomEncoder = Box<dyn Fn(&Addr, &RawCustomMsg) -> EncodeResult>;
/// Encodes [`CosmosMsg::Distribution`]
pub type DistributionEncoder = Box<dyn Fn(&Addr, &DistributionMsg) -> EncodeResult>;
/// Encodes [`CosmosMsg::Staking`]
pub type StakingEncoder = Box<dyn Fn(&Addr, &StakingMsg) -> EncodeResult>;
/// Encodes [`CosmosMsg::Any`] and the deprecated `CosmosMsg::Stargate`
pub type StargateEncoder = Box<dyn Fn(&Addr, &Any) -> EncodeResult>;
/// Encodes [`CosmosMsg::Wasm`]
pub type WasmEncoder = Box<dyn Fn(&Addr, &WasmMsg) -> EncodeResult>;
/// Encodes [`CosmosMsg::Ibc`], given the IBC port of the contract
pub type IbcEncoder = Box<dyn Fn(&Context<'_>, &Addr, &str, &IbcMsg) -> EncodeResult>;
/// Encodes [`CosmosMsg::Gov`]
pub type GovEncoder = Box<dyn Fn(&Addr, &GovMsg) -> EncodeResult>;

/// Converts a contract message into host messages.
pub trait MessageEncoder {
    /// Encode the message emitted by the contract.
    /// # Errors
    /// Returns [`DispatchError::UnknownMsg`] if the variant has no encoder, or the
    /// encoder's error if the message is malformed.
    fn encode(
        &self,
        ctx: &Context<'_>,
        contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> EncodeResult;
}

/// One optional encoder per contract message variant.
#[derive(Default)]
pub struct MessageEncoders {
    /// Bank encoder
    pub bank: Option<BankEncoder>,
    /// Custom encoder
    pub custom: Option<CustomEncoder>,
    /// Distribution encoder
    pub distribution: Option<DistributionEncoder>,
    /// IBC encoder
    pub ibc: Option<IbcEncoder>,
    /// Staking encoder
    pub staking: Option<StakingEncoder>,
    /// Stargate / Any encoder
    pub stargate: Option<StargateEncoder>,
    /// Wasm encoder
    pub wasm: Option<WasmEncoder>,
    /// Gov encoder
    pub gov: Option<GovEncoder>,
}

impl MessageEncoders {
    /// The encoders every chain starts from.
    #[must_use]
    pub fn default_encoders(
        unpacker: impl AnyUnpacker + 'static,
        port_source: impl Ics20TransferPortSource + 'static,
    ) -> Self {
        Self::default()
            .with_bank(encode_bank_msg)
            .with_custom(encode_custom_msg)
            .with_distribution(encode_distribution_msg)
            .with_ibc(move |ctx, sender, port_id, msg| {
                encode_ibc_msg(&port_source, ctx, sender, port_id, msg)
            })
            .with_staking(encode_staking_msg)
            .with_stargate(move |sender, any| encode_stargate_msg(&unpacker, sender, any))
            .with_wasm(encode_wasm_msg)
            .with_gov(encode_gov_msg)
    }

    /// Set the bank encoder.
    #[must_use]
    pub fn with_bank<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Addr, &BankMsg) -> EncodeResult + 'static,
    {
        self.bank = Some(Box::new(encoder));
        self
    }

    /// Set the custom encoder.
    #[must_use]
    pub fn with_custom<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Addr, &RawCustomMsg) -> EncodeResult + 'static,
    {
        self.custom = Some(Box::new(encoder));
        self
    }

    /// Set the distribution encoder.
    #[must_use]
    pub fn with_distribution<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Addr, &DistributionMsg) -> EncodeResult + 'static,
    {
        self.distribution = Some(Box::new(encoder));
        self
    }

    /// Set the IBC encoder.
    #[must_use]
    pub fn with_ibc<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Context<'_>, &Addr, &str, &IbcMsg) -> EncodeResult + 'static,
    {
        self.ibc = Some(Box::new(encoder));
        self
    }

    /// Set the staking encoder.
    #[must_use]
    pub fn with_staking<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Addr, &StakingMsg) -> EncodeResult + 'static,
    {
        self.staking = Some(Box::new(encoder));
        self
    }

    /// Set the stargate encoder.
    #[must_use]
    pub fn with_stargate<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Addr, &Any) -> EncodeResult + 'static,
    {
        self.stargate = Some(Box::new(encoder));
        self
    }

    /// Set the wasm encoder.
    #[must_use]
    pub fn with_wasm<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Addr, &WasmMsg) -> EncodeResult + 'static,
    {
        self.wasm = Some(Box::new(encoder));
        self
    }

    /// Set the gov encoder.
    #[must_use]
    pub fn with_gov<F>(mut self, encoder: F) -> Self
    where
        F: Fn(&Addr, &GovMsg) -> EncodeResult + 'static,
    {
        self.gov = Some(Box::new(encoder));
        self
    }

    /// Overlay `other` on top of `self`: every encoder set in `other` replaces
    /// the one in `self`, the others are kept.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            bank: other.bank.or(self.bank),
            custom: other.custom.or(self.custom),
            distribution: other.distribution.or(self.distribution),
            ibc: other.ibc.or(self.ibc),
            staking: other.staking.or(self.staking),
            stargate: other.stargate.or(self.stargate),
            wasm: other.wasm.or(self.wasm),
            gov: other.gov.or(self.gov),
        }
    }
}

fn missing(variant: &str) -> DispatchError {
    DispatchError::UnknownMsg(format!("no encoder for {variant} variant"))
}

impl MessageEncoder for MessageEncoders {
    #[allow(deprecated)]
    fn encode(
        &self,
        ctx: &Context<'_>,
        contract_addr: &Addr,
        contract_ibc_port_id: &str,
        msg: &ContractMsg,
    ) -> EncodeResult {
        match msg {
            CosmosMsg::Bank(msg) => self
                .bank
                .as_ref()
                .map_or_else(|| Err(missing("bank")), |e| e(contract_addr, msg)),
            CosmosMsg::Custom(msg) => self
                .custom
                .as_ref()
                .map_or_else(|| Err(missing("custom")), |e| e(contract_addr, msg)),
            CosmosMsg::Distribution(msg) => self
                .distribution
                .as_ref()
                .map_or_else(|| Err(missing("distribution")), |e| e(contract_addr, msg)),
            CosmosMsg::Ibc(msg) => self.ibc.as_ref().map_or_else(
                || Err(missing("ibc")),
                |e| e(ctx, contract_addr, contract_ibc_port_id, msg),
            ),
            CosmosMsg::Staking(msg) => self
                .staking
                .as_ref()
                .map_or_else(|| Err(missing("staking")), |e| e(contract_addr, msg)),
            CosmosMsg::Stargate { type_url, value } => {
                let any = Any {
                    type_url: type_url.clone(),
                    value: value.to_vec(),
                };
                self.stargate
                    .as_ref()
                    .map_or_else(|| Err(missing("stargate")), |e| e(contract_addr, &any))
            }
            CosmosMsg::Any(msg) => {
                let any = Any {
                    type_url: msg.type_url.clone(),
                    value: msg.value.to_vec(),
                };
                self.stargate
                    .as_ref()
                    .map_or_else(|| Err(missing("any")), |e| e(contract_addr, &any))
            }
            CosmosMsg::Wasm(msg) => self
                .wasm
                .as_ref()
                .map_or_else(|| Err(missing("wasm")), |e| e(contract_addr, msg)),
            CosmosMsg::Gov(msg) => self
                .gov
                .as_ref()
                .map_or_else(|| Err(missing("gov")), |e| e(contract_addr, msg)),
            _ => Err(DispatchError::UnknownMsg(
                "unknown variant of CosmosMsg".to_string(),
            )),
        }
    }
}
