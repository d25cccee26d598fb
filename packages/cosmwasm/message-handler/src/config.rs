//! Defines the configuration of the default message handler chain.

use serde_json::Value;

use crate::ibc::{port_id_for_contract, DEFAULT_CONTRACT_PORT_PREFIX};

/// The configuration of the default message handler chain.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[allow(clippy::module_name_repetitions)]
pub struct MessengerConfig {
    /// The module whose account holds coins while they are burned.
    #[serde(default = "default_module_name")]
    pub module_name: String,
    /// The port ICS-20 transfers are sent from.
    #[serde(default = "default_ics20_port")]
    pub ics20_port: String,
    /// The prefix of the ports bound to contracts.
    #[serde(default = "default_contract_port_prefix")]
    pub contract_port_prefix: String,
}

fn default_module_name() -> String {
    "wasm".to_string()
}

fn default_ics20_port() -> String {
    "transfer".to_string()
}

fn default_contract_port_prefix() -> String {
    DEFAULT_CONTRACT_PORT_PREFIX.to_string()
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
            ics20_port: default_ics20_port(),
            contract_port_prefix: default_contract_port_prefix(),
        }
    }
}

impl MessengerConfig {
    /// Parse the configuration, reporting the json path of the field that failed.
    /// # Errors
    /// Returns an error if the value does not describe a valid configuration.
    #[allow(clippy::needless_pass_by_value)]
    pub fn from_json(value: Value) -> anyhow::Result<Self> {
        let json_string = value.to_string();
        let mut deserializer = serde_json::Deserializer::from_str(&json_string);
        let config: Self = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| anyhow::anyhow!("config error at {}: {}", e.path(), e))?;

        anyhow::ensure!(!config.module_name.is_empty(), "module_name must not be empty");
        anyhow::ensure!(!config.ics20_port.is_empty(), "ics20_port must not be empty");
        Ok(config)
    }

    /// The IBC port bound to the contract.
    #[must_use]
    pub fn contract_port_id(&self, contract_addr: &str) -> String {
        port_id_for_contract(&self.contract_port_prefix, contract_addr)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = MessengerConfig::from_json(json!({})).unwrap();
        assert_eq!(MessengerConfig::default(), config);
        assert_eq!("wasm", config.module_name);
        assert_eq!("transfer", config.ics20_port);
        assert_eq!("wasm.", config.contract_port_prefix);
        assert_eq!("wasm.c1", config.contract_port_id("c1"));
    }

    #[test]
    fn test_overrides() {
        let config = MessengerConfig::from_json(json!({
            "module_name": "burner",
            "ics20_port": "ics20",
        }))
        .unwrap();
        assert_eq!("burner", config.module_name);
        assert_eq!("ics20", config.ics20_port);
        assert_eq!("wasm.", config.contract_port_prefix);
    }

    #[test]
    fn test_error_reports_path() {
        let err = MessengerConfig::from_json(json!({ "ics20_port": 20 })).unwrap_err();
        assert!(err.to_string().contains("ics20_port"), "{err}");
    }

    #[test]
    fn test_empty_module_name() {
        let err = MessengerConfig::from_json(json!({ "module_name": "" })).unwrap_err();
        assert!(err.to_string().contains("module_name"), "{err}");
    }
}
