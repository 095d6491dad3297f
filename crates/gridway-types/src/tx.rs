//! Transaction message trait and the unsigned amino-JSON transaction

use crate::{address::AccAddress, error::SdkError};
use gridway_math::Coins;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Amino registered name of the standard transaction
pub const STD_TX_TYPE: &str = "auth/StdTx";

/// Trait defining the contract for all messages carried by a transaction
pub trait SdkMsg: Send + Sync + std::fmt::Debug + 'static {
    /// Router key of the owning module (e.g., "distr")
    fn route(&self) -> &'static str;

    /// Short message type within the module
    fn msg_type(&self) -> &'static str;

    /// Name registered with the amino JSON codec
    fn amino_type(&self) -> &'static str;

    /// Perform stateless validation
    fn validate_basic(&self) -> Result<(), SdkError>;

    /// Get the signers required for this message
    fn get_signers(&self) -> Vec<AccAddress>;

    /// JSON body placed under `value` in the amino envelope
    fn amino_value(&self) -> serde_json::Value;

    /// Get a reference to self as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Amino JSON envelope: `{"type": <registered name>, "value": <body>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amino<T> {
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: T,
}

impl Amino<serde_json::Value> {
    /// Wrap a message in its registered amino envelope
    pub fn from_msg(msg: &dyn SdkMsg) -> Self {
        Self {
            type_name: msg.amino_type().to_string(),
            value: msg.amino_value(),
        }
    }
}

/// Fee attached to a standard transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Coins,
    #[serde(
        serialize_with = "serialize_u64_string",
        deserialize_with = "deserialize_u64_string"
    )]
    pub gas: u64,
}

impl StdFee {
    pub fn new(amount: Coins, gas: u64) -> Self {
        Self { amount, gas }
    }
}

/// Standard transaction as emitted in generate-only mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdTx {
    pub msg: Vec<Amino<serde_json::Value>>,
    pub fee: StdFee,
    /// Always null for generated output; the signer fills it in
    pub signatures: Option<Vec<serde_json::Value>>,
    pub memo: String,
}

impl StdTx {
    /// Build an unsigned transaction from already-validated messages
    pub fn unsigned(msgs: &[Box<dyn SdkMsg>], fee: StdFee, memo: impl Into<String>) -> Self {
        Self {
            msg: msgs.iter().map(|m| Amino::from_msg(m.as_ref())).collect(),
            fee,
            signatures: None,
            memo: memo.into(),
        }
    }

    /// Wrap in the registered amino envelope
    pub fn into_amino(self) -> Amino<StdTx> {
        Amino {
            type_name: STD_TX_TYPE.to_string(),
            value: self,
        }
    }
}

fn serialize_u64_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

fn deserialize_u64_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}
