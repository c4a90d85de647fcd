//! Result shapes and parameter types for the NEAR RPC methods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── YoctoNear ────────────────────────────────────────────────────────────────

/// An amount in yoctoNEAR (10^-24 NEAR). Sent by the node as a decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YoctoNear(pub u128);

impl fmt::Display for YoctoNear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for YoctoNear {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for YoctoNear {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        match Repr::deserialize(de)? {
            Repr::Text(s) => s.parse().map(Self).map_err(serde::de::Error::custom),
            Repr::Number(n) => Ok(Self(u128::from(n))),
        }
    }
}

// ─── Block reference ──────────────────────────────────────────────────────────

/// A block height or block hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockId {
    Height(u64),
    Hash(String),
}

impl From<u64> for BlockId {
    fn from(height: u64) -> Self {
        Self::Height(height)
    }
}

impl From<&str> for BlockId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_string())
    }
}

impl FromStr for BlockId {
    type Err = std::convert::Infallible;

    /// Digits parse as a height, anything else is taken as a hash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(Self::Height)
            .unwrap_or_else(|_| Self::Hash(s.to_string())))
    }
}

/// How final the block a query reads from must be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Finality {
    Optimistic,
    NearFinal,
    #[default]
    Final,
}

impl Finality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::NearFinal => "near-final",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for Finality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Finality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimistic" => Ok(Self::Optimistic),
            "near-final" => Ok(Self::NearFinal),
            "final" => Ok(Self::Final),
            other => Err(format!(
                "unknown finality {other:?} (expected optimistic, near-final or final)"
            )),
        }
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPriceResponse {
    pub gas_price: YoctoNear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCallPermission {
    /// Remaining allowance; `None` means unlimited.
    pub allowance: Option<YoctoNear>,
    pub receiver_id: String,
    pub method_names: Vec<String>,
}

/// `"FullAccess"` or `{"FunctionCall": {...}}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessKeyPermission {
    FullAccess,
    FunctionCall(FunctionCallPermission),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    pub nonce: u64,
    pub permission: AccessKeyPermission,
}

/// Result of `view_access_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyView {
    pub nonce: u64,
    pub permission: AccessKeyPermission,
    pub block_height: u64,
    pub block_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyInfo {
    pub public_key: String,
    pub access_key: AccessKey,
}

/// Result of `view_access_key_list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyList {
    pub keys: Vec<AccessKeyInfo>,
    pub block_height: u64,
    pub block_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeVersion {
    pub version: String,
    pub build: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncInfo {
    pub latest_block_hash: String,
    pub latest_block_height: u64,
    pub latest_block_time: String,
    pub syncing: bool,
}

/// Result of `status`. Fields the node adds beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub chain_id: String,
    pub protocol_version: u32,
    pub version: NodeVersion,
    pub sync_info: SyncInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yocto_accepts_string_and_number() {
        let a: YoctoNear = serde_json::from_value(json!("18501534631167016000000000")).unwrap();
        assert_eq!(a.0, 18_501_534_631_167_016_000_000_000);
        let b: YoctoNear = serde_json::from_value(json!(100)).unwrap();
        assert_eq!(b, YoctoNear(100));
        assert!(serde_json::from_value::<YoctoNear>(json!("1e3")).is_err());
        assert_eq!(serde_json::to_value(YoctoNear(7)).unwrap(), json!("7"));
    }

    #[test]
    fn block_id_parsing() {
        assert_eq!("1234".parse::<BlockId>().unwrap(), BlockId::Height(1234));
        assert_eq!(
            "9Mq5ayJ8YBGsNNKZYBTvq6FS5EpVqLGqKYq4bwXzAAR".parse::<BlockId>().unwrap(),
            BlockId::Hash("9Mq5ayJ8YBGsNNKZYBTvq6FS5EpVqLGqKYq4bwXzAAR".into())
        );
        assert_eq!(serde_json::to_value(BlockId::Height(5)).unwrap(), json!(5));
    }

    #[test]
    fn finality_wire_names() {
        assert_eq!(serde_json::to_value(Finality::NearFinal).unwrap(), json!("near-final"));
        assert_eq!("optimistic".parse::<Finality>().unwrap(), Finality::Optimistic);
        assert!("soon".parse::<Finality>().is_err());
        assert_eq!(Finality::default(), Finality::Final);
    }

    #[test]
    fn access_key_permissions() {
        let full: AccessKey =
            serde_json::from_value(json!({"nonce": 17, "permission": "FullAccess"})).unwrap();
        assert_eq!(full.permission, AccessKeyPermission::FullAccess);

        let call: AccessKey = serde_json::from_value(json!({
            "nonce": 85,
            "permission": {"FunctionCall": {
                "allowance": null,
                "receiver_id": "client.chainlink.testnet",
                "method_names": ["get_token_price"]
            }}
        }))
        .unwrap();
        match call.permission {
            AccessKeyPermission::FunctionCall(p) => {
                assert_eq!(p.allowance, None);
                assert_eq!(p.method_names, vec!["get_token_price".to_string()]);
            }
            other => panic!("expected FunctionCall, got {other:?}"),
        }
    }
}
