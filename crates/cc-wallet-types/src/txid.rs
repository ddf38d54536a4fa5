use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

/// The 32 byte id of a transaction, displayed as lowercase hex.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Txid([u8; 32]);

impl Txid {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl From<[u8; 32]> for Txid {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Txid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Txid {
    type Error = ParseError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = value.try_into().map_err(|_| ParseError::WrongLength {
            expected: 32,
            found: value.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Txid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl Serialize for Txid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Txid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    #[test]
    fn test_display_matches_hex() -> anyhow::Result<()> {
        let txid: Txid = TXID.parse()?;
        assert_eq!(
            txid,
            Txid::new(hex!(
                "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
            ))
        );
        assert_eq!(txid.to_string(), TXID);
        Ok(())
    }

    #[test]
    fn test_uppercase_is_accepted() -> anyhow::Result<()> {
        let txid: Txid = TXID.to_uppercase().parse()?;
        assert_eq!(txid.to_string(), TXID);
        Ok(())
    }

    #[test]
    fn test_invalid_txids() {
        assert_eq!(
            "abcd".parse::<Txid>(),
            Err(ParseError::WrongLength {
                expected: 32,
                found: 2
            })
        );
        assert!(matches!("xyz".parse::<Txid>(), Err(ParseError::Hex(_))));
    }
}
