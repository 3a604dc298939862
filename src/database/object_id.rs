use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// 12-byte record identifier rendered as 24 hex characters.
///
/// Layout: 4-byte big-endian unix seconds, 5 bytes fixed per process,
/// 3-byte big-endian counter. Ids minted by one process therefore sort
/// roughly by creation time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let mut bytes = [0u8; 5];
    bytes.copy_from_slice(&random.as_bytes()[..5]);
    bytes
});

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let b = random.as_bytes();
    AtomicU32::new(u32::from_be_bytes([0, b[0], b[1], b[2]]))
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid object id: {0:?}")]
pub struct InvalidObjectId(pub String);

impl ObjectId {
    pub fn new() -> Self {
        let secs = Utc::now().timestamp() as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Accepts exactly 24 hex digits, either case.
    pub fn parse_str(s: &str) -> Result<Self, InvalidObjectId> {
        let raw = s.as_bytes();
        if raw.len() != 24 {
            return Err(InvalidObjectId(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, pair) in raw.chunks_exact(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or_else(|| InvalidObjectId(s.to_string()))?;
            let lo = hex_value(pair[1]).ok_or_else(|| InvalidObjectId(s.to_string()))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }

    #[cfg(test)]
    pub fn is_valid(s: &str) -> bool {
        Self::parse_str(s).is_ok()
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[cfg(test)]
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_24_lowercase_hex() {
        let id = ObjectId::new();
        let hex = id.to_hex();
        assert_eq!(hex.len(), 24);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(ObjectId::parse_str(&hex).unwrap(), id);
    }

    #[test]
    fn consecutive_ids_differ() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn accepts_uppercase_hex() {
        let id = ObjectId::parse_str("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in [
            "",
            "123",
            "507f1f77bcf86cd79943901",
            "507f1f77bcf86cd7994390111",
            "507f1f77bcf86cd79943901g",
            "not-an-object-id-at-all!",
            "507f1f77-bcf8-6cd7-9943",
        ] {
            assert!(!ObjectId::is_valid(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn timestamp_reflects_creation_time() {
        let before = Utc::now().timestamp() as u32;
        let id = ObjectId::new();
        assert!(id.timestamp() >= before);
    }

    #[test]
    fn serializes_as_hex_string() {
        let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            serde_json::to_value(id).unwrap(),
            serde_json::json!("507f1f77bcf86cd799439011")
        );
        let back: ObjectId = serde_json::from_str("\"507f1f77bcf86cd799439011\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ObjectId>("\"nope\"").is_err());
    }
}
