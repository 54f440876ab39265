//! Supported mobile carriers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A Ghanaian mobile carrier, the partition key of the product catalog.
///
/// Declaration order is the order networks are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Network {
    Mtn,
    Telecel,
    At,
    #[serde(rename = "AIRTELTIGO")]
    AirtelTigo,
    Yello,
    AtPremium,
}

impl Network {
    pub const ALL: [Network; 6] = [
        Network::Mtn,
        Network::Telecel,
        Network::At,
        Network::AirtelTigo,
        Network::Yello,
        Network::AtPremium,
    ];

    /// Key used on the wire and in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mtn => "MTN",
            Network::Telecel => "TELECEL",
            Network::At => "AT",
            Network::AirtelTigo => "AIRTELTIGO",
            Network::Yello => "YELLO",
            Network::AtPremium => "AT_PREMIUM",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Network::Mtn => "MTN",
            Network::Telecel => "Telecel",
            Network::At => "AT",
            Network::AirtelTigo => "AirtelTigo",
            Network::Yello => "Yello",
            Network::AtPremium => "AT Premium",
        }
    }

    /// Position in display order.
    pub fn rank(&self) -> usize {
        Network::ALL.iter().position(|n| n == self).unwrap_or(usize::MAX)
    }

    /// Look up a catalog key without failing on unknown carriers.
    pub fn from_key(key: &str) -> Option<Network> {
        key.parse().ok()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_uppercase().replace(['-', ' '], "_");
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.as_str() == key)
            .ok_or_else(|| ValidationError::UnknownNetwork(s.trim().to_string()))
    }
}
