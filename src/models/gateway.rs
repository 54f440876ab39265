use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How a purchase is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gateway {
    #[default]
    Wallet,
    Paystack,
}

impl Gateway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gateway::Wallet => "wallet",
            Gateway::Paystack => "paystack",
        }
    }

    /// Only wallet payments are charged against the local balance.
    pub fn debits_wallet(&self) -> bool {
        matches!(self, Gateway::Wallet)
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gateway {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wallet" => Ok(Gateway::Wallet),
            "paystack" => Ok(Gateway::Paystack),
            other => Err(ValidationError::UnknownGateway(other.to_string())),
        }
    }
}
