use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle state of a purchase as reported by the backend.
///
/// Unknown states are kept verbatim so newer backends still display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
    Other(String),
}

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Info,
    Success,
    Danger,
    Warning,
}

impl PurchaseStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => PurchaseStatus::Pending,
            "processing" => PurchaseStatus::Processing,
            "completed" | "success" | "delivered" => PurchaseStatus::Completed,
            "failed" => PurchaseStatus::Failed,
            "refunded" => PurchaseStatus::Refunded,
            _ => PurchaseStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Processing => "processing",
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Failed => "failed",
            PurchaseStatus::Refunded => "refunded",
            PurchaseStatus::Other(s) => s,
        }
    }

    pub fn label(&self) -> String {
        match self {
            PurchaseStatus::Pending => "Pending".to_string(),
            PurchaseStatus::Processing => "Processing".to_string(),
            PurchaseStatus::Completed => "Completed".to_string(),
            PurchaseStatus::Failed => "Failed".to_string(),
            PurchaseStatus::Refunded => "Refunded".to_string(),
            PurchaseStatus::Other(s) if s.is_empty() => "Unknown".to_string(),
            PurchaseStatus::Other(s) => s.clone(),
        }
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            PurchaseStatus::Pending => BadgeTone::Warning,
            PurchaseStatus::Processing => BadgeTone::Info,
            PurchaseStatus::Completed => BadgeTone::Success,
            PurchaseStatus::Failed => BadgeTone::Danger,
            PurchaseStatus::Refunded | PurchaseStatus::Other(_) => BadgeTone::Neutral,
        }
    }

    /// States an admin may set by hand.
    pub fn settable() -> [PurchaseStatus; 5] {
        [
            PurchaseStatus::Pending,
            PurchaseStatus::Processing,
            PurchaseStatus::Completed,
            PurchaseStatus::Failed,
            PurchaseStatus::Refunded,
        ]
    }
}

impl Default for PurchaseStatus {
    fn default() -> Self {
        PurchaseStatus::Other(String::new())
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PurchaseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PurchaseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PurchaseStatus::parse(&raw))
    }
}
