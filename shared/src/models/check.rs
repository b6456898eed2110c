//! Check Model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::printer::CheckType;

/// Check lifecycle: new → rendered → printed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum CheckStatus {
    #[default]
    New,
    Rendered,
    Printed,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Rendered => "rendered",
            Self::Printed => "printed",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::New => 0,
            Self::Rendered => 1,
            Self::Printed => 2,
        }
    }

    /// Status only moves forward; staying put is allowed
    pub fn can_transition_to(&self, next: CheckStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check entity (one per printer per order)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Check {
    pub id: i64,
    pub printer_id: i64,
    /// Copied from the printer at creation
    pub check_type: CheckType,
    /// Full order payload as submitted
    #[cfg_attr(feature = "db", sqlx(rename = "order_data", json))]
    pub order: Value,
    pub status: CheckStatus,
    /// Rendered file, relative to the media root
    pub pdf_file: Option<String>,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Printer id: {}. Check type: {}. Status: {}.",
            self.printer_id, self.check_type, self.status
        )
    }
}

/// Create checks from an order (`POST /checks/`)
///
/// Other top-level fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckCreate {
    #[serde(default)]
    pub order: Value,
}

/// Response of a successful fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedChecks {
    pub checks: Vec<Check>,
}

/// Replace check payload (PUT)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReplace {
    pub printer_id: i64,
    pub check_type: CheckType,
    pub order: Value,
    pub status: Option<CheckStatus>,
}

/// Partial update check payload (PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckUpdate {
    pub printer_id: Option<i64>,
    pub check_type: Option<CheckType>,
    pub order: Option<Value>,
    pub status: Option<CheckStatus>,
}

impl From<CheckReplace> for CheckUpdate {
    fn from(data: CheckReplace) -> Self {
        Self {
            printer_id: Some(data.printer_id),
            check_type: Some(data.check_type),
            order: Some(data.order),
            status: data.status,
        }
    }
}

/// List filters (`GET /checks/?printer_id=..&check_type=..&status=..`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckFilter {
    pub printer_id: Option<i64>,
    pub check_type: Option<CheckType>,
    pub status: Option<CheckStatus>,
}
