//! Printer Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Max length of printer `name` and `api_key`
pub const MAX_PRINTER_TEXT_LEN: usize = 70;

/// Check audience: which template a printer's checks are rendered with
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum CheckType {
    /// 厨房单 (no prices)
    #[default]
    Kitchen,
    /// 顾客单
    Client,
}

impl CheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kitchen => "kitchen",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Printer entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Printer {
    pub id: i64,
    pub name: String,
    /// Access key the device polls with (unique)
    pub api_key: String,
    pub check_type: CheckType,
    /// Location the printer belongs to
    pub point_id: i64,
}

impl fmt::Display for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Printer name: {}. Check type: {}.",
            self.name, self.check_type
        )
    }
}

/// Create / replace printer payload (POST, PUT)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterCreate {
    pub name: String,
    pub api_key: String,
    pub check_type: CheckType,
    pub point_id: i64,
}

/// Partial update printer payload (PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrinterUpdate {
    pub name: Option<String>,
    pub api_key: Option<String>,
    pub check_type: Option<CheckType>,
    pub point_id: Option<i64>,
}

impl From<PrinterCreate> for PrinterUpdate {
    fn from(data: PrinterCreate) -> Self {
        Self {
            name: Some(data.name),
            api_key: Some(data.api_key),
            check_type: Some(data.check_type),
            point_id: Some(data.point_id),
        }
    }
}

/// List filters (`GET /printers/?name=..&check_type=..&search=..`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrinterFilter {
    /// Exact name
    pub name: Option<String>,
    pub check_type: Option<CheckType>,
    /// Case-insensitive substring of the name
    pub search: Option<String>,
}
