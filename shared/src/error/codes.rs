//! Unified error codes for the check service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Printer errors
//! - 2xxx: Check / order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Printer ====================
    /// Printer not found (unknown id or access key)
    PrinterNotFound = 1001,
    /// Access key already used by another printer
    PrinterApiKeyExists = 1002,
    /// No printer registered at the order's point
    NoPrinterForPoint = 1003,

    // ==================== 2xxx: Check ====================
    /// Check not found
    CheckNotFound = 2001,
    /// Order payload has no order id
    OrderIdMissing = 2002,
    /// Order payload has no point id
    PointIdMissing = 2003,
    /// Checks already exist for this order id
    DuplicateOrder = 2004,
    /// Printer has no rendered checks waiting
    NoCheckAvailable = 2005,
    /// Check is not printed yet, download refused
    CheckNotAvailable = 2006,
    /// Rendered file is missing on disk
    CheckFileMissing = 2007,
    /// Status would move backward
    InvalidStatusTransition = 2008,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// File storage error
    StorageError = 9401,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Printer
            ErrorCode::PrinterNotFound => "There are no available printers.",
            ErrorCode::PrinterApiKeyExists => "Printer with this api key already exists.",
            ErrorCode::NoPrinterForPoint => "There are no printers available for this point.",

            // Check
            ErrorCode::CheckNotFound => "Check not found",
            ErrorCode::OrderIdMissing => "Order id is missing.",
            ErrorCode::PointIdMissing => "Point id is missing from the order.",
            ErrorCode::DuplicateOrder => "Checks for this order already exist.",
            ErrorCode::NoCheckAvailable => "There are no checks available for the printer.",
            ErrorCode::CheckNotAvailable => "Check is not available for download.",
            ErrorCode::CheckFileMissing => "There is no available check for download.",
            ErrorCode::InvalidStatusTransition => "Check status cannot move backward.",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StorageError => "File storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Printer
            1001 => Ok(ErrorCode::PrinterNotFound),
            1002 => Ok(ErrorCode::PrinterApiKeyExists),
            1003 => Ok(ErrorCode::NoPrinterForPoint),

            // Check
            2001 => Ok(ErrorCode::CheckNotFound),
            2002 => Ok(ErrorCode::OrderIdMissing),
            2003 => Ok(ErrorCode::PointIdMissing),
            2004 => Ok(ErrorCode::DuplicateOrder),
            2005 => Ok(ErrorCode::NoCheckAvailable),
            2006 => Ok(ErrorCode::CheckNotAvailable),
            2007 => Ok(ErrorCode::CheckFileMissing),
            2008 => Ok(ErrorCode::InvalidStatusTransition),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9401 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
