//! Error handling for zcrush operations
//!
//! This module re-exports the error types used throughout the crate. They are
//! defined with thiserror in [`crate::common`]; every failure carries exactly one
//! [`ErrorKind`] and a stable numeric code.

pub use crate::common::CrushError;
pub use crate::common::EngineFault;
pub use crate::common::ErrorKind;
pub use crate::common::FileAction;
pub use crate::common::Result;
