//! # samsungtv-parser
//!
//! XML payload extraction for Samsung TV MainTVServer responses.
//!
//! The TV embeds small XML documents inside otherwise flat action
//! responses (the current-channel descriptor, the available-source list).
//! This crate pulls named values out of those documents without ever
//! failing hard: a payload that does not parse is a soft condition the
//! caller logs and skips.
//!
//! ## Usage
//!
//! ```rust
//! use samsungtv_parser::{parse_document, extract_scalar, extract_records};
//!
//! let doc = parse_document("<Channel><MajorCh>7</MajorCh></Channel>").unwrap();
//! assert_eq!(extract_scalar(&doc, "MajorCh").as_deref(), Some("7"));
//! ```

mod error;
mod extract;

pub use error::{ParseError, ParseResult};
pub use extract::{extract_records, extract_scalar, parse_document};
