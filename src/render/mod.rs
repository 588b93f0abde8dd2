//! Output rendering for parse results.
//!
//! # Example
//!
//! ```no_run
//! use undocx::render::{to_json, JsonFormat};
//!
//! let data = std::fs::read("document.docx")?;
//! let result = undocx::parse_docx(&data)?;
//! let json = to_json(&result, JsonFormat::Pretty)?;
//! # Ok::<(), undocx::Error>(())
//! ```

mod json;

pub use json::{to_json, to_json_default, JsonFormat};
