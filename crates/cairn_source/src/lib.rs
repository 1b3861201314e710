//! Script sources and the text resources that back them.
//!
//! A [`ScriptSource`] is a logical unit of text, optionally backed by a file on
//! the local filesystem. The [`TextResource`] trait is the seam through which
//! its content is obtained.

#![warn(missing_docs)]

pub mod resource;
pub mod script_source;

pub use resource::{FileTextResource, StringTextResource, TextResource};
pub use script_source::ScriptSource;
