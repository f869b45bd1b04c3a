//! osearch: OData `$search` expression inspector
//!
//! A small command-line front end over the `odata-search` parser. It parses `$search`
//! expressions into syntax trees, shows the token stream the parser sees, and renders syntax
//! errors with the offending position marked.

#![warn(missing_docs)]

pub mod cli;
pub mod logging;
