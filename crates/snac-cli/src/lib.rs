//! Library components of the `snac-align` command-line tool.

pub mod logging;
pub mod output;
pub mod settings;
