//! Library components of the `refmatch` command-line tool.

pub mod input;
pub mod logging;
