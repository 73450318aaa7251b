//! git output parser
//!
//! Parses the output from git plumbing commands into structured data.

mod diff;
mod log;


/// Parser for git command output
pub struct Parser;
