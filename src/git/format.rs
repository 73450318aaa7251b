//! git pretty-format definitions for stable output parsing
//!
//! These formats ensure consistent, parseable output from `git log`
//! regardless of user configuration.

/// Separator used between fields in format output (ASCII unit separator)
pub const FIELD_SEPARATOR: char = '\x1f';

/// Separator between records when running with `-z`
pub const RECORD_SEPARATOR: char = '\0';

/// Formats for git commands
pub struct Formats;

impl Formats {
    /// Format for `git log` output
    ///
    /// Fields (separated by `\x1f`):
    /// 1. commit hash (full)
    /// 2. parent hashes (space-separated, empty for a root commit)
    /// 3. author name
    /// 4. author email
    /// 5. committer name
    /// 6. committer email
    /// 7. committer timestamp (Unix seconds)
    /// 8. author timestamp (Unix seconds)
    ///
    /// Records are NUL-separated because `-z` is passed alongside.
    pub fn log() -> &'static str {
        concat!(
            "--format=",
            "%H",
            "%x1f",
            "%P",
            "%x1f",
            "%an",
            "%x1f",
            "%ae",
            "%x1f",
            "%cn",
            "%x1f",
            "%ce",
            "%x1f",
            "%ct",
            "%x1f",
            "%at",
        )
    }
}

/// Number of fields produced by [`Formats::log`]
pub const LOG_FIELD_COUNT: usize = 8;
