//! git-specific constants
//!
//! Centralized definitions for git command names, flags, and special values.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// git subcommands
pub mod commands {
    pub const LOG: &str = "log";
    pub const DIFF_TREE: &str = "diff-tree";
    pub const CAT_FILE: &str = "cat-file";
    pub const REV_PARSE: &str = "rev-parse";
    pub const CLONE: &str = "clone";
    pub const FETCH: &str = "fetch";
}

/// git command flags
pub mod flags {
    /// Run as if git was started in the given path (global flag)
    pub const REPO_PATH: &str = "-C";
    /// Follow only the first parent of merge commits
    pub const FIRST_PARENT: &str = "--first-parent";
    /// NUL-terminated records, safe for any path or name
    pub const NUL_TERMINATED: &str = "-z";
    /// Recurse into sub-trees
    pub const RECURSIVE: &str = "-r";
    /// Raw diff output (modes, object ids, status)
    pub const RAW: &str = "--raw";
    /// Rename detection
    pub const FIND_RENAMES: &str = "-M";
    /// Show the initial commit as a creation event
    pub const ROOT: &str = "--root";
    /// Do not print the commit id before the diff
    pub const NO_COMMIT_ID: &str = "--no-commit-id";
    /// Verify that exactly one parameter resolves to an object
    pub const VERIFY: &str = "--verify";
    /// Exit non-zero without an error message
    pub const QUIET: &str = "--quiet";
    /// Print the repository directory
    pub const GIT_DIR: &str = "--git-dir";
    /// Clone without checking out a working tree
    pub const NO_CHECKOUT: &str = "--no-checkout";
    /// Separates revisions from paths
    pub const END_OF_OPTIONS: &str = "--";
}

/// Special git values
pub mod special {
    /// Object type for file content
    pub const BLOB: &str = "blob";

    /// File mode of a submodule entry (gitlink)
    pub const GITLINK_MODE: &str = "160000";

    /// Suffix peeling a reference to the commit it points to
    pub const PEEL_COMMIT: &str = "^{commit}";
}

/// Error detection patterns in git output
pub mod errors {
    /// Pattern indicating not a git repository
    pub const NOT_A_REPO: &str = "not a git repository";
}
