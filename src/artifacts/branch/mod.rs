pub mod branch_name;
pub mod branch_table;

/// Name of the branch every repository starts on
pub const DEFAULT_BRANCH: &str = "master";
