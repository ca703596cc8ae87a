use anyhow::bail;

/// Characters that may not appear anywhere in a branch name
const FORBIDDEN_CHARS: [char; 8] = [' ', '*', ':', '?', '[', '\\', '^', '~'];

/// Validated branch name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            bail!("branch name cannot be empty");
        }
        if name.starts_with('.') || name.starts_with('/') {
            bail!("invalid branch name: {}", name);
        }
        if name.ends_with('/') || name.ends_with('.') || name.ends_with(".lock") {
            bail!("invalid branch name: {}", name);
        }
        if name.contains("..") || name.contains("/.") || name.contains("@{") {
            bail!("invalid branch name: {}", name);
        }
        if name
            .chars()
            .any(|c| c.is_control() || FORBIDDEN_CHARS.contains(&c))
        {
            bail!("invalid branch name: {}", name);
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
