use std::collections::BTreeSet;

/// Branch allow-list from a comma-separated setting such as
/// `master,development`. An empty or absent setting lets every branch through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchFilter {
    branches: Option<BTreeSet<String>>,
}

impl BranchFilter {
    pub fn allow_all() -> Self {
        Self { branches: None }
    }

    pub fn parse(setting: Option<&str>) -> Self {
        let branches: BTreeSet<String> = setting
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|branch| !branch.is_empty())
            .map(str::to_string)
            .collect();

        if branches.is_empty() {
            Self::allow_all()
        } else {
            Self {
                branches: Some(branches),
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.branches.is_some()
    }

    /// Exact, case-sensitive membership.
    pub fn allows(&self, branch: &str) -> bool {
        match &self.branches {
            Some(branches) => branches.contains(branch),
            None => true,
        }
    }
}
