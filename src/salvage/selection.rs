use crate::tfjson::StateResource;
use std::collections::HashSet;

/// Which resources to salvage, by address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every resource in state
    All,
    /// Only the listed addresses
    Include(HashSet<String>),
    /// Everything except the listed addresses
    Exclude(HashSet<String>),
}

impl Selection {
    /// Build an include selection from whitespace-separated addresses
    pub fn include_from(text: &str) -> Self {
        Selection::Include(parse_addresses(text))
    }

    /// Build an exclude selection from whitespace-separated addresses
    pub fn exclude_from(text: &str) -> Self {
        Selection::Exclude(parse_addresses(text))
    }

    pub fn matches(&self, address: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Include(addresses) => addresses.contains(address),
            Selection::Exclude(addresses) => !addresses.contains(address),
        }
    }

    /// Keep the selected resources, preserving their order
    pub fn apply<'a>(&self, resources: &'a [StateResource]) -> Vec<&'a StateResource> {
        resources
            .iter()
            .filter(|resource| self.matches(&resource.address))
            .collect()
    }

    /// Listed addresses that match no resource (include mode only)
    pub fn unmatched<'a>(&'a self, resources: &[StateResource]) -> Vec<&'a str> {
        match self {
            Selection::Include(addresses) => {
                let mut missing: Vec<&str> = addresses
                    .iter()
                    .filter(|address| !resources.iter().any(|r| &r.address == *address))
                    .map(String::as_str)
                    .collect();
                missing.sort_unstable();
                missing
            }
            _ => Vec::new(),
        }
    }
}

fn parse_addresses(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}
