use serde::{Deserialize, Serialize};

use crate::core::Provider;

/// Known providers in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }

    /// First provider with the given code.
    pub fn get(&self, provider_id: u32) -> Option<&Provider> {
        self.providers.iter().find(|p| p.provider_id == provider_id)
    }

    /// Providers whose name contains `term`, ignoring case, in registry order.
    ///
    /// An empty term matches nothing. Whitespace is matched literally.
    pub fn search(&self, term: &str) -> Vec<&Provider> {
        if term.is_empty() {
            return Vec::new();
        }
        let needle = term.to_lowercase();
        self.providers
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }
}

impl From<Vec<Provider>> for ProviderRegistry {
    fn from(providers: Vec<Provider>) -> Self {
        Self::new(providers)
    }
}
