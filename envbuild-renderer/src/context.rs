//! Rendering lookup built once from the fetched parameters.

use std::collections::HashMap;

use envbuild_core::{Environment, Parameter};

/// Reserved token that resolves to the environment name.
pub const ENV_TOKEN: &str = "ENV";

/// Token key → trimmed value, plus the environment name for `%ENV%`.
#[derive(Debug, Clone)]
pub struct RenderContext {
    environment: Environment,
    values: HashMap<String, String>,
    /// Keys in fetch order.
    order: Vec<String>,
}

impl RenderContext {
    /// Build the lookup for `environment`.
    ///
    /// Parameters outside the namespace are skipped. When two parameters map
    /// to the same key the first one wins. A parameter keyed `ENV` never
    /// overrides the environment name.
    pub fn new(environment: &Environment, parameters: &[Parameter]) -> Self {
        let mut values = HashMap::with_capacity(parameters.len());
        let mut order = Vec::with_capacity(parameters.len());

        for param in parameters {
            let Some(key) = param.key_for(environment) else {
                tracing::debug!("skipping {}: outside {}", param.name, environment.namespace_path());
                continue;
            };
            if key == ENV_TOKEN {
                tracing::warn!("{} is shadowed by the reserved %ENV% token", param.name);
                continue;
            }
            if values.contains_key(key) {
                tracing::debug!("duplicate key {} from {}; keeping the first", key, param.name);
                continue;
            }
            values.insert(key.to_string(), param.value.trim().to_string());
            order.push(key.to_string());
        }

        Self {
            environment: environment.clone(),
            values,
            order,
        }
    }

    /// Value for a token name, `ENV` included.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == ENV_TOKEN {
            return Some(self.environment.as_str());
        }
        self.values.get(key).map(String::as_str)
    }

    /// Parameter keys in fetch order (never includes `ENV`).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
