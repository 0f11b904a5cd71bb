//! AWS Systems Manager Parameter Store backend.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_ssm::Client;

use envbuild_core::Parameter;

use crate::error::StoreError;
use crate::fetch::{BoxFuture, Page, ParameterStore};

/// Lists parameters with `GetParametersByPath`, recursively.
pub struct SsmStore {
    client: Client,
    with_decryption: bool,
}

impl SsmStore {
    pub fn new(client: Client, with_decryption: bool) -> Self {
        Self {
            client,
            with_decryption,
        }
    }

    /// Build a client from the default AWS provider chain.
    ///
    /// `region` overrides whatever the chain would pick.
    pub async fn from_env(region: Option<String>, with_decryption: bool) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), with_decryption)
    }

    async fn fetch_page_impl(
        &self,
        path: String,
        next_token: Option<String>,
    ) -> Result<Page, StoreError> {
        let output = self
            .client
            .get_parameters_by_path()
            .path(&path)
            .recursive(true)
            .with_decryption(self.with_decryption)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| StoreError::Remote {
                path: path.clone(),
                source: Box::new(aws_sdk_ssm::Error::from(err)),
            })?;

        let parameters = output
            .parameters()
            .iter()
            .filter_map(|p| {
                let Some(name) = p.name() else {
                    tracing::debug!("skipping unnamed parameter under {}", path);
                    return None;
                };
                Some(Parameter::new(name, p.value().unwrap_or_default()))
            })
            .collect();

        Ok(Page {
            parameters,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

impl ParameterStore for SsmStore {
    fn fetch_page(
        &self,
        path: &str,
        next_token: Option<&str>,
    ) -> BoxFuture<'_, Result<Page, StoreError>> {
        let path = path.to_string();
        let next_token = next_token.map(str::to_string);
        Box::pin(self.fetch_page_impl(path, next_token))
    }
}
