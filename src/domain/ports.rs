use crate::domain::model::Locale;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key-value persistence for preferences and saved results.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[async_trait]
pub trait ShareSink: Send + Sync {
    fn name(&self) -> &str;
    async fn share(&self, payload: &SharePayload) -> Result<()>;
}

pub trait SettingsProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn locale(&self) -> Locale;
    fn page_url(&self) -> &str;
    fn default_weight(&self) -> f64;
}
