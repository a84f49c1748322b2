use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::fmt;

/// A URL-like value: either a plain string or an already-parsed URL.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlValue {
    Text(String),
    Parsed(Url),
}

impl UrlValue {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Parsed(url) => url.to_string(),
        }
    }
}

/// Provider values that expose their URL through an asynchronous accessor
/// (file outputs whose location is resolved lazily).
#[async_trait]
pub trait UrlAsset: Send + Sync + fmt::Debug {
    /// Resolve the asset, or `None` when it cannot produce a URL-like
    /// value.
    async fn url(&self) -> Option<UrlValue>;
}

/// Tagged union over every output shape a generation provider may return.
/// The provider is untrusted; any shape must be tolerated.
#[derive(Debug)]
pub enum ProviderOutput {
    Text(String),
    Url(Url),
    Asset(Box<dyn UrlAsset>),
    List(Vec<ProviderOutput>),
    /// Key/value pairs in the order the provider sent them.
    Map(Vec<(String, ProviderOutput)>),
    Other(Value),
}

impl From<Value> for ProviderOutput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }
}

/// Flattens an arbitrary provider output into the image URLs it contains.
///
/// Never fails: shapes that carry no usable URL degrade to an empty list.
/// Sequences are flattened recursively; mapping values are inspected one
/// level deep only, so containers nested inside a mapping are skipped.
pub async fn normalize(output: &ProviderOutput) -> Vec<String> {
    match output {
        ProviderOutput::Text(text) => vec![text.clone()],
        ProviderOutput::Url(url) => vec![url.to_string()],
        ProviderOutput::Asset(asset) => match asset.url().await {
            Some(value) => vec![value.into_string()],
            None => Vec::new(),
        },
        ProviderOutput::List(items) => {
            let mut urls = Vec::new();
            for item in items {
                urls.extend(Box::pin(normalize(item)).await);
            }
            urls.retain(|url| !url.is_empty());
            urls
        }
        ProviderOutput::Map(entries) => {
            let mut urls = Vec::new();
            for (_, value) in entries {
                let resolved = match value {
                    ProviderOutput::Asset(asset) => asset.url().await,
                    ProviderOutput::Text(text) => Some(UrlValue::Text(text.clone())),
                    ProviderOutput::Url(url) => Some(UrlValue::Parsed(url.clone())),
                    _ => None,
                };
                if let Some(value) = resolved {
                    let url = value.into_string();
                    if !url.is_empty() {
                        urls.push(url);
                    }
                }
            }
            urls
        }
        ProviderOutput::Other(_) => Vec::new(),
    }
}
