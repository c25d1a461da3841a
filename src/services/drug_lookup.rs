use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::DrugLookupResult;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Lookup request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Lookup service returned HTTP {status}")]
    BadStatus { status: u16 },

    #[error("Lookup service returned a malformed response: {details}")]
    MalformedResponse { details: String },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugConcept {
    pub rxcui: String,
    pub name: String,
    #[serde(default)]
    pub tty: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrugSearchResponse {
    #[serde(default)]
    drug_group: Option<DrugGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrugGroup {
    #[serde(default)]
    concept_group: Vec<ConceptGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConceptGroup {
    #[serde(default)]
    concept_properties: Vec<DrugConcept>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesResponse {
    #[serde(default)]
    properties: Option<DrugConcept>,
}

/// Client for the RxNav-style drug name lookup API.
///
/// The client performs no retries; a failed call surfaces as a [`LookupError`]
/// and the caller decides what to do with it.
#[derive(Clone)]
pub struct DrugLookupClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl DrugLookupClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.drug_lookup_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.drug_lookup_timeout_seconds),
        }
    }

    /// Search the lookup service by name and return the first matching
    /// concept, or `Ok(None)` when the service knows no such drug.
    pub async fn search_drug(&self, name: &str) -> Result<Option<DrugConcept>, LookupError> {
        let url = format!("{}/drugs.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("name", name)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::BadStatus { status: status.as_u16() });
        }

        let body = response.text().await?;
        let parsed: DrugSearchResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::MalformedResponse { details: e.to_string() })?;

        let first = parsed
            .drug_group
            .map(|group| group.concept_group)
            .unwrap_or_default()
            .into_iter()
            .flat_map(|cg| cg.concept_properties)
            .next();

        debug!("Drug search for '{}' matched: {:?}", name, first.as_ref().map(|c| &c.name));
        Ok(first)
    }

    /// Fetch canonical properties for a concept identifier.
    pub async fn drug_properties(&self, rxcui: &str) -> Result<Option<DrugConcept>, LookupError> {
        let url = format!("{}/rxcui/{}/properties.json", self.base_url, rxcui);
        let response = self.client.get(&url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::BadStatus { status: status.as_u16() });
        }

        let body = response.text().await?;
        let parsed: PropertiesResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::MalformedResponse { details: e.to_string() })?;

        Ok(parsed.properties)
    }

    /// Resolve a recognized name to its canonical identification: search,
    /// then enrich the first match with its properties record.
    pub async fn lookup(&self, name: &str) -> Result<Option<DrugLookupResult>, LookupError> {
        let concept = match self.search_drug(name).await? {
            Some(concept) => concept,
            None => return Ok(None),
        };

        let canonical = self.drug_properties(&concept.rxcui).await?.unwrap_or(concept);

        Ok(Some(DrugLookupResult {
            name: canonical.name,
            rxcui: canonical.rxcui,
            tty: canonical.tty,
        }))
    }
}
