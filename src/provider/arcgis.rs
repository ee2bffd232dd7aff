//! ArcGIS World Geocoding transport, serving the `arcgis` identifier.

use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    prelude::*,
    provider::{Provider, ProviderResponse},
};

const ENDPOINT: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates";

pub struct Arcgis;

#[async_trait]
impl Provider for Arcgis {
    #[instrument(skip_all)]
    async fn geocode(&self, address: &str, http: &reqwest::Client) -> Result<ProviderResponse> {
        info!(address, "🔎 Querying ArcGIS…");
        let request = CandidatesRequest::builder().single_line(address).build();
        let url = {
            let query =
                serde_qs::to_string(&request).context("failed to serialize the search request")?;
            let mut url = Url::parse(ENDPOINT)?;
            url.set_query(Some(&query));
            url
        };
        let response: CandidatesResponse = http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("failed to query ArcGIS")?;
        Ok(response
            .candidates
            .into_iter()
            .next()
            .map_or_else(ProviderResponse::default, |candidate| {
                ProviderResponse::from_xy(candidate.location.x, candidate.location.y)
            }))
    }
}

#[must_use]
#[derive(Builder, Serialize)]
pub struct CandidatesRequest<'a> {
    #[serde(rename = "singleLine")]
    pub single_line: &'a str,

    #[builder(default = "json")]
    pub f: &'a str,

    #[serde(rename = "maxLocations")]
    #[builder(default = 1)]
    pub max_locations: u32,
}

#[derive(Deserialize)]
struct CandidatesResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    location: GeoPosition,
}

#[derive(Deserialize)]
struct GeoPosition {
    x: f64,
    y: f64,
}
