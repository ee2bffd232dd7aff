//! OpenStreetMap Nominatim transport, serving the `osm` identifier.

use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    prelude::*,
    provider::{Provider, ProviderResponse},
};

pub struct Nominatim;

#[async_trait]
impl Provider for Nominatim {
    #[instrument(skip_all)]
    async fn geocode(&self, address: &str, http: &reqwest::Client) -> Result<ProviderResponse> {
        info!(address, "🔎 Querying Nominatim…");
        let request = SearchRequest::builder().query(address).build();
        let url = {
            let query =
                serde_qs::to_string(&request).context("failed to serialize the search request")?;
            let mut url = Url::parse("https://nominatim.openstreetmap.org/search")?;
            url.set_query(Some(&query));
            url
        };
        let results: Vec<SearchResult> = http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("failed to query Nominatim")?;
        match results.into_iter().next() {
            Some(first) => first.into_response(),
            None => Ok(ProviderResponse::default()),
        }
    }
}

#[must_use]
#[derive(Builder, Serialize)]
pub struct SearchRequest<'a> {
    #[serde(rename = "q")]
    pub query: &'a str,

    #[builder(default = "jsonv2")]
    pub format: &'a str,

    #[builder(default = 1)]
    pub limit: u32,
}

/// Nominatim returns coordinates as decimal strings.
#[derive(Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

impl SearchResult {
    fn into_response(self) -> Result<ProviderResponse> {
        let x: f64 = self.lon.parse().context("failed to parse the longitude")?;
        let y: f64 = self.lat.parse().context("failed to parse the latitude")?;
        Ok(ProviderResponse::from_xy(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_ok() -> Result {
        let request = SearchRequest::builder().query("Amsterdam").build();
        assert_eq!(serde_qs::to_string(&request)?, "q=Amsterdam&format=jsonv2&limit=1");
        Ok(())
    }

    #[test]
    fn search_result_into_response_ok() -> Result {
        let results: Vec<SearchResult> =
            serde_json::from_str(r#"[{"lat": "37.422", "lon": "-122.084", "display_name": "Googleplex"}]"#)?;
        let response = results.into_iter().next().expect("one result").into_response()?;
        assert_eq!(response.wkt.as_deref(), Some("POINT(-122.084 37.422)"));
        Ok(())
    }
}
