//! Provider identifiers, the transport boundary, and the registry.

pub mod arcgis;
pub mod nominatim;

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::prelude::*;

/// Identifier of a geocoding provider.
///
/// The set is fixed: a name outside of it is a recoverable condition for the
/// caller, never a hard error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Arcgis,
    Baidu,
    Bing,
    Gaode,
    GeocodeFarm,
    Geolytica,
    Geonames,
    Ottawa,
    Google,
    Here,
    LocationIq,
    Mapbox,
    Mapquest,
    Opencage,
    Osm,
    Tamu,
    Tomtom,
    W3w,
    Yahoo,
    Yandex,
    Tgos,
}

impl ProviderId {
    pub const ALL: [Self; 21] = [
        Self::Arcgis,
        Self::Baidu,
        Self::Bing,
        Self::Gaode,
        Self::GeocodeFarm,
        Self::Geolytica,
        Self::Geonames,
        Self::Ottawa,
        Self::Google,
        Self::Here,
        Self::LocationIq,
        Self::Mapbox,
        Self::Mapquest,
        Self::Opencage,
        Self::Osm,
        Self::Tamu,
        Self::Tomtom,
        Self::W3w,
        Self::Yahoo,
        Self::Yandex,
        Self::Tgos,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arcgis => "arcgis",
            Self::Baidu => "baidu",
            Self::Bing => "bing",
            Self::Gaode => "gaode",
            Self::GeocodeFarm => "geocodefarm",
            Self::Geolytica => "geolytica",
            Self::Geonames => "geonames",
            Self::Ottawa => "ottawa",
            Self::Google => "google",
            Self::Here => "here",
            Self::LocationIq => "locationiq",
            Self::Mapbox => "mapbox",
            Self::Mapquest => "mapquest",
            Self::Opencage => "opencage",
            Self::Osm => "osm",
            Self::Tamu => "tamu",
            Self::Tomtom => "tomtom",
            Self::W3w => "w3w",
            Self::Yahoo => "yahoo",
            Self::Yandex => "yandex",
            Self::Tgos => "tgos",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderId {
    type Err = UnknownProviderName;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| UnknownProviderName { name: name.to_owned() })
    }
}

#[derive(Debug, Error)]
#[error("unknown provider name `{name}`")]
pub struct UnknownProviderName {
    pub name: String,
}

/// Payload of one provider call, carrying up to two candidate
/// representations of the coordinates.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Builder)]
pub struct ProviderResponse {
    /// Well-known-text representation, expected as `POINT(<x> <y>)`.
    #[builder(into)]
    pub wkt: Option<String>,

    /// Structured representation, expected to carry `x` and `y` keys with
    /// numeric-parseable values.
    pub structured: Option<Map<String, Value>>,
}

impl ProviderResponse {
    /// Render both representations of one coordinate pair.
    pub fn from_xy(x: f64, y: f64) -> Self {
        let mut structured = Map::new();
        structured.insert("x".to_owned(), Value::from(x));
        structured.insert("y".to_owned(), Value::from(y));
        Self { wkt: Some(format!("POINT({x} {y})")), structured: Some(structured) }
    }
}

/// The transport boundary: one call per (address, provider) pair.
///
/// Implementations own authentication and wire formats; the core only sees
/// the returned [`ProviderResponse`] or the error.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn geocode(&self, address: &str, http: &reqwest::Client) -> Result<ProviderResponse>;
}

/// Maps provider identifiers to their transports, resolved once at
/// construction time.
#[must_use]
#[derive(Clone, Default)]
pub struct Registry(HashMap<ProviderId, Arc<dyn Provider>>);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-wired with the transports shipped by this crate.
    pub fn with_default_providers() -> Self {
        let mut registry = Self::new();
        registry.register(ProviderId::Osm, Arc::new(nominatim::Nominatim));
        registry.register(ProviderId::Arcgis, Arc::new(arcgis::Arcgis));
        registry
    }

    /// Register or replace the transport for an identifier.
    pub fn register(&mut self, id: ProviderId, provider: Arc<dyn Provider>) {
        self.0.insert(id, provider);
    }

    #[must_use]
    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn Provider>> {
        self.0.get(&id).cloned()
    }
}
