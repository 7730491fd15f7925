//! Add-on manifest served at `/manifest.json`.

use serde::Serialize;

use crate::id::ID_PREFIX;

/// Id of the single catalog this add-on publishes.
pub const CATALOG_ID: &str = "vidbridge-movies";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<String>,
    pub catalogs: Vec<ManifestCatalog>,
    pub id_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestCatalog {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,
    pub extra: Vec<ExtraField>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraField {
    pub name: String,
    pub is_required: bool,
}

impl ExtraField {
    fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_required: false,
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            id: "org.vidbridge.addon".to_string(),
            version: crate::VERSION.to_string(),
            name: "Video Bridge".to_string(),
            description: "Catalog and streams scraped from a video listing site".to_string(),
            resources: vec!["catalog".into(), "stream".into(), "meta".into()],
            types: vec!["movie".into(), "series".into()],
            catalogs: vec![ManifestCatalog {
                kind: "movie".to_string(),
                id: CATALOG_ID.to_string(),
                name: "Video Bridge Movies".to_string(),
                extra: vec![ExtraField::optional("search"), ExtraField::optional("skip")],
            }],
            id_prefixes: vec![ID_PREFIX.to_string()],
        }
    }
}
