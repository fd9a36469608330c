use crate::error::{Error, ErrorKind};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Filters of `/product/search`. Only products in `taxon` are returned.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct ProductQuery {
    pub id: Option<String>,
    pub name: Option<String>,
    pub taxon: u64,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            taxon: 0,
            limit: 10,
            offset: 0,
        }
    }
}

/// Endpoints of the product API. All of them answer JSON to a GET.
#[derive(Clone, PartialEq, Debug)]
pub enum Endpoint {
    /// `None` is the taxonomy root.
    Taxonomy(Option<u64>),
    TaxonomiesContainingProduct(String),
    Product(String),
    ProductSearch(ProductQuery),
    LuckyProduct { only_food: bool },
    Scratchpad(u64),
}

impl Endpoint {
    fn segments(&self) -> Vec<String> {
        match self {
            Endpoint::Taxonomy(None) => vec!["taxonomy".to_string()],
            Endpoint::Taxonomy(Some(id)) => vec!["taxonomy".to_string(), id.to_string()],
            Endpoint::TaxonomiesContainingProduct(id) => vec![
                "taxonomy".to_string(),
                "containing-product".to_string(),
                id.clone(),
            ],
            Endpoint::Product(id) => vec!["product".to_string(), id.clone()],
            Endpoint::ProductSearch(_) => vec!["product".to_string(), "search".to_string()],
            Endpoint::LuckyProduct { .. } => vec!["product".to_string(), "lucky".to_string()],
            Endpoint::Scratchpad(id) => vec!["scratch".to_string(), id.to_string()],
        }
    }

    /// Full request URL of this endpoint under `api_base_url`.
    pub fn url(&self, api_base_url: &str) -> Result<String, Error> {
        let mut url = match Url::parse(api_base_url) {
            Ok(url) => url,
            Err(error) => {
                return Err(Error::new(
                    ErrorKind::InvalidTarget,
                    format!("invalid api base url {}: {}", api_base_url, error),
                ))
            }
        };

        match url.path_segments_mut() {
            Ok(mut path) => {
                path.pop_if_empty().extend(self.segments());
            }
            Err(_) => {
                return Err(Error::new(
                    ErrorKind::InvalidTarget,
                    format!("api base url {} cannot have a path", api_base_url),
                ))
            }
        }

        match self {
            Endpoint::ProductSearch(query) => {
                let mut pairs = url.query_pairs_mut();
                if let Some(id) = &query.id {
                    pairs.append_pair("id", id);
                }
                if let Some(name) = &query.name {
                    pairs.append_pair("name", name);
                }
                pairs
                    .append_pair("taxon", &query.taxon.to_string())
                    .append_pair("limit", &query.limit.to_string())
                    .append_pair("offset", &query.offset.to_string());
            }
            Endpoint::LuckyProduct { only_food } => {
                url.query_pairs_mut()
                    .append_pair("only_food", &only_food.to_string());
            }
            _ => (),
        }

        Ok(url.into())
    }
}
