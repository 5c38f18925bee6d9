//! Request payload for the gallery extension query endpoint.

use serde::Serialize;

/// Base URL of the public gallery API.
pub const GALLERY_URL: &str = "https://marketplace.visualstudio.com/_apis/public/gallery";

/// Product identifier the gallery filters extensions by.
pub const VSCODE_PRODUCT: &str = "Microsoft.VisualStudio.Code";

/// Server-defined bitmask selecting which metadata the response includes
/// (versions, statistics, ...). Must be reproduced exactly; other values
/// omit fields this client reads.
pub const QUERY_FLAGS: u32 = 870;

/// Criterion restricting results to a target product.
const FILTER_TARGET: u32 = 8;

/// Criterion carrying the free-text search query.
const FILTER_SEARCH_TEXT: u32 = 10;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryPayload {
    pub filters: Vec<QueryFilter>,
    pub flags: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub criteria: Vec<Criterion>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub filter_type: u32,
    pub value: String,
}

/// Builds the query payload for a free-text search: the fixed product
/// criterion plus the trimmed query text.
pub fn extension_query(query: &str) -> QueryPayload {
    QueryPayload {
        filters: vec![QueryFilter {
            criteria: vec![
                Criterion {
                    filter_type: FILTER_TARGET,
                    value: VSCODE_PRODUCT.to_string(),
                },
                Criterion {
                    filter_type: FILTER_SEARCH_TEXT,
                    value: query.trim().to_string(),
                },
            ],
        }],
        flags: QUERY_FLAGS,
    }
}
