//! Paged list envelopes.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Links to neighbouring pages of a list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinks {
    /// First page.
    pub first: Option<String>,
    /// Previous page, absent on the first page.
    pub previous: Option<String>,
    /// Next page, absent on the last page.
    pub next: Option<String>,
    /// Last page.
    pub last: Option<String>,
}

/// One page of a list endpoint.
///
/// Items keep the order the API returned them in.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// Total number of items across all pages.
    pub total_count: u64,
    /// Offset of this page.
    pub offset: u64,
    /// Number of items on this page.
    pub count: u64,
    /// The items on this page.
    pub data: Vec<T>,
    /// Page navigation.
    pub links: Option<ListLinks>,
}

impl<T> ListResponse<T> {
    /// Returns `true` if another page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.links.as_ref().is_some_and(|links| links.next.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IssuerResponse;
    use serde_json::json;

    #[test]
    fn test_list_preserves_order() {
        let body = json!({
            "totalCount": 3,
            "offset": 0,
            "count": 3,
            "data": [
                { "resource": "issuer", "id": "ideal_ABNANL2A", "name": "ABN AMRO", "method": "ideal" },
                { "resource": "issuer", "id": "ideal_ASNBNL21", "name": "ASN Bank", "method": "ideal" },
                { "resource": "issuer", "id": "ideal_INGBNL2A", "name": "ING", "method": "ideal" }
            ]
        });
        let list: ListResponse<IssuerResponse> = serde_json::from_value(body).unwrap();
        let ids: Vec<_> = list.data.iter().map(|issuer| issuer.id.as_str()).collect();
        assert_eq!(ids, ["ideal_ABNANL2A", "ideal_ASNBNL21", "ideal_INGBNL2A"]);
        assert!(!list.has_next());
    }

    #[test]
    fn test_has_next_reads_links() {
        let body = json!({
            "totalCount": 20,
            "offset": 0,
            "count": 10,
            "data": [],
            "links": {
                "first": "https://api.mollie.nl/v1/issuers?offset=0&count=10",
                "previous": null,
                "next": "https://api.mollie.nl/v1/issuers?offset=10&count=10",
                "last": "https://api.mollie.nl/v1/issuers?offset=10&count=10"
            }
        });
        let list: ListResponse<IssuerResponse> = serde_json::from_value(body).unwrap();
        assert!(list.has_next());
        assert_eq!(list.links.unwrap().previous, None);
    }
}
