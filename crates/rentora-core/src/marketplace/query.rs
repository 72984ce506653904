//! Filter <-> query-string codec.
//!
//! Search filters serialize to a compact `key=value&...` form so a
//! search can be shared or replayed verbatim. Decoding is lenient:
//! unknown keys and malformed values are skipped rather than rejected.

use url::form_urlencoded;

use crate::repository::SortOrder;
use crate::repository::property::{ListingFilter, SortField};

/// Encode a filter as a query string, omitting unset fields.
///
/// The produced string carries no leading `?`.
pub fn to_query_string(filter: &ListingFilter) -> String {
    let mut encoder = form_urlencoded::Serializer::new(String::new());
    if let Some(city) = &filter.city {
        encoder.append_pair("city", city);
    }
    if let Some(property_type) = &filter.property_type {
        encoder.append_pair("type", &property_type.to_string());
    }
    if let Some(min_rent) = filter.min_rent {
        encoder.append_pair("min_rent", &min_rent.to_string());
    }
    if let Some(max_rent) = filter.max_rent {
        encoder.append_pair("max_rent", &max_rent.to_string());
    }
    if let Some(min_bedrooms) = filter.min_bedrooms {
        encoder.append_pair("min_beds", &min_bedrooms.to_string());
    }
    if let Some(furnished) = filter.furnished {
        encoder.append_pair("furnished", if furnished { "true" } else { "false" });
    }
    if let Some(status) = &filter.status {
        encoder.append_pair("status", &status.to_string());
    }
    if let Some(sort_by) = &filter.sort_by {
        encoder.append_pair("sort", &sort_by.to_string());
    }
    if let Some(sort_order) = &filter.sort_order {
        encoder.append_pair("order", &sort_order.to_string());
    }
    if let Some(limit) = filter.limit {
        encoder.append_pair("limit", &limit.to_string());
    }
    if let Some(offset) = filter.offset {
        encoder.append_pair("offset", &offset.to_string());
    }
    encoder.finish()
}

/// Decode a query string back into a filter.
///
/// Accepts an optional leading `?`. Keys it does not recognize and
/// values that fail to parse are ignored.
pub fn from_query_string(query: &str) -> ListingFilter {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filter = ListingFilter::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "city" => {
                if !value.is_empty() {
                    filter.city = Some(value.into_owned());
                }
            }
            "type" => filter.property_type = value.parse().ok(),
            "min_rent" => filter.min_rent = value.parse().ok(),
            "max_rent" => filter.max_rent = value.parse().ok(),
            "min_beds" => filter.min_bedrooms = value.parse().ok(),
            "furnished" => {
                filter.furnished = match value.as_ref() {
                    "true" | "1" | "yes" => Some(true),
                    "false" | "0" | "no" => Some(false),
                    _ => None,
                }
            }
            "status" => filter.status = value.parse().ok(),
            "sort" => filter.sort_by = value.parse::<SortField>().ok(),
            "order" => filter.sort_order = value.parse::<SortOrder>().ok(),
            "limit" => filter.limit = value.parse().ok(),
            "offset" => filter.offset = value.parse().ok(),
            _ => {}
        }
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentora_types::property::{ListingStatus, PropertyType};

    #[test]
    fn test_encode_skips_unset_fields() {
        let filter = ListingFilter {
            city: Some("Bristol".to_string()),
            min_rent: Some(80_000),
            ..Default::default()
        };
        assert_eq!(to_query_string(&filter), "city=Bristol&min_rent=80000");
    }

    #[test]
    fn test_encode_empty_filter_is_empty_string() {
        assert_eq!(to_query_string(&ListingFilter::default()), "");
    }

    #[test]
    fn test_decode_full_query() {
        let filter = from_query_string(
            "city=Leeds&type=apartment&min_rent=50000&max_rent=120000&min_beds=2\
             &furnished=true&status=available&sort=rent&order=asc&limit=10&offset=20",
        );
        assert_eq!(filter.city.as_deref(), Some("Leeds"));
        assert_eq!(filter.property_type, Some(PropertyType::Apartment));
        assert_eq!(filter.min_rent, Some(50_000));
        assert_eq!(filter.max_rent, Some(120_000));
        assert_eq!(filter.min_bedrooms, Some(2));
        assert_eq!(filter.furnished, Some(true));
        assert_eq!(filter.status, Some(ListingStatus::Available));
        assert_eq!(filter.sort_by, Some(SortField::Rent));
        assert_eq!(filter.sort_order, Some(SortOrder::Asc));
        assert_eq!(filter.limit, Some(10));
        assert_eq!(filter.offset, Some(20));
    }

    #[test]
    fn test_decode_tolerates_junk() {
        let filter = from_query_string("?city=York&bogus=1&min_rent=abc&type=castle");
        assert_eq!(filter.city.as_deref(), Some("York"));
        assert_eq!(filter.min_rent, None, "non-numeric rent must be dropped");
        assert_eq!(filter.property_type, None, "unknown type must be dropped");
    }

    #[test]
    fn test_decode_percent_encoded_city() {
        let filter = from_query_string("city=Newcastle%20upon%20Tyne");
        assert_eq!(filter.city.as_deref(), Some("Newcastle upon Tyne"));
    }

    #[test]
    fn test_roundtrip_preserves_filter() {
        let original = ListingFilter {
            city: Some("Brighton".to_string()),
            property_type: Some(PropertyType::House),
            min_rent: Some(90_000),
            max_rent: None,
            min_bedrooms: Some(3),
            furnished: Some(false),
            status: Some(ListingStatus::Let),
            sort_by: Some(SortField::Bedrooms),
            sort_order: Some(SortOrder::Desc),
            limit: Some(5),
            offset: None,
        };
        let decoded = from_query_string(&to_query_string(&original));
        assert_eq!(decoded, original);
    }
}
