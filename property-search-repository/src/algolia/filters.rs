//! Algolia filter builders.
//!
//! This module turns a `SearchQuery` into the query string and filter
//! expression sent to the search provider.
//!
//! The filter expression is a list of clauses joined with `AND`:
//! - one parenthesized `OR` group per non-empty location-code list
//! - `>=` / `<=` numeric clauses for guest count, bedrooms and price
//! - `amenity:true` for every requested amenity
//! - `NOT bookedDate:YYYY-MM-DD` for every day of the stay, both ends included
//!
//! Caller-supplied strings are escaped before interpolation so they cannot
//! change the structure of the expression.

use std::borrow::Cow;

use chrono::NaiveDate;
use tracing::warn;

use property_search_shared::{
    parse_calendar_date, Amenity, LocationCode, ProviderSearchRequest, SearchQuery,
};

/// Keywords of the filter grammar. A bare value equal to one of these
/// would be read as an operator.
const RESERVED_WORDS: [&str; 4] = ["AND", "OR", "NOT", "TO"];

/// Longest stay, in days counting both ends, that is turned into date clauses.
pub const MAX_STAY_DAYS: i64 = 366;

/// Build the full provider search request for a query.
///
/// The query text is the property name, or the empty string (match all).
/// Pagination is passed through, with a zero page size replaced by the default.
pub fn build_search_request(query: &SearchQuery) -> ProviderSearchRequest {
    ProviderSearchRequest {
        query: query.query_text().to_string(),
        filters: build_filter_expression(query),
        page: query.page,
        hits_per_page: query.effective_hits_per_page(),
    }
}

/// Build the filter expression for a query.
///
/// Returns the empty string when the query carries no constraint.
pub fn build_filter_expression(query: &SearchQuery) -> String {
    let mut clauses = Vec::new();

    for (field, codes) in [
        ("city_code", &query.city_codes),
        ("district_code", &query.district_codes),
        ("ward_code", &query.ward_codes),
    ] {
        if let Some(clause) = location_clause(field, codes) {
            clauses.push(clause);
        }
    }

    // Zero means "no constraint", so these are lower bounds only when positive
    if let Some(max_guest) = positive(query.max_guest) {
        clauses.push(format!("max_guest >= {}", format_number(max_guest)));
    }
    if let Some(bed_rooms) = positive(query.bed_rooms) {
        clauses.push(format!("bed_rooms >= {}", format_number(bed_rooms)));
    }
    if let Some(min_price) = positive(query.min_price) {
        clauses.push(format!("price >= {}", format_number(min_price)));
    }
    if let Some(max_price) = positive(query.max_price) {
        clauses.push(format!("price <= {}", format_number(max_price)));
    }

    for amenity in Amenity::ALL {
        if query.requires(amenity) {
            clauses.push(format!("{}:true", amenity.field_name()));
        }
    }

    clauses.extend(booked_date_clauses(query));

    clauses.join(" AND ")
}

/// Build `(field:a OR field:b ...)` for a non-empty list of codes.
fn location_clause(field: &str, codes: &[LocationCode]) -> Option<String> {
    if codes.is_empty() {
        return None;
    }

    let alternatives: Vec<String> = codes
        .iter()
        .map(|code| match code {
            LocationCode::Number(n) => format!("{}:{}", field, n),
            LocationCode::Text(text) => format!("{}:{}", field, escape_filter_value(text)),
        })
        .collect();

    Some(format!("({})", alternatives.join(" OR ")))
}

/// One negated clause per day of the stay.
///
/// Both dates must be present and parseable. A check-out before the
/// check-in yields no clauses, and so does a stay longer than
/// [`MAX_STAY_DAYS`].
fn booked_date_clauses(query: &SearchQuery) -> Vec<String> {
    let (Some(raw_check_in), Some(raw_check_out)) =
        (query.check_in_date.as_deref(), query.check_out_date.as_deref())
    else {
        return Vec::new();
    };

    let (Some(check_in), Some(check_out)) = (
        parse_calendar_date(raw_check_in),
        parse_calendar_date(raw_check_out),
    ) else {
        warn!(
            check_in_date = %raw_check_in,
            check_out_date = %raw_check_out,
            "Ignoring unparseable stay dates"
        );
        return Vec::new();
    };

    let stay_length = (check_out - check_in).num_days() + 1;
    if stay_length > MAX_STAY_DAYS {
        warn!(
            check_in_date = %check_in,
            check_out_date = %check_out,
            stay_length,
            max_stay_days = MAX_STAY_DAYS,
            "Ignoring stay range longer than the maximum"
        );
        return Vec::new();
    }

    stay_days(check_in, check_out)
        .map(|day| format!("NOT bookedDate:{}", day.format("%Y-%m-%d")))
        .collect()
}

/// Every calendar day from `check_in` to `check_out`, inclusive.
fn stay_days(check_in: NaiveDate, check_out: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    check_in.iter_days().take_while(move |day| *day <= check_out)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Render a number the way a client wrote it: integral values without a
/// decimal point.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Quote a string value unless it is a plain token.
///
/// Plain tokens are non-empty runs of ASCII alphanumerics, `_`, `-` and `.`
/// that are not a grammar keyword. Anything else is wrapped in double quotes
/// with `\` and `"` backslash-escaped.
fn escape_filter_value(value: &str) -> Cow<'_, str> {
    let is_plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !RESERVED_WORDS
            .iter()
            .any(|word| word.eq_ignore_ascii_case(value));

    if is_plain {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query_from(value: serde_json::Value) -> SearchQuery {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_query_has_no_filter() {
        let request = build_search_request(&SearchQuery::default());

        assert_eq!(request.query, "");
        assert_eq!(request.filters, "");
        assert_eq!(request.page, 0);
        assert_eq!(request.hits_per_page, 20);
    }

    #[test]
    fn test_villa_scenario() {
        let query = query_from(json!({
            "propertyName": "Villa",
            "city_codes": ["HN"],
            "max_guest": 4,
            "wifi": true
        }));

        let request = build_search_request(&query);

        assert_eq!(request.query, "Villa");
        assert_eq!(request.filters, "(city_code:HN) AND max_guest >= 4 AND wifi:true");
    }

    #[test]
    fn test_location_groups_are_or_within_and_between() {
        let query = query_from(json!({
            "city_codes": ["01", "79"],
            "district_codes": ["001"],
            "ward_codes": ["00001", "00004", "00006"]
        }));

        assert_eq!(
            build_filter_expression(&query),
            "(city_code:01 OR city_code:79) AND (district_code:001) AND \
             (ward_code:00001 OR ward_code:00004 OR ward_code:00006)"
        );
    }

    #[test]
    fn test_empty_location_groups_are_skipped() {
        let query = query_from(json!({
            "city_codes": [],
            "district_codes": ["760"],
            "ward_codes": []
        }));

        assert_eq!(build_filter_expression(&query), "(district_code:760)");
    }

    #[test]
    fn test_unusable_code_entries_keep_the_rest_of_the_group() {
        let query = query_from(json!({
            "city_codes": ["HN", null],
            "district_codes": ["001", 1.5]
        }));

        assert_eq!(
            build_filter_expression(&query),
            "(city_code:HN) AND (district_code:001)"
        );
    }

    #[test]
    fn test_numeric_location_codes_render_bare() {
        let query = query_from(json!({"city_codes": [1, 79]}));

        assert_eq!(
            build_filter_expression(&query),
            "(city_code:1 OR city_code:79)"
        );
    }

    #[test]
    fn test_guest_count_zero_or_absent_has_no_clause() {
        assert_eq!(build_filter_expression(&query_from(json!({"max_guest": 0}))), "");
        assert_eq!(build_filter_expression(&query_from(json!({}))), "");
        assert_eq!(
            build_filter_expression(&query_from(json!({"max_guest": 3}))),
            "max_guest >= 3"
        );
    }

    #[test]
    fn test_negative_counts_have_no_clause() {
        let query = query_from(json!({"max_guest": -2, "bed_rooms": -1, "min_price": -5}));
        assert_eq!(build_filter_expression(&query), "");
    }

    #[test]
    fn test_bedrooms_and_price_range() {
        let query = query_from(json!({
            "bed_rooms": 2,
            "min_price": 500000,
            "max_price": 1500000.5
        }));

        assert_eq!(
            build_filter_expression(&query),
            "bed_rooms >= 2 AND price >= 500000 AND price <= 1500000.5"
        );
    }

    #[test]
    fn test_amenities_only_when_true() {
        let query = query_from(json!({
            "tv": true,
            "pool": false,
            "bbq": true,
            "airConditioner": true,
            "petAllowance": null
        }));

        assert_eq!(
            build_filter_expression(&query),
            "tv:true AND bbq:true AND airConditioner:true"
        );
    }

    #[test]
    fn test_all_amenities_in_order() {
        let query = Amenity::ALL
            .iter()
            .fold(SearchQuery::default(), |q, a| q.with_amenity(*a));

        assert_eq!(
            build_filter_expression(&query),
            "tv:true AND petAllowance:true AND pool:true AND washingMachine:true AND \
             breakfast:true AND bbq:true AND wifi:true AND airConditioner:true"
        );
    }

    #[test]
    fn test_stay_range_is_inclusive() {
        let query = query_from(json!({
            "check_in_date": "2024-01-10",
            "check_out_date": "2024-01-12"
        }));

        assert_eq!(
            build_filter_expression(&query),
            "NOT bookedDate:2024-01-10 AND NOT bookedDate:2024-01-11 AND NOT bookedDate:2024-01-12"
        );
    }

    #[test]
    fn test_single_night_stay() {
        let query = query_from(json!({
            "check_in_date": "2024-02-28",
            "check_out_date": "2024-02-28"
        }));

        assert_eq!(build_filter_expression(&query), "NOT bookedDate:2024-02-28");
    }

    #[test]
    fn test_stay_range_crosses_month_and_leap_day() {
        let query = query_from(json!({
            "check_in_date": "2024-02-28",
            "check_out_date": "2024-03-01"
        }));

        assert_eq!(
            build_filter_expression(&query),
            "NOT bookedDate:2024-02-28 AND NOT bookedDate:2024-02-29 AND NOT bookedDate:2024-03-01"
        );
    }

    #[test]
    fn test_reversed_stay_range_produces_no_clauses() {
        let query = query_from(json!({
            "check_in_date": "2024-01-12",
            "check_out_date": "2024-01-10"
        }));

        assert_eq!(build_filter_expression(&query), "");
    }

    #[test]
    fn test_stay_range_is_capped() {
        // 2024 is a leap year, so this is exactly the maximum
        let full_year = query_from(json!({
            "check_in_date": "2024-01-01",
            "check_out_date": "2024-12-31"
        }));
        let filter = build_filter_expression(&full_year);
        assert_eq!(filter.matches("NOT bookedDate:").count(), MAX_STAY_DAYS as usize);
        assert!(filter.starts_with("NOT bookedDate:2024-01-01 AND "));
        assert!(filter.ends_with(" AND NOT bookedDate:2024-12-31"));

        let one_day_over = query_from(json!({
            "check_in_date": "2024-01-01",
            "check_out_date": "2025-01-01",
            "wifi": true
        }));
        assert_eq!(build_filter_expression(&one_day_over), "wifi:true");

        let whole_calendar = query_from(json!({
            "check_in_date": "0001-01-01",
            "check_out_date": "9999-12-31"
        }));
        assert_eq!(build_filter_expression(&whole_calendar), "");
    }

    #[test]
    fn test_out_of_range_years_are_ignored() {
        let query = query_from(json!({
            "check_in_date": "+100000-01-01",
            "check_out_date": "+100000-01-03"
        }));
        assert_eq!(build_filter_expression(&query), "");
    }

    #[test]
    fn test_stay_requires_both_dates() {
        let query = query_from(json!({"check_in_date": "2024-01-10"}));
        assert_eq!(build_filter_expression(&query), "");
    }

    #[test]
    fn test_timestamps_are_reduced_to_dates() {
        let query = query_from(json!({
            "check_in_date": "2024-01-10T14:00:00Z",
            "check_out_date": "2024-01-11T11:00:00Z"
        }));

        assert_eq!(
            build_filter_expression(&query),
            "NOT bookedDate:2024-01-10 AND NOT bookedDate:2024-01-11"
        );
    }

    #[test]
    fn test_unparseable_dates_are_ignored() {
        let query = query_from(json!({
            "check_in_date": "2024-01-10 OR wifi:true",
            "check_out_date": "2024-01-12",
            "tv": true
        }));

        assert_eq!(build_filter_expression(&query), "tv:true");
    }

    #[test]
    fn test_clause_order_across_all_groups() {
        let query = query_from(json!({
            "propertyName": "Homestay",
            "city_codes": ["HCM"],
            "ward_codes": ["W1"],
            "max_guest": 2,
            "bed_rooms": 1,
            "max_price": 800000,
            "wifi": true,
            "check_in_date": "2024-05-01",
            "check_out_date": "2024-05-02"
        }));

        assert_eq!(
            build_filter_expression(&query),
            "(city_code:HCM) AND (ward_code:W1) AND max_guest >= 2 AND bed_rooms >= 1 AND \
             price <= 800000 AND wifi:true AND NOT bookedDate:2024-05-01 AND NOT bookedDate:2024-05-02"
        );
    }

    #[test]
    fn test_injected_codes_are_quoted() {
        let query = query_from(json!({
            "city_codes": ["HN) OR (price > 0", "Ha Noi", "say \"hi\"", "back\\slash"]
        }));

        assert_eq!(
            build_filter_expression(&query),
            r#"(city_code:"HN) OR (price > 0" OR city_code:"Ha Noi" OR city_code:"say \"hi\"" OR city_code:"back\\slash")"#
        );
    }

    #[test]
    fn test_reserved_words_and_empty_codes_are_quoted() {
        assert_eq!(escape_filter_value("OR"), "\"OR\"");
        assert_eq!(escape_filter_value("not"), "\"not\"");
        assert_eq!(escape_filter_value(""), "\"\"");
        assert_eq!(escape_filter_value("Hà Nội"), "\"Hà Nội\"");
        assert_eq!(escape_filter_value("HN-01.a_b"), "HN-01.a_b");
        assert_eq!(escape_filter_value("ORANGE"), "ORANGE");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(1500000.0), "1500000");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.75), "0.75");
    }

    #[test]
    fn test_pagination_is_passed_through() {
        let query = query_from(json!({"page": 3, "hitsPerPage": 5}));
        let request = build_search_request(&query);

        assert_eq!(request.page, 3);
        assert_eq!(request.hits_per_page, 5);
    }
}
