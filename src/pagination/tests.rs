//! Pagination tests

use super::*;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Offset
// ============================================================================

#[test]
fn test_offset_build_page_request() {
    let paginator = OffsetPaginator::new("offset", "limit", 100);
    let params = paginator.build_page_request(2, 50);

    assert_eq!(params.offset, 50);
    assert_eq!(params.limit, 50);
    assert_eq!(params.query.get("offset"), Some("50"));
    assert_eq!(params.query.get("limit"), Some("50"));
}

#[test]
fn test_offset_clamps_limit() {
    let paginator = OffsetPaginator::new("offset", "limit", 100);
    let params = paginator.build_page_request(1, 500);

    assert_eq!(params.offset, 0);
    assert_eq!(params.limit, 100);
    assert_eq!(params.query.get("limit"), Some("100"));
}

#[test]
fn test_offset_uses_clamped_limit_for_offset() {
    let paginator = OffsetPaginator::new("offset", "limit", 10);
    let params = paginator.build_page_request(3, 25);

    assert_eq!(params.limit, 10);
    assert_eq!(params.offset, 20);
}

#[test_case(0, 20, 0 ; "page zero treated as first page")]
#[test_case(1, 20, 0 ; "first page")]
#[test_case(5, 20, 80 ; "fifth page")]
fn test_offset_page_numbers(page: u32, size: u32, expected_offset: u64) {
    let paginator = OffsetPaginator::new("skip", "take", 1000);
    let params = paginator.build_page_request(page, size);

    assert_eq!(params.offset, expected_offset);
    assert_eq!(params.page_number, page.max(1));
    assert_eq!(params.query.get("skip"), Some(expected_offset.to_string().as_str()));
}

#[test]
fn test_zero_page_size_becomes_one() {
    let paginator = OffsetPaginator::new("offset", "limit", 100);
    assert_eq!(paginator.build_page_request(1, 0).limit, 1);
}

// ============================================================================
// Page number
// ============================================================================

#[test]
fn test_page_number_build_page_request() {
    let paginator = PageNumberPaginator::new("_page", "_perPage", 1000);
    let params = paginator.build_page_request(3, 50);

    assert_eq!(params.query.get("_page"), Some("3"));
    assert_eq!(params.query.get("_perPage"), Some("50"));
    assert_eq!(params.offset, 100);
}

#[test]
fn test_page_number_zero_based_api() {
    let paginator = PageNumberPaginator::new("page", "size", 100).with_start_page(0);

    assert_eq!(paginator.build_page_request(1, 10).query.get("page"), Some("0"));
    assert_eq!(paginator.build_page_request(4, 10).query.get("page"), Some("3"));
}

#[test]
fn test_page_number_saturates_at_u32_max() {
    let paginator = PageNumberPaginator::new("page", "size", 100).with_start_page(2);
    let params = paginator.build_page_request(u32::MAX, 10);

    assert_eq!(params.query.get("page"), Some(u32::MAX.to_string().as_str()));
    assert_eq!(params.offset, u64::from(u32::MAX - 1) * 10);
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn test_cursor_first_page_has_no_cursor() {
    let paginator = CursorPaginator::new("cursor", "response_metadata.next_cursor", "limit", 200);
    let params = paginator.build_page_request(1, 500);

    assert_eq!(params.limit, 200);
    assert_eq!(params.query.get("limit"), Some("200"));
    assert!(!params.query.contains_key("cursor"));
}

#[test]
fn test_cursor_next_cursor_and_request() {
    let paginator = CursorPaginator::new("cursor", "response_metadata.next_cursor", "limit", 200);
    let body = json!({
        "channels": [],
        "response_metadata": {"next_cursor": "dGVhbTpDMDYxRkE1UEI="}
    });

    let cursor = paginator.next_cursor(&body).unwrap();
    assert_eq!(cursor, "dGVhbTpDMDYxRkE1UEI=");

    let first = paginator.build_page_request(1, 20);
    let next = paginator.cursor_request(&first, &cursor).unwrap();
    assert_eq!(next.query.get("cursor"), Some("dGVhbTpDMDYxRkE1UEI="));
    assert_eq!(next.query.get("limit"), Some("20"));
}

#[test]
fn test_cursor_empty_token_means_done() {
    let paginator = CursorPaginator::new("cursor", "response_metadata.next_cursor", "limit", 200);

    assert!(paginator
        .next_cursor(&json!({"response_metadata": {"next_cursor": ""}}))
        .is_none());
    assert!(paginator.next_cursor(&json!({})).is_none());
}

#[test]
fn test_non_cursor_strategies_have_no_cursor() {
    let paginator = OffsetPaginator::new("offset", "limit", 100);
    let params = paginator.build_page_request(1, 10);

    assert!(paginator.next_cursor(&json!({"next": "x"})).is_none());
    assert!(paginator.cursor_request(&params, "x").is_none());
}

// ============================================================================
// No pagination
// ============================================================================

#[test]
fn test_no_paginator_is_local() {
    let paginator = NoPaginator;
    let params = paginator.build_page_request(2, 5000);

    assert!(!paginator.is_server_side());
    assert!(params.query.is_empty());
    assert_eq!(params.limit, 5000);
    assert_eq!(params.offset, 5000);
}

#[test]
fn test_paginate_locally() {
    let records: Vec<_> = (1..=7).map(|i| json!({"id": i})).collect();
    let params = NoPaginator.build_page_request(2, 3);

    let page = paginate_locally(records, &params);

    assert_eq!(page.items, vec![json!({"id": 4}), json!({"id": 5}), json!({"id": 6})]);
    assert_eq!(page.total_records, 7);
    assert_eq!(page.total_pages, 3);
    assert!(page.total_known);
}

#[test]
fn test_paginate_locally_past_end() {
    let records = vec![json!({"id": 1})];
    let params = NoPaginator.build_page_request(4, 10);

    let page = paginate_locally(records, &params);
    assert!(page.items.is_empty());
    assert_eq!(page.total_records, 1);
}

// ============================================================================
// Result envelope
// ============================================================================

#[test]
fn test_wrap_results_unknown_total() {
    let items = vec![json!({"id": 1}), json!({"id": 2})];
    let page = wrap_results(items, 3, 50, None);

    assert_eq!(page.page_number, 3);
    assert_eq!(page.page_size, 50);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_records, 2);
    assert!(!page.total_known);
}

#[test_case(0, 1 ; "no records still one page")]
#[test_case(100, 2 ; "exact multiple")]
#[test_case(101, 3 ; "partial last page")]
fn test_wrap_results_known_total(total: u64, expected_pages: u64) {
    let page = wrap_results(Vec::new(), 1, 50, Some(total));

    assert_eq!(page.total_records, total);
    assert_eq!(page.total_pages, expected_pages);
    assert!(page.total_known);
}

#[test]
fn test_paged_result_next_cursor_serialization() {
    let page = PagedResult::empty(1, 10);
    let value = serde_json::to_value(&page).unwrap();
    assert!(value.get("next_cursor").is_none());

    let page = page.with_next_cursor(Some("abc".to_string()));
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["next_cursor"], "abc");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_defaults_from_yaml() {
    let config: PaginationConfig = serde_yaml::from_str("type: offset").unwrap();
    assert_eq!(config, PaginationConfig::offset("offset", "limit", 100));

    let config: PaginationConfig = serde_yaml::from_str(
        "type: cursor\ncursor_path: response_metadata.next_cursor\nmax_page_size: 1000",
    )
    .unwrap();
    assert_eq!(
        config,
        PaginationConfig::cursor("cursor", "response_metadata.next_cursor", "limit", 1000)
    );

    let config: PaginationConfig = serde_yaml::from_str("type: none").unwrap();
    assert_eq!(config, PaginationConfig::None);
}

#[test]
fn test_config_builds_matching_paginator() {
    let paginator = PaginationConfig::page_number("_page", "_perPage", 1000).paginator();
    let params = paginator.build_page_request(2, 10);
    assert_eq!(params.query.get("_page"), Some("2"));

    let paginator = PaginationConfig::offset("offset", "limit", 10).paginator();
    assert_eq!(paginator.max_page_size(), Some(10));
    assert_eq!(paginator.build_page_request(1, 500).limit, 10);

    assert!(!PaginationConfig::None.paginator().is_server_side());
}
