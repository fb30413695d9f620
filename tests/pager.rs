mod common;

#[cfg(test)]
mod tests {
    use super::common::students;
    use rollbook::libs::attendance::AttendanceRecord;
    use rollbook::libs::pager::{
        select_pager, total_pages, AdoptedPagination, ComputedPagination, PageQuery, Pager, PaginationState, ServerPageMeta,
    };
    use serde_json::{json, Value};

    fn records(count: usize) -> Vec<AttendanceRecord> {
        students(count).iter().map(AttendanceRecord::from_value).collect()
    }

    /// What a paginating server would answer for `query` over `all`.
    fn server_response(all: &[Value], query: PageQuery) -> Value {
        let state = PaginationState::compute(query, all.len());
        let start = query.offset().min(all.len());
        let end = (start + query.page_size as usize).min(all.len());
        json!({
            "rows": all[start..end],
            "count": all.len(),
            "currentPage": state.current_page,
            "pageSize": state.page_size,
            "totalPages": state.total_pages,
            "hasNextPage": state.has_next_page,
            "hasPreviousPage": state.has_previous_page,
        })
    }

    #[test]
    fn test_adopted_partial_metadata() {
        let payload = json!({ "count": 12, "rows": students(10), "currentPage": 1, "pageSize": 10 });

        let page = select_pager(&payload).page(PageQuery::new(1, 10));

        assert_eq!(page.items.len(), 10);
        assert_eq!(
            page.state,
            PaginationState {
                current_page: 1,
                page_size: 10,
                total_items: 12,
                total_pages: 2,
                has_next_page: true,
                has_previous_page: false,
            }
        );
    }

    #[test]
    fn test_computed_slice_of_last_page() {
        let page = select_pager(&json!(students(25))).page(PageQuery::new(3, 10));

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items.iter().map(|r| r.student_id).collect::<Vec<_>>(), vec![Some(21), Some(22), Some(23), Some(24), Some(25)]);
        assert_eq!(page.state.total_pages, 3);
        assert_eq!(page.state.total_items, 25);
        assert!(!page.state.has_next_page);
        assert!(page.state.has_previous_page);
    }

    #[test]
    fn test_computed_and_adopted_agree() {
        for count in [0usize, 1, 9, 10, 11, 25, 40] {
            let raw = students(count);
            let computed = ComputedPagination::new(records(count));

            for page_size in [1u32, 3, 10, 25] {
                for page in 1..=(total_pages(count, page_size) + 1) {
                    let query = PageQuery::new(page, page_size);
                    let adopted = AdoptedPagination::from_payload(&server_response(&raw, query)).unwrap();

                    assert_eq!(
                        computed.page(query),
                        adopted.page(query),
                        "count={} page={} size={}",
                        count,
                        page,
                        page_size
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_clamped() {
        let page = ComputedPagination::new(records(12)).page(PageQuery::new(5, 10));

        assert!(page.items.is_empty());
        assert_eq!(page.state.current_page, 5);
        assert_eq!(page.state.total_pages, 2);
        assert!(!page.state.has_next_page);
        assert!(page.state.has_previous_page);
        assert!(page.state.is_out_of_range());
    }

    #[test]
    fn test_empty_record_set_has_one_page() {
        let page = ComputedPagination::new(Vec::new()).page(PageQuery::new(1, 10));

        assert!(page.items.is_empty());
        assert_eq!(page.state.total_pages, 1);
        assert!(!page.state.has_next_page);
        assert!(!page.state.has_previous_page);
        assert!(!page.state.is_out_of_range());
    }

    #[test]
    fn test_query_is_raised_to_minimums() {
        let query = PageQuery::new(0, 0);
        assert_eq!(query, PageQuery { page: 1, page_size: 1 });
        assert_eq!(query.offset(), 0);
        assert_eq!(total_pages(0, 0), 1);
    }

    #[test]
    fn test_adopted_defaults_missing_fields_from_request() {
        let payload = json!({ "rows": students(4) });

        let page = select_pager(&payload).page(PageQuery::new(3, 10));

        assert_eq!(page.items.len(), 4);
        assert_eq!(page.state.current_page, 3);
        assert_eq!(page.state.page_size, 10);
        assert_eq!(page.state.total_items, 24);
        assert_eq!(page.state.total_pages, 3);
        assert!(!page.state.has_next_page);
        assert!(page.state.has_previous_page);
    }

    #[test]
    fn test_adopted_accepts_numeric_strings_and_explicit_flags() {
        let payload = json!({
            "rows": students(5),
            "count": "45",
            "currentPage": "2",
            "pageSize": "5",
            "totalPages": 9,
            "hasNextPage": false,
        });

        let meta = ServerPageMeta::from_value(&payload);
        assert_eq!(meta.count, Some(45));
        assert_eq!(meta.current_page, Some(2));

        let page = select_pager(&payload).page(PageQuery::new(1, 10));
        assert_eq!(page.state.current_page, 2);
        assert_eq!(page.state.page_size, 5);
        assert_eq!(page.state.total_pages, 9);
        assert!(!page.state.has_next_page);
        assert!(page.state.has_previous_page);
    }

    #[test]
    fn test_wrapped_payload_without_rows_is_computed() {
        let payload = json!({ "records": students(15) });

        let page = select_pager(&payload).page(PageQuery::new(2, 10));

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.state.total_items, 15);
        assert!(AdoptedPagination::from_payload(&payload).is_none());
    }
}
