#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rollbook::api::{ApiConfig, ApiError, AttendanceQuery, AttendanceSource, SchoolApi};

    fn unconfigured() -> SchoolApi {
        SchoolApi::new(&ApiConfig {
            api_url: "  ".to_string(),
            auth_token: String::new(),
        })
    }

    #[tokio::test]
    async fn test_unconfigured_api_fails_without_network() {
        let api = unconfigured();
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        assert_eq!(api.attendance_for_date(&AttendanceQuery::day(date, None)).await, Err(ApiError::NotConfigured));
        assert_eq!(api.roster(Some(1)).await, Err(ApiError::NotConfigured));
        assert_eq!(api.classes().await, Err(ApiError::NotConfigured));
    }

    #[test]
    fn test_query_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let query = AttendanceQuery::day(date, Some(4)).paged(2, 25);

        assert_eq!(query.class_id, Some(4));
        assert_eq!(query.page, Some(2));
        assert_eq!(query.page_size, Some(25));
    }

    #[test]
    fn test_decode_error_conversion() {
        let error: ApiError = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err().into();
        assert!(matches!(error, ApiError::Decode { .. }));
        assert!(error.to_string().starts_with("Could not decode response"));
    }
}
