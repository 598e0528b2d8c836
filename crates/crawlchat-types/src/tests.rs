#[cfg(test)]
mod tests {
    use crate::api::*;
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;
    use crate::session::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_human() {
        let msg = Message::human("show cats");
        assert_eq!(msg.role, Role::Human);
        assert_eq!(msg.content, "show cats");
        assert!(msg.results.is_empty());
        assert!(!msg.id.is_empty());
        assert!(!msg.timestamp.is_empty());
    }

    #[test]
    fn test_message_ai_with_results() {
        let msg = Message::ai_with_results(
            "Here",
            vec![SearchResult {
                url: "u".to_string(),
                format: "jpg".to_string(),
                alt_text: "cat".to_string(),
                source_url: "s".to_string(),
                score: 0.5,
            }],
        );
        assert_eq!(msg.role, Role::Ai);
        assert_eq!(msg.results.len(), 1);
        assert_eq!(msg.results[0].score, 0.5);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::ai("x");
        let b = Message::ai("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_to_turn() {
        let turn = Message::human("hello").to_turn();
        assert_eq!(turn.role, Role::Human);
        assert_eq!(turn.content, "hello");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Human).unwrap(), r#""human""#);
        assert_eq!(serde_json::to_string(&Role::Ai).unwrap(), r#""ai""#);
        let role: Role = serde_json::from_str(r#""ai""#).unwrap();
        assert_eq!(role, Role::Ai);
    }

    #[test]
    fn test_search_result_tolerates_missing_fields() {
        let result: SearchResult = serde_json::from_str(r#"{"url":"https://x/a.png"}"#).unwrap();
        assert_eq!(result.url, "https://x/a.png");
        assert!(result.format.is_empty());
        assert_eq!(result.score, 0.0);
    }

    // ─── API Body Tests ──────────────────────────────────────

    #[test]
    fn test_crawl_request_body() {
        let req = CrawlRequest {
            url: "https://example.com".to_string(),
            limit: 5,
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["limit"], 5);
    }

    #[test]
    fn test_crawl_response_minimal() {
        let resp: CrawlResponse = serde_json::from_str(r#"{"session_id":"abc"}"#).unwrap();
        assert_eq!(resp.session_id, "abc");
        assert!(resp.subscribe_url.is_none());
    }

    #[test]
    fn test_chat_request_body_shape() {
        let req = ChatRequest {
            session_id: "abc".to_string(),
            chat_history: vec![Message::ai("x").to_turn(), Message::human("show cats").to_turn()],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["session_id"], "abc");
        assert_eq!(json["chat_history"][0]["role"], "ai");
        assert_eq!(json["chat_history"][1]["role"], "human");
        assert_eq!(json["chat_history"][1]["content"], "show cats");
    }

    #[test]
    fn test_chat_response_with_results() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"response":"Here","search_results":[{"url":"u","format":"jpg","alt_text":"cat","source_url":"s","score":0.5}],"session_id":"abc"}"#,
        )
        .unwrap();
        assert_eq!(resp.response, "Here");
        assert_eq!(resp.search_results.len(), 1);
        assert_eq!(resp.search_results[0].alt_text, "cat");
    }

    #[test]
    fn test_chat_response_without_results() {
        let resp: ChatResponse = serde_json::from_str(r#"{"response":"Nothing"}"#).unwrap();
        assert!(resp.search_results.is_empty());
    }

    #[test]
    fn test_session_list() {
        let list: SessionList = serde_json::from_str(
            r#"{"sessions":[{"session_id":"a","url":"https://e.com","status":"completed","total_images":3,"total_pages":2,"completed":true,"created_at":"2026-01-01T00:00:00Z"}]}"#,
        )
        .unwrap();
        assert_eq!(list.sessions.len(), 1);
        assert!(list.sessions[0].completed);
        assert_eq!(list.sessions[0].total_images, 3);
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus = serde_json::from_str(r#"{"status":"ok","version":"1.2.0"}"#).unwrap();
        assert_eq!(health.version, "1.2.0");
    }

    // ─── StatusEvent Tests ───────────────────────────────────

    #[test]
    fn test_status_event_completed() {
        let event = StatusEvent::parse(
            r#"{"type":"completed","data":{"summary":"Found 3 images","total_images":3,"total_pages":2}}"#,
        )
        .unwrap();
        assert!(event.is_terminal());
        match event {
            StatusEvent::Completed { summary, stats } => {
                assert_eq!(summary.as_deref(), Some("Found 3 images"));
                assert_eq!(stats.total_images, Some(3));
                assert_eq!(stats.total_pages, Some(2));
            }
            other => panic!("Wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_status_event_completed_without_summary() {
        let event = StatusEvent::parse(r#"{"type":"completed"}"#).unwrap();
        assert_eq!(
            event,
            StatusEvent::Completed {
                summary: None,
                stats: CrawlStats::default(),
            }
        );
    }

    #[test]
    fn test_status_event_progress_histograms() {
        let event = StatusEvent::parse(
            r#"{"type":"progress","data":{"message":"Crawling page 2","total_images":7,"images_by_format":{"jpg":5,"png":2},"images_by_page":{"https://e.com/":7}}}"#,
        )
        .unwrap();
        assert!(!event.is_terminal());
        assert_eq!(event.message(), Some("Crawling page 2"));
        if let StatusEvent::Progress { stats, .. } = event {
            assert_eq!(stats.images_by_format.get("jpg"), Some(&5));
            assert_eq!(stats.images_by_page.len(), 1);
            assert!(!stats.is_empty());
        } else {
            panic!("Wrong variant");
        }
    }

    #[test]
    fn test_status_event_top_level_message() {
        let event = StatusEvent::parse(r#"{"type":"connected","message":"hello"}"#).unwrap();
        assert_eq!(event, StatusEvent::Connected { message: Some("hello".to_string()) });
    }

    #[test]
    fn test_status_event_null_data() {
        let event = StatusEvent::parse(r#"{"type":"status","data":null}"#).unwrap();
        assert_eq!(event, StatusEvent::Status { message: None });
    }

    #[test]
    fn test_status_event_error_prefers_error_field() {
        let event =
            StatusEvent::parse(r#"{"type":"error","data":{"error":"robots.txt denied","message":"failed"}}"#)
                .unwrap();
        assert!(event.is_terminal());
        assert_eq!(event.message(), Some("robots.txt denied"));
    }

    #[test]
    fn test_status_event_unknown_type_is_channel_error() {
        let err = StatusEvent::parse(r#"{"type":"paused"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Channel(_)));
    }

    #[test]
    fn test_status_event_garbage_is_channel_error() {
        let err = StatusEvent::parse("not json").unwrap_err();
        assert!(err.is_channel_fault());
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_validate_origin() {
        let with_origin = |origin: &str| ClientConfig {
            backend_origin: origin.to_string(),
            ..ClientConfig::default()
        };
        assert!(ClientConfig::default().validate().is_ok());
        assert!(with_origin("https://api.example.com/").validate().is_ok());
        for bad in ["localhost:8000", "ftp://files.example.com", "http://", "https:///"] {
            assert!(
                matches!(with_origin(bad).validate(), Err(ClientError::Config(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.backend_origin, "http://localhost:8000");
        assert_eq!(config.default_page_limit, 5);
        assert_eq!(config.connect_timeout_secs, 60);
        assert_eq!(config.connect_timeout(), std::time::Duration::from_secs(60));
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"backend_origin":"https://api.example.com"}"#).unwrap();
        assert_eq!(config.backend_origin, "https://api.example.com");
        assert_eq!(config.default_page_limit, 5);
    }

    #[test]
    fn test_config_normalized_clamps() {
        let config = ClientConfig {
            backend_origin: "  ".to_string(),
            default_page_limit: 99,
            connect_timeout_secs: 0,
        }
        .normalized();
        assert_eq!(config.default_page_limit, MAX_PAGE_LIMIT);
        assert_eq!(config.connect_timeout_secs, 1);
        assert_eq!(config.backend_origin, "http://localhost:8000");
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_phase_default_is_idle() {
        assert_eq!(CrawlPhase::default(), CrawlPhase::Idle);
        assert_eq!(CrawlPhase::Crawling.label(), "Crawling");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClientError::http(500, "boom").to_string(),
            "HTTP 500: boom"
        );
        assert_eq!(ClientError::http(404, "").to_string(), "HTTP 404");
        assert_eq!(
            ClientError::network("offline").to_string(),
            "Network error: offline"
        );
        assert_eq!(
            ClientError::Timeout(60).to_string(),
            "No status from server after 60s"
        );
        assert_eq!(
            ClientError::Validation("empty".to_string()).to_string(),
            "Invalid input: empty"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ClientError = serde_err.into();
        assert!(matches!(err, ClientError::Serialization(_)));
    }

    #[test]
    fn test_channel_fault_classification() {
        assert!(ClientError::Channel("x".to_string()).is_channel_fault());
        assert!(ClientError::Timeout(1).is_channel_fault());
        assert!(!ClientError::network("x").is_channel_fault());
    }
}
