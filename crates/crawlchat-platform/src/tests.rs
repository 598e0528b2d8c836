#[cfg(test)]
mod tests {
    use crate::http::{error_detail, HttpApiClient};
    use crate::storage::MemoryStorage;
    use crawlchat_core::ports::StoragePort;
    use crawlchat_core::tasks;
    use crawlchat_types::config::ClientConfig;
    use futures::executor::block_on;

    // ─── HTTP helper Tests ───────────────────────────────────

    #[test]
    fn test_error_detail_fastapi_style() {
        assert_eq!(error_detail(r#"{"detail":"Session not found"}"#), "Session not found");
    }

    #[test]
    fn test_error_detail_error_key() {
        assert_eq!(error_detail(r#"{"error":"rate limited"}"#), "rate limited");
    }

    #[test]
    fn test_error_detail_structured_detail() {
        let detail = error_detail(r#"{"detail":[{"loc":["body","limit"],"msg":"too large"}]}"#);
        assert!(detail.contains("too large"));
    }

    #[test]
    fn test_error_detail_plain_text() {
        assert_eq!(error_detail("  Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_detail(""), "");
    }

    #[test]
    fn test_error_detail_unrelated_json() {
        assert_eq!(error_detail(r#"{"code":7}"#), r#"{"code":7}"#);
    }

    #[test]
    fn test_http_client_endpoints() {
        let client = HttpApiClient::new("http://localhost:8000/");
        assert_eq!(client.endpoints().crawl(), "http://localhost:8000/crawl");
        assert_eq!(
            client.endpoints().status("abc"),
            "http://localhost:8000/crawl/abc/status"
        );
    }

    // ─── MemoryStorage Tests ─────────────────────────────────

    #[test]
    fn test_memory_storage_set_get_delete() {
        let storage = MemoryStorage::new();
        block_on(async {
            assert!(storage.get("k").await.unwrap().is_none());
            storage.set("k", b"v1").await.unwrap();
            storage.set("k", b"v2").await.unwrap();
            assert_eq!(storage.get("k").await.unwrap(), Some(b"v2".to_vec()));
            assert!(storage.exists("k").await.unwrap());
            storage.delete("k").await.unwrap();
            assert!(!storage.exists("k").await.unwrap());
        });
        assert!(storage.is_empty());
        assert_eq!(storage.backend_name(), "memory");
    }

    #[test]
    fn test_memory_storage_holds_config() {
        let storage = MemoryStorage::new();
        let config = ClientConfig {
            backend_origin: "https://crawl.example.com".to_string(),
            ..ClientConfig::default()
        };
        block_on(async {
            tasks::save_config(&storage, &config).await.unwrap();
            let loaded = tasks::load_config(&storage).await.unwrap();
            assert_eq!(loaded, Some(config));
        });
        assert_eq!(storage.len(), 1);
    }
}
