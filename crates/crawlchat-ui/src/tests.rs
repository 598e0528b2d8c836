#[cfg(test)]
mod tests {
    use crate::panels::chat::{chat_panel, input_hint, short_time};
    use crate::panels::crawl::{crawl_panel, page_breakdown, phase_color, stats_summary, CrawlAction};
    use crate::panels::notices::notice_color;
    use crate::panels::results::{format_label, score_label};
    use crate::panels::settings::{session_line, SaveFeedback};
    use crate::state::*;
    use crate::theme;
    use crawlchat_core::session::{Notice, NoticeLevel, SessionStore};
    use crawlchat_types::config::ClientConfig;
    use crawlchat_types::event::CrawlStats;
    use crawlchat_types::session::{CrawlPhase, SessionSummary};

    fn notice(text: &str) -> Notice {
        Notice {
            level: NoticeLevel::Warning,
            text: text.to_string(),
        }
    }

    /// Run one headless frame with a central panel.
    fn run_frame(mut add_contents: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| add_contents(ui));
        });
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial_from_config() {
        let config = ClientConfig {
            default_page_limit: 12,
            ..ClientConfig::default()
        };
        let state = UiState::new(&config);
        assert!(state.url_input.is_empty());
        assert!(state.query_input.is_empty());
        assert_eq!(state.page_limit, 12);
        assert_eq!(state.settings_draft, config);
        assert!(!state.show_settings);
        assert!(state.save_feedback.is_none());
        assert!(!state.has_notices());
    }

    #[test]
    fn test_ui_state_sync_config() {
        let mut state = UiState::default();
        state.page_limit = 3;
        let config = ClientConfig {
            backend_origin: "https://api.example.com".to_string(),
            default_page_limit: 9,
            connect_timeout_secs: 30,
        };
        state.sync_config(&config);
        assert_eq!(state.page_limit, 9);
        assert_eq!(state.settings_draft.backend_origin, "https://api.example.com");
    }

    #[test]
    fn test_ui_state_notices_are_capped() {
        let mut state = UiState::default();
        let batch: Vec<Notice> = (0..MAX_VISIBLE_NOTICES + 2)
            .map(|i| notice(&format!("n{}", i)))
            .collect();
        state.push_notices(batch);

        let texts: Vec<&str> = state.notices().map(|n| n.text.as_str()).collect();
        assert_eq!(texts.len(), MAX_VISIBLE_NOTICES);
        assert_eq!(texts[0], "n2");
        assert_eq!(*texts.last().unwrap(), format!("n{}", MAX_VISIBLE_NOTICES + 1));
    }

    #[test]
    fn test_ui_state_dismiss_notices() {
        let mut state = UiState::default();
        state.push_notices(vec![notice("a")]);
        assert!(state.has_notices());
        state.dismiss_notices();
        assert!(!state.has_notices());
    }

    #[test]
    fn test_ui_state_broken_images_are_per_result() {
        let mut state = UiState::default();
        let first = UiState::result_key("msg-1", 0);
        let second = UiState::result_key("msg-1", 1);
        assert_ne!(first, second);

        state.mark_broken(first.clone());
        state.mark_broken(first.clone());
        assert!(state.is_broken(&first));
        assert!(!state.is_broken(&second));
        assert!(!state.is_broken(&UiState::result_key("msg-2", 0)));
    }

    #[test]
    fn test_ui_state_session_reset_clears_leftovers() {
        let mut state = UiState::default();
        state.url_input = "https://example.com".to_string();
        state.query_input = "cats".to_string();
        state.mark_broken(UiState::result_key("m", 0));
        state.push_notices(vec![notice("kept")]);

        state.on_session_reset();

        assert!(state.query_input.is_empty());
        assert!(!state.is_broken(&UiState::result_key("m", 0)));
        assert_eq!(state.url_input, "https://example.com");
        assert!(state.has_notices());
    }

    // ─── Result card helpers ─────────────────────────────────

    #[test]
    fn test_score_label_four_decimals() {
        assert_eq!(score_label(0.5), "0.5000");
        assert_eq!(score_label(0.87654321), "0.8765");
        assert_eq!(score_label(1.0), "1.0000");
        assert_eq!(score_label(-0.25), "-0.2500");
    }

    #[test]
    fn test_format_label_uppercase() {
        assert_eq!(format_label("jpeg"), "JPEG");
        assert_eq!(format_label(" png "), "PNG");
        assert_eq!(format_label(""), "?");
    }

    // ─── Panel helpers ───────────────────────────────────────

    #[test]
    fn test_input_hint_by_phase() {
        assert_eq!(input_hint(CrawlPhase::Ready, false), "Ask about the crawled images...");
        assert_eq!(input_hint(CrawlPhase::Ready, true), "Waiting for the answer...");
        assert_ne!(input_hint(CrawlPhase::Idle, false), input_hint(CrawlPhase::Crawling, false));
        assert!(input_hint(CrawlPhase::Error, false).contains("new one"));
    }

    #[test]
    fn test_short_time() {
        assert_eq!(short_time("2024-05-01T13:45:12.123+00:00"), "13:45:12");
        assert_eq!(short_time("not a timestamp"), "not a timestamp");
        assert_eq!(short_time("2024-05-01T13:4"), "2024-05-01T13:4");
    }

    #[test]
    fn test_stats_summary() {
        assert_eq!(stats_summary(&CrawlStats::default()), None);
        let stats = CrawlStats {
            total_images: Some(12),
            total_pages: Some(3),
            ..CrawlStats::default()
        };
        assert_eq!(stats_summary(&stats).as_deref(), Some("12 images across 3 pages"));
        let images_only = CrawlStats {
            total_images: Some(4),
            ..CrawlStats::default()
        };
        assert_eq!(stats_summary(&images_only).as_deref(), Some("4 images"));
    }

    #[test]
    fn test_page_breakdown() {
        assert_eq!(page_breakdown(&CrawlStats::default()), None);
        let mut stats = CrawlStats::default();
        stats.images_by_page.insert("https://e.com/b".to_string(), 2);
        stats.images_by_page.insert("https://e.com/a".to_string(), 5);
        assert_eq!(
            page_breakdown(&stats).as_deref(),
            Some("https://e.com/a: 5\nhttps://e.com/b: 2")
        );
    }

    #[test]
    fn test_phase_and_notice_colors() {
        assert_eq!(phase_color(CrawlPhase::Ready), theme::SUCCESS);
        assert_eq!(phase_color(CrawlPhase::Error), theme::ERROR);
        assert_eq!(notice_color(NoticeLevel::Warning), theme::WARNING);
        assert_eq!(notice_color(NoticeLevel::Error), theme::ERROR);
    }

    #[test]
    fn test_session_line() {
        let mut session = SessionSummary {
            session_id: "s1".to_string(),
            url: "https://example.com".to_string(),
            status: "crawling".to_string(),
            total_images: 7,
            total_pages: 2,
            completed: false,
            created_at: None,
        };
        assert_eq!(session_line(&session), "https://example.com · 7 images / 2 pages · crawling");
        session.completed = true;
        assert!(session_line(&session).ends_with("done"));
    }

    #[test]
    fn test_save_feedback_clone() {
        let fb = SaveFeedback {
            message: "Saved".to_string(),
            success: true,
        };
        assert_eq!(fb.clone(), fb);
    }

    // ─── Headless rendering ──────────────────────────────────

    #[test]
    fn test_crawl_panel_idle_frame_has_no_action() {
        let store = SessionStore::new();
        let mut state = UiState::default();
        let mut action = None;
        run_frame(|ui| action = Some(crawl_panel(ui, &store, &mut state)));
        assert_eq!(action, Some(CrawlAction::None));
    }

    #[test]
    fn test_chat_panel_disabled_before_ready() {
        let store = SessionStore::new();
        let mut state = UiState::default();
        state.query_input = "show cats".to_string();
        let mut submitted = Some(String::new());
        run_frame(|ui| submitted = chat_panel(ui, &store, &mut state));
        assert_eq!(submitted, None);
        assert_eq!(state.query_input, "show cats");
    }
}
