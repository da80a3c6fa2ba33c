//! Browser module tests
//!
//! These verify browser configuration, the event union and the capture
//! record format. Full browser integration requires a running
//! Chrome/Chromium instance and is not exercised here.

use page_detect::browser::{BrowserConfig, BrowserEvent, CaptureResult, ChromeBrowser};
use page_detect::config::{DetectConfig, DEFAULT_DEADLINE, DEFAULT_OUTPUT_PATH, MAX_BODY_BYTES};
use std::time::Duration;

#[test]
fn test_browser_config_default() {
    let config = BrowserConfig::default();
    assert!(config.headless);
    assert_eq!(config.width, 1920);
    assert_eq!(config.height, 1080);
    assert!(config.sandbox);
    assert!(config.user_agent.is_none());
    assert!(config.chrome_path.is_none());
    assert!(config.extra_args.is_empty());
}

#[test]
fn test_browser_config_builder() {
    let config = BrowserConfig::builder()
        .headless(false)
        .viewport(1280, 720)
        .sandbox(false)
        .user_agent("TestBot/1.0")
        .arg("--disable-gpu")
        .arg("--no-first-run")
        .build();

    assert!(!config.headless);
    assert_eq!(config.width, 1280);
    assert_eq!(config.height, 720);
    assert!(!config.sandbox);
    assert_eq!(config.user_agent, Some("TestBot/1.0".to_string()));
    assert_eq!(config.extra_args.len(), 2);

    let browser = ChromeBrowser::new(config);
    assert_eq!(browser.config().width, 1280);
}

#[test]
fn test_named_defaults() {
    assert_eq!(DEFAULT_DEADLINE, Duration::from_secs(10));
    assert_eq!(DEFAULT_OUTPUT_PATH, "./detect_result.json");
    assert_eq!(MAX_BODY_BYTES, 51200);

    let config = DetectConfig::default();
    assert_eq!(config.deadline, DEFAULT_DEADLINE);
}

#[test]
fn test_event_variants() {
    let req = BrowserEvent::RequestWillBeSent {
        url: "https://a.com/".to_string(),
    };
    assert_ne!(req, BrowserEvent::Other);
    assert_eq!(req.request_url(), Some("https://a.com/"));
    assert_eq!(
        BrowserEvent::LoadingFailed {
            error_text: "net::ERR_ABORTED".to_string()
        }
        .request_url(),
        None
    );
}

#[test]
fn test_capture_result_is_one_json_line() {
    let result = CaptureResult {
        url: "https://example.com".to_string(),
        response_body: "<html>\n<body>multi\nline</body>\n</html>".to_string(),
        network: vec![
            "https://example.com/".to_string(),
            "https://example.com/favicon.ico".to_string(),
        ],
        timestamp: "2024-05-01 12:00:00".to_string(),
    };

    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains('\n'));
    assert!(json.starts_with("{\"url\":\"https://example.com\""));

    let parsed: CaptureResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
}
