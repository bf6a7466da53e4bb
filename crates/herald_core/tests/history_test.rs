use chrono::Utc;
use herald_core::{HistoryEntry, Platform, PlatformResult, PostHistory, PostedTweet};

#[test]
fn test_last_updated_strictly_advances() {
    let mut history = PostHistory::default();
    let mut previous = *history.last_updated();
    for i in 0..50 {
        history.append(HistoryEntry::at(i, "idea", Utc::now(), vec![]), i + 1);
        assert!(*history.last_updated() > previous);
        previous = *history.last_updated();
    }
    assert_eq!(history.posts().len(), 50);
}

#[test]
fn test_history_json_shape() {
    let mut history = PostHistory::default();
    let result = PlatformResult::success(Platform::Twitter)
        .with_results(vec![PostedTweet {
            id: "1".to_string(),
            text: "hello".to_string(),
        }])
        .with_count(1usize);
    history.append(HistoryEntry::at(9, "Idea nine", Utc::now(), vec![result]), 4);

    let value = serde_json::to_value(&history).unwrap();
    assert_eq!(value["rotationCursor"], 4);
    assert_eq!(value["posts"][0]["ideaId"], 9);
    assert_eq!(value["posts"][0]["results"][0]["platform"], "twitter");
    assert_eq!(value["posts"][0]["results"][0]["count"], 1);
    assert!(value["posts"][0]["results"][0].get("dryRun").is_none());
    assert!(value["posts"][0]["results"][0].get("error").is_none());

    let restored: PostHistory = serde_json::from_value(value).unwrap();
    assert_eq!(restored, history);
}

#[test]
fn test_history_without_cursor_defaults_to_zero() {
    let json = r#"{"posts": [], "lastUpdated": "2024-01-01T00:00:00Z"}"#;
    let history: PostHistory = serde_json::from_str(json).unwrap();
    assert_eq!(*history.rotation_cursor(), 0);
}

#[test]
fn test_recent_is_newest_first() {
    let mut history = PostHistory::default();
    for i in 0..7 {
        history.append(HistoryEntry::at(i, format!("idea {}", i), Utc::now(), vec![]), 0);
    }
    let ids: Vec<u64> = history.recent(3).map(|e| *e.idea_id()).collect();
    assert_eq!(ids, vec![6, 5, 4]);
}

#[test]
fn test_failure_result_serializes_error() {
    let value = serde_json::to_value(PlatformResult::failure(Platform::Blogger, "nope")).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "nope");
}
