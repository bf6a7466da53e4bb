use async_trait::async_trait;
use herald_core::{GeneratedContent, Platform, Tweet};
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use herald_interface::Publisher;
use herald_rate_limit::RetryPolicyBuilder;
use herald_social::{
    BloggerApi, BloggerBlog, BloggerPost, BloggerPublisher, DEFAULT_LIST_LIMIT, PublisherSettings,
    PublisherSettingsBuilder, RedditAccount, RedditApi, RedditPublisher, RedditSubmission,
    SubredditInfo, TwitterApi, TwitterPacing, TwitterPublisher,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Default)]
struct RecordingTwitter {
    posted: Mutex<Vec<(String, Option<String>)>>,
    transient_failures: AtomicUsize,
}

#[async_trait]
impl TwitterApi for RecordingTwitter {
    async fn post_tweet(&self, text: &str, reply_to: Option<&str>) -> PublishResult<String> {
        if self.transient_failures.load(Ordering::SeqCst) > 0 {
            self.transient_failures.fetch_sub(1, Ordering::SeqCst);
            return Err(PublishError::new(PublishErrorKind::Transport(
                "connection reset".to_string(),
            )));
        }
        let mut posted = self.posted.lock().unwrap();
        posted.push((text.to_string(), reply_to.map(str::to_string)));
        Ok(format!("tweet-{}", posted.len()))
    }

    async fn me(&self) -> PublishResult<String> {
        Ok("herald_bot".to_string())
    }
}

#[derive(Default)]
struct RecordingReddit {
    calls: AtomicUsize,
}

#[async_trait]
impl RedditApi for RecordingReddit {
    async fn submit_self_post(
        &self,
        subreddit: &str,
        _title: &str,
        _body: &str,
    ) -> PublishResult<RedditSubmission> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RedditSubmission::new(
            "abc123",
            format!("https://www.reddit.com/r/{}/comments/abc123/", subreddit),
        ))
    }

    async fn me(&self) -> PublishResult<RedditAccount> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RedditAccount::new("herald_bot", 10, 5))
    }

    async fn subreddit_info(&self, subreddit: &str) -> PublishResult<SubredditInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SubredditInfo::new(subreddit, 1200, "Test community"))
    }
}

#[derive(Default)]
struct RecordingBlogger {
    inserted: Mutex<Vec<(String, String, Vec<String>)>>,
}

#[async_trait]
impl BloggerApi for RecordingBlogger {
    async fn insert_post(
        &self,
        title: &str,
        html: &str,
        labels: &[String],
    ) -> PublishResult<BloggerPost> {
        self.inserted
            .lock()
            .unwrap()
            .push((title.to_string(), html.to_string(), labels.to_vec()));
        Ok(BloggerPost::new("42", "https://blog.example.com/42", title))
    }

    async fn blog(&self) -> PublishResult<BloggerBlog> {
        Ok(BloggerBlog::new("Herald Notes", "https://blog.example.com"))
    }

    async fn list_posts(&self, max_results: usize) -> PublishResult<Vec<BloggerPost>> {
        let inserted = self.inserted.lock().unwrap();
        Ok(inserted
            .iter()
            .rev()
            .take(max_results)
            .enumerate()
            .map(|(i, (title, _, _))| {
                BloggerPost::new(i.to_string(), format!("https://blog.example.com/{}", i), title)
            })
            .collect())
    }
}

fn live() -> PublisherSettings {
    PublisherSettingsBuilder::default()
        .retry(
            RetryPolicyBuilder::default()
                .max_retries(2usize)
                .initial_backoff_ms(1u64)
                .max_delay(Duration::from_millis(2))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn dry_run() -> PublisherSettings {
    PublisherSettingsBuilder::default().dry_run(true).build().unwrap()
}

fn thread(texts: &[&str]) -> GeneratedContent {
    GeneratedContent::Thread {
        tweets: texts.iter().map(|t| Tweet::new(*t)).collect(),
    }
}

// ============================================================================
// Twitter
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_live_thread_waits_between_tweets_only() {
    let api = Arc::new(RecordingTwitter::default());
    let pacing = TwitterPacing::default();
    let publisher = TwitterPublisher::new(Some(api.clone()), live());

    let started = tokio::time::Instant::now();
    let result = publisher.publish(&thread(&["one", "two", "three"])).await.unwrap();
    let elapsed = started.elapsed();

    assert!(result.is_success());
    assert_eq!(api.posted.lock().unwrap().len(), 3);
    assert!(elapsed >= pacing.tweet_gap * 2, "elapsed {:?}", elapsed);
    assert!(elapsed < pacing.tweet_gap * 3, "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_live_single_tweet_does_not_wait() {
    let api = Arc::new(RecordingTwitter::default());
    let publisher = TwitterPublisher::new(Some(api.clone()), live());

    let started = tokio::time::Instant::now();
    publisher.publish(&thread(&["only"])).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(1), "elapsed {:?}", started.elapsed());
}

#[tokio::test(start_paused = true)]
async fn test_dry_run_thread_waits_after_every_tweet() {
    let api = Arc::new(RecordingTwitter::default());
    let pacing = TwitterPacing::default();
    let publisher = TwitterPublisher::new(Some(api.clone()), dry_run());

    let started = tokio::time::Instant::now();
    let result = publisher.publish(&thread(&["one", "two", "three"])).await.unwrap();
    let elapsed = started.elapsed();

    assert!(*result.dry_run());
    assert!(api.posted.lock().unwrap().is_empty());
    assert!(elapsed >= pacing.dry_run_gap * 3, "elapsed {:?}", elapsed);
    assert!(elapsed < pacing.dry_run_gap * 3 + Duration::from_secs(1), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_thread_replies_chain_in_order() {
    let api = Arc::new(RecordingTwitter::default());
    let publisher =
        TwitterPublisher::new(Some(api.clone()), live()).with_pacing(TwitterPacing::none());

    let result = publisher.publish(&thread(&["one", "two", "three"])).await.unwrap();

    assert!(result.is_success());
    assert_eq!(*result.count(), Some(3));
    let posted = api.posted.lock().unwrap().clone();
    assert_eq!(posted[0], ("one".to_string(), None));
    assert_eq!(posted[1], ("two".to_string(), Some("tweet-1".to_string())));
    assert_eq!(posted[2], ("three".to_string(), Some("tweet-2".to_string())));
    let ids: Vec<String> = result.results().clone().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["tweet-1", "tweet-2", "tweet-3"]);
}

#[tokio::test]
async fn test_long_tweet_is_truncated_before_posting() {
    let api = Arc::new(RecordingTwitter::default());
    let publisher =
        TwitterPublisher::new(Some(api.clone()), live()).with_pacing(TwitterPacing::none());

    let long = "x".repeat(300);
    publisher.publish(&GeneratedContent::text(long)).await.unwrap();

    let posted = api.posted.lock().unwrap().clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].0.chars().count(), 250);
    assert!(posted[0].0.ends_with("..."));
}

#[tokio::test]
async fn test_transient_tweet_failure_retries_single_request() {
    let api = Arc::new(RecordingTwitter::default());
    api.transient_failures.store(1, Ordering::SeqCst);
    let publisher =
        TwitterPublisher::new(Some(api.clone()), live()).with_pacing(TwitterPacing::none());

    publisher.publish(&thread(&["a", "b"])).await.unwrap();

    let posted = api.posted.lock().unwrap().clone();
    assert_eq!(posted.len(), 2, "no tweet may be posted twice");
}

#[tokio::test]
async fn test_twitter_dry_run_makes_no_calls() {
    let api = Arc::new(RecordingTwitter::default());
    let publisher =
        TwitterPublisher::new(Some(api.clone()), dry_run()).with_pacing(TwitterPacing::none());

    let result = publisher.publish(&thread(&["a", "b"])).await.unwrap();

    assert!(api.posted.lock().unwrap().is_empty());
    assert!(*result.dry_run());
    let results = result.results().clone().unwrap();
    assert!(results.iter().all(|t| t.id.starts_with("dry-run-")));
}

#[tokio::test]
async fn test_twitter_rejects_post_content() {
    let api = Arc::new(RecordingTwitter::default());
    let publisher = TwitterPublisher::new(Some(api), live()).with_pacing(TwitterPacing::none());
    let err = publisher
        .publish(&GeneratedContent::Post {
            title: "t".to_string(),
            body: "b".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err.kind, PublishErrorKind::Validation(_)));
}

#[tokio::test]
async fn test_missing_client_is_not_enabled() {
    let publisher = TwitterPublisher::new(None, live());
    assert!(!publisher.is_enabled());
    let err = publisher.publish(&thread(&["a"])).await.unwrap_err();
    assert_eq!(err.message(), "Twitter client not initialized");
}

#[tokio::test]
async fn test_disabled_flag_wins_over_credentials() {
    let settings = PublisherSettingsBuilder::default().enabled(false).build().unwrap();
    let publisher = TwitterPublisher::new(Some(Arc::new(RecordingTwitter::default())), settings);
    assert!(!publisher.is_enabled());
}

// ============================================================================
// Reddit
// ============================================================================

#[tokio::test]
async fn test_reddit_validation_precedes_network() {
    let api = Arc::new(RecordingReddit::default());
    let publisher = RedditPublisher::new(Some(api.clone()), dry_run(), vec!["test".to_string()]);

    let err = publisher
        .publish(&GeneratedContent::Post {
            title: "Title".to_string(),
            body: "   ".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Reddit post requires both title and body");
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reddit_dry_run_result() {
    let api = Arc::new(RecordingReddit::default());
    let publisher = RedditPublisher::new(Some(api.clone()), dry_run(), vec!["rust".to_string()]);

    let result = publisher
        .publish(&GeneratedContent::Post {
            title: "Title".to_string(),
            body: "Body".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.url().as_deref(), Some("https://reddit.com/r/rust/"));
    assert_eq!(result.subreddit().as_deref(), Some("rust"));
    assert!(*result.dry_run());
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reddit_explicit_subreddit_and_random_choice() {
    let api = Arc::new(RecordingReddit::default());
    let subs = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let publisher = RedditPublisher::new(Some(api.clone()), live(), subs.clone());
    let post = GeneratedContent::Post {
        title: "Title".to_string(),
        body: "Body".to_string(),
    };

    let explicit = publisher.publish_to(&post, Some("explicit")).await.unwrap();
    assert_eq!(explicit.subreddit().as_deref(), Some("explicit"));
    assert_eq!(explicit.post_id().as_deref(), Some("abc123"));

    for _ in 0..10 {
        let result = publisher.publish(&post).await.unwrap();
        assert!(subs.contains(result.subreddit().as_ref().unwrap()));
    }
}

#[tokio::test]
async fn test_reddit_verify_reports_karma() {
    let publisher = RedditPublisher::new(
        Some(Arc::new(RecordingReddit::default())),
        live(),
        vec!["test".to_string()],
    );
    let status = publisher.verify_credentials().await.unwrap();
    assert_eq!(status.account(), "u/herald_bot");
    assert_eq!(status.details().as_deref(), Some("karma: 15"));
    assert_eq!(*status.platform(), Platform::Reddit);
}

// ============================================================================
// Blogger
// ============================================================================

#[tokio::test]
async fn test_blogger_converts_markdown_before_insert() {
    let api = Arc::new(RecordingBlogger::default());
    let publisher = BloggerPublisher::new(Some(api.clone()), live());

    let result = publisher
        .publish(&GeneratedContent::Article {
            title: "Title".to_string(),
            content: "# Title\n\nBody text".to_string(),
            labels: vec!["rust".to_string()],
        })
        .await
        .unwrap();

    let inserted = api.inserted.lock().unwrap().clone();
    assert_eq!(inserted[0].1, "<h1>Title</h1>\n<p>Body text</p>");
    assert_eq!(inserted[0].2, vec!["rust".to_string()]);
    assert_eq!(result.post_id().as_deref(), Some("42"));
    assert_eq!(result.url().as_deref(), Some("https://blog.example.com/42"));
}

#[tokio::test]
async fn test_blogger_dry_run_reports_title() {
    let api = Arc::new(RecordingBlogger::default());
    let publisher = BloggerPublisher::new(Some(api.clone()), dry_run());

    let result = publisher
        .publish(&GeneratedContent::Article {
            title: "Would-be title".to_string(),
            content: "Body".to_string(),
            labels: vec![],
        })
        .await
        .unwrap();

    assert_eq!(result.title().as_deref(), Some("Would-be title"));
    assert!(*result.dry_run());
    assert!(api.inserted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_blogger_requires_title_and_content() {
    let publisher = BloggerPublisher::new(Some(Arc::new(RecordingBlogger::default())), live());
    let err = publisher
        .publish(&GeneratedContent::text("prose only"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Blogger post requires both title and content");
}

// ============================================================================
// Read-side helpers
// ============================================================================

#[tokio::test]
async fn test_subreddit_info_strips_prefix() {
    let api = Arc::new(RecordingReddit::default());
    let publisher = RedditPublisher::new(Some(api.clone()), live(), vec!["test".to_string()]);

    let info = publisher.subreddit_info("r/rust").await.unwrap();

    assert_eq!(info.name(), "rust");
    assert_eq!(*info.subscribers(), 1200);
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_subreddit_info_requires_credentials() {
    let publisher = RedditPublisher::new(None, live(), vec!["test".to_string()]);

    let err = publisher.subreddit_info("rust").await.unwrap_err();
    assert!(matches!(err.kind, PublishErrorKind::NotConfigured(_)));
}

#[tokio::test]
async fn test_list_posts_newest_first_within_limit() {
    let api = Arc::new(RecordingBlogger::default());
    let publisher = BloggerPublisher::new(Some(api.clone()), live());
    for title in ["First", "Second", "Third"] {
        let article = GeneratedContent::Article {
            title: title.to_string(),
            content: "Body".to_string(),
            labels: vec![],
        };
        publisher.publish(&article).await.unwrap();
    }

    let posts = publisher.list_posts(2).await.unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title().as_str()).collect();
    assert_eq!(titles, vec!["Third", "Second"]);

    let all = publisher.list_posts(DEFAULT_LIST_LIMIT).await.unwrap();
    assert_eq!(all.len(), 3);
}
