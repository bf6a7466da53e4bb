use async_trait::async_trait;
use herald_core::{Branding, ContentIdeaBuilder, GeneratedContent, Platform};
use herald_error::{GenerationError, GenerationErrorKind, GenerationResult};
use herald_interface::TextCompletion;
use herald_narrative::{ContentGenerator, PromptContext, PromptContextBuilder, tweet_weight};
use herald_rate_limit::RetryPolicyBuilder;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Completion double that replays scripted answers and records prompts.
struct ScriptedCompletion {
    answers: Mutex<VecDeque<GenerationResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    fn new(answers: Vec<GenerationResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::new(GenerationErrorKind::EmptyResponse)))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

fn generator(completion: Arc<ScriptedCompletion>, max_retries: usize) -> ContentGenerator {
    let policy = RetryPolicyBuilder::default()
        .max_retries(max_retries)
        .initial_backoff_ms(1u64)
        .max_delay(Duration::from_millis(2))
        .build()
        .unwrap();
    ContentGenerator::new(completion, policy)
}

fn branding() -> Branding {
    Branding::new("Acme Tools", "https://acme-tools.example.com", "https://wa.me/15550001111")
}

#[tokio::test]
async fn test_plain_prose_becomes_text() {
    let completion = ScriptedCompletion::new(vec![Ok("Just some prose.".to_string())]);
    let content = generator(completion, 0)
        .generate(Platform::Reddit, "Idea", &PromptContextBuilder::default().build().unwrap())
        .await
        .unwrap();

    assert_eq!(content, GeneratedContent::text("Just some prose."));
}

#[tokio::test]
async fn test_branded_thread_final_tweet_within_budget() {
    let long_last = "Ship small, ship often. ".repeat(12);
    let answer = format!(
        "```json\n{{\"tweets\": [{{\"text\": \"First tweet\"}}, {{\"text\": \"{}\"}}]}}\n```",
        long_last.trim()
    );
    let completion = ScriptedCompletion::new(vec![Ok(answer)]);

    let idea = ContentIdeaBuilder::default()
        .id(1u64)
        .text("Continuous delivery")
        .platforms(vec![Platform::Twitter])
        .include_branding(true)
        .build()
        .unwrap();
    let branding = branding();
    let context = PromptContext::for_idea(&idea, Some(&branding));

    let content = generator(completion.clone(), 0)
        .generate(Platform::Twitter, idea.text(), &context)
        .await
        .unwrap();

    let tweets = content.tweet_texts().unwrap();
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0], "First tweet");
    let last = tweets.last().unwrap();
    assert!(tweet_weight(last) <= 250, "weight {}", tweet_weight(last));
    assert!(last.ends_with("📱 WhatsApp: https://wa.me/15550001111"));
    assert_eq!(last.matches("🌐").count(), 1);

    let prompt = &completion.prompts()[0];
    assert!(prompt.contains("CRITICAL TWITTER RULES"));
    assert!(prompt.contains("MAX 170 characters"));
}

#[tokio::test]
async fn test_existing_branding_is_not_duplicated() {
    let block = "🌐 Acme Tools: https://acme-tools.example.com\n📱 WhatsApp: https://wa.me/15550001111";
    let answer = serde_json::json!({"tweets": [{"text": format!("Short one\n\n{}", block)}]}).to_string();
    let completion = ScriptedCompletion::new(vec![Ok(answer)]);
    let context = PromptContextBuilder::default()
        .branding(Some(branding()))
        .include_branding(true)
        .build()
        .unwrap();

    let content = generator(completion, 0)
        .generate(Platform::Twitter, "Idea", &context)
        .await
        .unwrap();

    assert_eq!(content.tweet_texts().unwrap(), vec![format!("Short one\n\n{}", block)]);
}

#[tokio::test]
async fn test_branding_skipped_when_idea_opts_out() {
    let completion = ScriptedCompletion::new(vec![Ok("{\"tweets\": [{\"text\": \"hi\"}]}".to_string())]);
    let context = PromptContextBuilder::default()
        .branding(Some(branding()))
        .include_branding(false)
        .build()
        .unwrap();

    let content = generator(completion.clone(), 0)
        .generate(Platform::Twitter, "Idea", &context)
        .await
        .unwrap();

    assert_eq!(content.tweet_texts().unwrap(), vec!["hi".to_string()]);
    assert!(!completion.prompts()[0].contains("CRITICAL TWITTER RULES"));
}

#[tokio::test]
async fn test_transient_provider_error_is_retried() {
    let completion = ScriptedCompletion::new(vec![
        Err(GenerationError::new(GenerationErrorKind::Provider {
            status: 529,
            message: "overloaded".to_string(),
        })),
        Ok("{\"title\": \"T\", \"body\": \"B\"}".to_string()),
    ]);

    let content = generator(completion.clone(), 2)
        .generate(Platform::Reddit, "Idea", &PromptContextBuilder::default().build().unwrap())
        .await
        .unwrap();

    assert!(matches!(content, GeneratedContent::Post { .. }));
    assert_eq!(completion.prompts().len(), 2);
}

#[tokio::test]
async fn test_permanent_provider_error_surfaces() {
    let completion = ScriptedCompletion::new(vec![Err(GenerationError::new(
        GenerationErrorKind::Provider {
            status: 401,
            message: "bad key".to_string(),
        },
    ))]);

    let err = generator(completion.clone(), 3)
        .generate(Platform::Blogger, "Idea", &PromptContextBuilder::default().build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err.kind, GenerationErrorKind::Provider { status: 401, .. }));
    assert_eq!(completion.prompts().len(), 1);
}

#[tokio::test]
async fn test_variation_prompt_embeds_original() {
    let completion = ScriptedCompletion::new(vec![Ok("{\"title\": \"New\", \"body\": \"Fresh\"}".to_string())]);
    let original = GeneratedContent::Post {
        title: "Old".to_string(),
        body: "Stale".to_string(),
    };

    let content = generator(completion.clone(), 0)
        .generate_variation(&original, Platform::Reddit)
        .await
        .unwrap();

    assert!(matches!(content, GeneratedContent::Post { ref title, .. } if title == "New"));
    let prompt = &completion.prompts()[0];
    assert!(prompt.starts_with("Rewrite the following reddit content"));
    assert!(prompt.contains("\"title\":\"Old\""));
    assert!(prompt.ends_with("Return in the same JSON format."));
}
