//! Post cycle orchestration.

use crate::{ContentPlanStore, HistoryLedger, IdeaSelector, PlatformDispatcher};
use derive_getters::Getters;
use herald_core::{ContentIdea, ContentPlan, HistoryEntry, PlatformResult};
use herald_error::HeraldResult;
use herald_narrative::{ContentGenerator, PromptContext};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

/// Cycle sizing and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct OrchestratorSettings {
    /// Upper bound on ideas processed per cycle
    #[builder(default = "3")]
    posts_per_run: usize,
    /// Pause between ideas within a cycle
    #[builder(default = "Duration::from_secs(60)")]
    delay_between_posts: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            posts_per_run: 3,
            delay_between_posts: Duration::from_secs(60),
        }
    }
}

/// What a finished cycle did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct CycleReport {
    /// Number of ideas processed
    processed: usize,
    /// History entries appended, in order
    entries: Vec<HistoryEntry>,
}

impl CycleReport {
    fn push(&mut self, entry: HistoryEntry) {
        self.processed += 1;
        self.entries.push(entry);
    }
}

/// Result of asking the orchestrator to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle ran to the end
    Completed(CycleReport),
    /// Another cycle held the guard; nothing was done
    AlreadyRunning,
}

/// Runs post cycles: select, generate, dispatch, record.
///
/// One orchestrator is shared by every trigger. A single-slot guard rejects
/// overlapping cycles instead of queueing them.
pub struct CycleOrchestrator {
    plans: ContentPlanStore,
    ledger: Arc<HistoryLedger>,
    generator: ContentGenerator,
    dispatcher: PlatformDispatcher,
    settings: OrchestratorSettings,
    selector: Mutex<IdeaSelector>,
}

impl std::fmt::Debug for CycleOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleOrchestrator")
            .field("plan", &self.plans.path())
            .field("history", &self.ledger.path())
            .field("generator", &self.generator)
            .field("dispatcher", &self.dispatcher)
            .field("settings", &self.settings)
            .finish()
    }
}

impl CycleOrchestrator {
    /// Wire an orchestrator from its collaborators.
    pub fn new(
        plans: ContentPlanStore,
        ledger: Arc<HistoryLedger>,
        generator: ContentGenerator,
        dispatcher: PlatformDispatcher,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            plans,
            ledger,
            generator,
            dispatcher,
            settings,
            selector: Mutex::new(IdeaSelector::new()),
        }
    }

    /// Replace the idea selector, e.g. with a seeded one.
    pub fn with_selector(mut self, selector: IdeaSelector) -> Self {
        self.selector = Mutex::new(selector);
        self
    }

    /// The dispatcher used for publishing.
    pub fn dispatcher(&self) -> &PlatformDispatcher {
        &self.dispatcher
    }

    /// The history ledger.
    pub fn ledger(&self) -> &Arc<HistoryLedger> {
        &self.ledger
    }

    /// Cycle settings.
    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Run one post cycle.
    ///
    /// Reloads the plan and history, then processes up to `posts_per_run`
    /// ideas with `delay_between_posts` between them.
    ///
    /// # Errors
    ///
    /// Plan and history storage failures abort the cycle. Generation and
    /// publishing failures never do; they are recorded as failed results.
    #[instrument(skip(self), fields(posts_per_run = self.settings.posts_per_run))]
    pub async fn run_cycle(&self) -> HeraldResult<CycleOutcome> {
        let Ok(mut selector) = self.selector.try_lock() else {
            warn!("Previous post cycle still running, skipping this trigger");
            return Ok(CycleOutcome::AlreadyRunning);
        };

        info!("Starting post cycle");
        let plan = self.refresh(&mut selector).await?;

        let posts_to_create = self.settings.posts_per_run.min(plan.ideas().len());
        let mut report = CycleReport::default();

        for i in 0..posts_to_create {
            let Some(idea) = selector.next(&plan) else {
                warn!("No content ideas available");
                break;
            };

            let entry = self.process_idea(&plan, &idea, selector.cursor()).await?;
            report.push(entry);

            if i + 1 < posts_to_create && !self.settings.delay_between_posts.is_zero() {
                debug!(
                    seconds = self.settings.delay_between_posts.as_secs(),
                    "Waiting before next post"
                );
                tokio::time::sleep(self.settings.delay_between_posts).await;
            }
        }

        info!(processed = report.processed, "Post cycle completed");
        Ok(CycleOutcome::Completed(report))
    }

    /// Process exactly one idea now, under the same guard as [`run_cycle`](Self::run_cycle).
    ///
    /// # Errors
    ///
    /// Plan and history storage failures.
    #[instrument(skip(self))]
    pub async fn process_next(&self) -> HeraldResult<CycleOutcome> {
        let Ok(mut selector) = self.selector.try_lock() else {
            warn!("Post cycle running, skipping single post");
            return Ok(CycleOutcome::AlreadyRunning);
        };

        let plan = self.refresh(&mut selector).await?;
        let mut report = CycleReport::default();

        match selector.next(&plan) {
            Some(idea) => {
                let entry = self.process_idea(&plan, &idea, selector.cursor()).await?;
                report.push(entry);
            }
            None => warn!("No content ideas available"),
        }

        Ok(CycleOutcome::Completed(report))
    }

    async fn refresh(&self, selector: &mut IdeaSelector) -> HeraldResult<ContentPlan> {
        let plan = self.plans.load().await?;
        let history = self.ledger.load().await?;
        selector.set_cursor(*history.rotation_cursor());
        debug!(
            posts = history.posts().len(),
            cursor = selector.cursor(),
            "Refreshed plan and history"
        );
        Ok(plan)
    }

    #[instrument(skip(self, plan, idea), fields(idea_id = *idea.id()))]
    async fn process_idea(
        &self,
        plan: &ContentPlan,
        idea: &ContentIdea,
        rotation_cursor: u64,
    ) -> HeraldResult<HistoryEntry> {
        info!(idea = %idea.text(), "Processing idea");
        let context = PromptContext::for_idea(idea, plan.branding().as_ref());
        let mut results = Vec::with_capacity(idea.platforms().len());

        for platform in idea.platforms() {
            let platform = *platform;
            if !self.dispatcher.is_enabled(platform) {
                debug!(platform = %platform, "Platform disabled, skipping");
                continue;
            }

            let result = match self.generator.generate(platform, idea.text(), &context).await {
                Ok(content) => self.dispatcher.dispatch(platform, idea, &content).await,
                Err(e) => {
                    error!(platform = %platform, error = %e, "Content generation failed");
                    PlatformResult::failure(platform, e.kind.to_string())
                }
            };
            results.push(result);
        }

        let entry = HistoryEntry::new(idea, results);
        self.ledger.append(entry.clone(), rotation_cursor).await?;
        info!(
            results = entry.results().len(),
            any_success = entry.any_success(),
            "Recorded history entry"
        );
        Ok(entry)
    }
}
