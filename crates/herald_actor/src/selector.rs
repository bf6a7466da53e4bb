//! Idea rotation.

use herald_core::{ContentIdea, ContentPlan, RotationStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks the next idea from a plan.
///
/// Sequential rotation walks the plan in order and wraps forever; random
/// rotation picks uniformly on every call with no memory of past picks.
///
/// # Examples
///
/// ```
/// use herald_actor::IdeaSelector;
/// use herald_core::ContentPlan;
///
/// let plan: ContentPlan = serde_json::from_str(
///     r#"{"contentPlan": [{"id": 1, "idea": "a"}, {"id": 2, "idea": "b"}],
///         "settings": {"rotationStrategy": "sequential"}}"#,
/// ).unwrap();
///
/// let mut selector = IdeaSelector::new();
/// assert_eq!(*selector.next(&plan).unwrap().id(), 1);
/// assert_eq!(*selector.next(&plan).unwrap().id(), 2);
/// assert_eq!(*selector.next(&plan).unwrap().id(), 1);
/// ```
#[derive(Debug)]
pub struct IdeaSelector {
    cursor: u64,
    rng: StdRng,
}

impl Default for IdeaSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl IdeaSelector {
    /// Selector starting at the beginning of the plan.
    pub fn new() -> Self {
        Self::with_cursor(0)
    }

    /// Selector resuming from a persisted cursor.
    pub fn with_cursor(cursor: u64) -> Self {
        Self {
            cursor,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Current sequential cursor.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Move the sequential cursor.
    pub fn set_cursor(&mut self, cursor: u64) {
        self.cursor = cursor;
    }

    /// Next idea, or `None` for an empty plan.
    pub fn next(&mut self, plan: &ContentPlan) -> Option<ContentIdea> {
        let ideas = plan.ideas();
        if ideas.is_empty() {
            return None;
        }

        let index = match plan.rotation_strategy() {
            RotationStrategy::Sequential => {
                let index = (self.cursor % ideas.len() as u64) as usize;
                self.cursor = self.cursor.wrapping_add(1);
                index
            }
            RotationStrategy::Random => self.rng.gen_range(0..ideas.len()),
        };

        ideas.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{ContentIdeaBuilder, PlanSettings};

    fn plan(count: u64, strategy: RotationStrategy) -> ContentPlan {
        let ideas = (0..count)
            .map(|id| {
                ContentIdeaBuilder::default()
                    .id(id)
                    .text(format!("idea {}", id))
                    .build()
                    .unwrap()
            })
            .collect();
        ContentPlan::new(ideas, None, PlanSettings::new(strategy))
    }

    #[test]
    fn test_sequential_covers_all_before_repeat() {
        let plan = plan(5, RotationStrategy::Sequential);
        let mut selector = IdeaSelector::new();
        let ids: Vec<u64> = (0..6).map(|_| *selector.next(&plan).unwrap().id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 0]);
        assert_eq!(selector.cursor(), 6);
    }

    #[test]
    fn test_sequential_resumes_from_cursor() {
        let plan = plan(3, RotationStrategy::Sequential);
        let mut selector = IdeaSelector::with_cursor(7);
        assert_eq!(*selector.next(&plan).unwrap().id(), 1);
    }

    #[test]
    fn test_random_stays_in_range() {
        let plan = plan(4, RotationStrategy::Random);
        let mut selector = IdeaSelector::new().with_rng(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            assert!(*selector.next(&plan).unwrap().id() < 4);
        }
        assert_eq!(selector.cursor(), 0);
    }

    #[test]
    fn test_empty_plan_yields_none() {
        let mut selector = IdeaSelector::new();
        assert!(selector.next(&plan(0, RotationStrategy::Sequential)).is_none());
        assert!(selector.next(&plan(0, RotationStrategy::Random)).is_none());
    }
}
