//! Bounded search for the translate that puts the first line of content on
//! the viewport's bottom edge.
//!
//! Applying a translate can itself move the measured layout (clamped scroll
//! ranges, late reflow), so the search observes, corrects, and observes again
//! instead of trusting a single computation. One step runs per rendered frame.

/// Read-only view of the rendered crawl that measurement depends on.
pub trait LayoutProbe {
    /// Whether the crawl container currently exists.
    fn is_attached(&self) -> bool;
    /// Height of the rendered content, excluding any lead or trailing space.
    fn content_height(&self) -> Option<f32>;
    /// Height of the crawl viewport, when one is laid out.
    fn viewport_height(&self) -> Option<f32>;
    fn window_height(&self) -> f32;
    /// Top of the first content line relative to the viewport's top edge,
    /// with the currently applied translate.
    fn first_line_top(&self) -> Option<f32>;

    /// Where the first line should sit when the loop starts.
    fn desired_top(&self) -> f32 {
        self.viewport_height()
            .filter(|height| height.is_finite() && *height > 0.0)
            .unwrap_or_else(|| self.window_height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    pub max_iterations: u32,
    pub tolerance_px: f32,
    pub max_step_px: f32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            tolerance_px: 2.0,
            max_step_px: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStep {
    /// Apply this translate and observe again on the next frame.
    Continue(f32),
    /// Within tolerance.
    Settled(f32),
    /// Iteration cap reached; the last translate is kept.
    Exhausted(f32),
    /// Nothing to anchor on (no first line); the last translate is kept.
    NoAnchor(f32),
}

impl SearchStep {
    pub fn translate(self) -> f32 {
        match self {
            SearchStep::Continue(t)
            | SearchStep::Settled(t)
            | SearchStep::Exhausted(t)
            | SearchStep::NoAnchor(t) => t,
        }
    }

    pub fn is_final(self) -> bool {
        !matches!(self, SearchStep::Continue(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSearch {
    translate: f32,
    iterations: u32,
    limits: SearchLimits,
}

impl OffsetSearch {
    /// Searches start from translate 0, which the caller applies first.
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            translate: 0.0,
            iterations: 0,
            limits,
        }
    }

    pub fn translate(&self) -> f32 {
        self.translate
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn step(&mut self, observed_top: Option<f32>, desired_top: f32) -> SearchStep {
        if self.iterations >= self.limits.max_iterations {
            return SearchStep::Exhausted(self.translate);
        }
        self.iterations += 1;

        let Some(top) = observed_top.filter(|top| top.is_finite()) else {
            return SearchStep::NoAnchor(self.translate);
        };
        let delta = desired_top - top;
        if delta.abs() <= self.limits.tolerance_px {
            self.translate += delta;
            return SearchStep::Settled(self.translate);
        }

        self.translate += delta.signum() * delta.abs().min(self.limits.max_step_px);
        if self.iterations >= self.limits.max_iterations {
            SearchStep::Exhausted(self.translate)
        } else {
            SearchStep::Continue(self.translate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Layout where applying translate `t` puts the first line at
    /// `t * gain + bias`.
    fn observe(translate: f32, gain: f32, bias: f32) -> f32 {
        translate * gain + bias
    }

    fn run(search: &mut OffsetSearch, desired: f32, gain: f32, bias: f32) -> SearchStep {
        loop {
            let top = observe(search.translate(), gain, bias);
            let step = search.step(Some(top), desired);
            if step.is_final() {
                return step;
            }
        }
    }

    #[test]
    fn settles_immediately_on_linear_layout() {
        let mut search = OffsetSearch::new(SearchLimits::default());
        let step = run(&mut search, 720.0, 1.0, 0.0);
        assert!(matches!(step, SearchStep::Settled(_)));
        assert!((step.translate() - 720.0).abs() <= 2.0);
        assert_eq!(search.iterations(), 2);
    }

    #[test]
    fn compensates_for_layout_that_reacts_to_the_transform() {
        let mut search = OffsetSearch::new(SearchLimits::default());
        let step = run(&mut search, 900.0, 0.5, 40.0);
        assert!(matches!(step, SearchStep::Settled(_)));
        let top = observe(step.translate(), 0.5, 40.0);
        assert!((top - 900.0).abs() <= 2.0, "first line ended at {top}");
        assert!(search.iterations() <= 15);
    }

    #[test]
    fn large_deltas_are_clamped_per_step() {
        let mut search = OffsetSearch::new(SearchLimits::default());
        let step = search.step(Some(0.0), 5000.0);
        assert_eq!(step, SearchStep::Continue(2000.0));
        let step = search.step(Some(6000.0), 0.0);
        assert_eq!(step, SearchStep::Continue(0.0));
    }

    #[test]
    fn never_exceeds_the_iteration_cap() {
        let mut search = OffsetSearch::new(SearchLimits::default());
        // Layout that never moves: every step sees the same top.
        let mut steps = 0;
        let last = loop {
            steps += 1;
            let step = search.step(Some(0.0), 100.0);
            if step.is_final() {
                break step;
            }
            assert!(steps < 100, "search did not terminate");
        };
        assert!(matches!(last, SearchStep::Exhausted(_)));
        assert_eq!(search.iterations(), 15);
        assert!(matches!(
            search.step(Some(0.0), 100.0),
            SearchStep::Exhausted(_)
        ));
    }

    #[test]
    fn missing_anchor_keeps_current_translate() {
        let mut search = OffsetSearch::new(SearchLimits::default());
        assert_eq!(search.step(Some(200.0), 700.0), SearchStep::Continue(500.0));
        assert_eq!(search.step(None, 700.0), SearchStep::NoAnchor(500.0));
    }
}
