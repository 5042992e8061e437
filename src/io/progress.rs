//! Pack generation progress with one bar per difficulty tier

use crate::analysis::difficulty::Difficulty;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display while a level pack is generated
///
/// Each requested tier gets its own bar. When more than one tier is requested
/// a total bar is added below them.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    total_bar: Option<ProgressBar>,
    tier_bars: Vec<TierBar>,
    failures: usize,
}

struct TierBar {
    difficulty: Difficulty,
    bar: ProgressBar,
    skipped: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static TIER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>8} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static TOTAL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Levels: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            total_bar: None,
            tier_bars: Vec::new(),
            failures: 0,
        }
    }

    /// Create one bar per tier with a non-zero level count
    pub fn initialize(&mut self, plan: &[(Difficulty, usize)]) {
        let requested: Vec<&(Difficulty, usize)> =
            plan.iter().filter(|(_, count)| *count > 0).collect();

        for &&(difficulty, count) in &requested {
            let bar = ProgressBar::new(count as u64);
            bar.set_style(TIER_STYLE.clone());
            bar.set_prefix(difficulty.title());
            self.tier_bars.push(TierBar {
                difficulty,
                bar: self.multi_progress.add(bar),
                skipped: 0,
            });
        }

        if requested.len() > 1 {
            let total: usize = requested.iter().map(|(_, count)| count).sum();
            let bar = ProgressBar::new(total as u64);
            bar.set_style(TOTAL_STYLE.clone());
            self.total_bar = Some(self.multi_progress.add(bar));
        }
    }

    /// Record one finished level slot, generated or skipped
    pub fn complete_level(&mut self, difficulty: Difficulty, generated: bool) {
        if !generated {
            self.failures += 1;
        }

        if let Some(tier) = self
            .tier_bars
            .iter_mut()
            .find(|tier| tier.difficulty == difficulty)
        {
            tier.bar.inc(1);
            if !generated {
                tier.skipped += 1;
                tier.bar.set_message(format!("{} skipped", tier.skipped));
            }
        }
        if let Some(ref total_bar) = self.total_bar {
            total_bar.inc(1);
        }
    }

    /// Level slots that produced no level
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for tier in &self.tier_bars {
            tier.bar.finish();
        }
        if let Some(ref total_bar) = self.total_bar {
            total_bar.finish_with_message("All levels processed");
        }
        let _ = self.multi_progress.clear();
    }
}
