//! Simulated contract upload
//!
//! Dropped files enter the queue as `Uploading` and each resolves once, after a
//! random delay, to `Success` or `Error`. Nothing is actually transferred.
//!
//! Every file gets its own [`FileId`] at submission and all transitions are
//! keyed by it, so two files sharing a name resolve independently. Ids are
//! never reused, not even after the panel is closed and the queue cleared.

use crate::config::UploadSimulationConfig;
use crate::scheduler::Scheduler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FileId(u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadStatus::Uploading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFile {
    pub id: FileId,
    pub name: String,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadCounts {
    pub uploading: usize,
    pub success: usize,
    pub error: usize,
}

/// The file list shown in the upload panel
#[derive(Debug, Default)]
pub struct UploadQueue {
    files: Vec<UploadFile>,
    next_id: u64,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `Uploading` entry per name, in drop order
    pub fn submit<I, N>(&mut self, names: I) -> Vec<FileId>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        names
            .into_iter()
            .map(|name| {
                let id = FileId(self.next_id);
                self.next_id += 1;
                self.files.push(UploadFile {
                    id,
                    name: name.into(),
                    status: UploadStatus::Uploading,
                });
                id
            })
            .collect()
    }

    /// Move a file from `Uploading` to a terminal status
    ///
    /// Returns false (and changes nothing) if the file is gone, already
    /// resolved, or `status` is not terminal.
    pub fn resolve(&mut self, id: FileId, status: UploadStatus) -> bool {
        if !status.is_terminal() {
            return false;
        }
        match self.files.iter_mut().find(|f| f.id == id) {
            Some(file) if file.status == UploadStatus::Uploading => {
                file.status = status;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn get(&self, id: FileId) -> Option<&UploadFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn counts(&self) -> UploadCounts {
        self.files
            .iter()
            .fold(UploadCounts::default(), |mut counts, file| {
                match file.status {
                    UploadStatus::Uploading => counts.uploading += 1,
                    UploadStatus::Success => counts.success += 1,
                    UploadStatus::Error => counts.error += 1,
                }
                counts
            })
    }

    /// True when no file is still uploading
    pub fn is_settled(&self) -> bool {
        self.files.iter().all(|f| f.status.is_terminal())
    }
}

/// When and how one file resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub delay: Duration,
    pub status: UploadStatus,
}

pub trait OutcomeSource {
    fn draw(&mut self) -> Resolution;
}

/// Uniform delay in `[min, max)`, success with the configured probability
pub struct RandomOutcomes<R> {
    rng: R,
    min_ms: u64,
    max_ms: u64,
    success_probability: f64,
}

impl<R: Rng> RandomOutcomes<R> {
    pub fn new(rng: R, config: &UploadSimulationConfig) -> Self {
        Self {
            rng,
            min_ms: config.min_delay_ms,
            max_ms: config.max_delay_ms.max(config.min_delay_ms),
            success_probability: config.success_probability.clamp(0.0, 1.0),
        }
    }
}

impl RandomOutcomes<StdRng> {
    pub fn from_entropy(config: &UploadSimulationConfig) -> Self {
        Self::new(StdRng::from_entropy(), config)
    }

    pub fn seeded(seed: u64, config: &UploadSimulationConfig) -> Self {
        Self::new(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> OutcomeSource for RandomOutcomes<R> {
    fn draw(&mut self) -> Resolution {
        let delay_ms = if self.max_ms > self.min_ms {
            self.rng.gen_range(self.min_ms..self.max_ms)
        } else {
            self.min_ms
        };
        let status = if self.rng.gen_bool(self.success_probability) {
            UploadStatus::Success
        } else {
            UploadStatus::Error
        };
        Resolution {
            delay: Duration::from_millis(delay_ms),
            status,
        }
    }
}

/// Plays back a fixed list of resolutions, then repeats the fallback
pub struct ScriptedOutcomes {
    script: VecDeque<Resolution>,
    fallback: Resolution,
}

impl ScriptedOutcomes {
    pub fn new(script: impl IntoIterator<Item = Resolution>, fallback: Resolution) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn draw(&mut self) -> Resolution {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

pub type ChangeListener = Rc<dyn Fn()>;

/// Upload overlay: open/close lifecycle plus the timer wiring
pub struct UploadPanel<S, O> {
    queue: Rc<RefCell<UploadQueue>>,
    scheduler: S,
    outcomes: O,
    open: bool,
    on_change: Option<ChangeListener>,
}

impl<S: Scheduler, O: OutcomeSource> UploadPanel<S, O> {
    pub fn new(scheduler: S, outcomes: O) -> Self {
        Self {
            queue: Rc::new(RefCell::new(UploadQueue::new())),
            scheduler,
            outcomes,
            open: false,
            on_change: None,
        }
    }

    /// Called after every timer-driven status change
    pub fn set_on_change(&mut self, listener: Option<ChangeListener>) {
        self.on_change = listener;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the panel and drop the whole batch, pending timers included
    pub fn close(&mut self) {
        self.open = false;
        let mut queue = self.queue.borrow_mut();
        if !queue.is_empty() {
            debug!("Upload panel closed, discarding {} files", queue.files().len());
        }
        queue.clear();
    }

    /// Accept a drop of files and start their simulated uploads
    ///
    /// Drops onto a closed panel are ignored.
    pub fn submit_batch<I, N>(&mut self, names: I) -> Vec<FileId>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        if !self.open {
            debug!("Ignoring drop on closed upload panel");
            return Vec::new();
        }
        let ids = self.queue.borrow_mut().submit(names);
        for &id in &ids {
            let resolution = self.outcomes.draw();
            let queue = Rc::downgrade(&self.queue);
            let on_change = self.on_change.clone();
            self.scheduler.schedule(
                resolution.delay,
                Box::new(move || apply_resolution(&queue, id, resolution.status, on_change)),
            );
        }
        debug!("Submitted {} files for upload", ids.len());
        ids
    }

    pub fn files(&self) -> Vec<UploadFile> {
        self.queue.borrow().files().to_vec()
    }

    pub fn status_of(&self, id: FileId) -> Option<UploadStatus> {
        self.queue.borrow().get(id).map(|f| f.status)
    }

    pub fn counts(&self) -> UploadCounts {
        self.queue.borrow().counts()
    }

    pub fn is_settled(&self) -> bool {
        self.queue.borrow().is_settled()
    }
}

/// Timer body; a no-op once the panel is dropped or the file was cleared
fn apply_resolution(
    queue: &Weak<RefCell<UploadQueue>>,
    id: FileId,
    status: UploadStatus,
    on_change: Option<ChangeListener>,
) {
    let Some(queue) = queue.upgrade() else {
        return;
    };
    let changed = queue.borrow_mut().resolve(id, status);
    if changed {
        debug!("{} finished: {:?}", id, status);
        if let Some(listener) = on_change {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn resolution(delay: u64, status: UploadStatus) -> Resolution {
        Resolution {
            delay: ms(delay),
            status,
        }
    }

    fn scripted(
        script: Vec<Resolution>,
    ) -> (VirtualScheduler, UploadPanel<VirtualScheduler, ScriptedOutcomes>) {
        let scheduler = VirtualScheduler::new();
        let outcomes = ScriptedOutcomes::new(script, resolution(1000, UploadStatus::Success));
        let mut panel = UploadPanel::new(scheduler.clone(), outcomes);
        panel.open();
        (scheduler, panel)
    }

    #[test]
    fn test_submit_preserves_drop_order() {
        let mut queue = UploadQueue::new();
        queue.submit(["a.pdf", "b.pdf"]);
        queue.submit(vec!["c.pdf".to_string()]);
        let names: Vec<&str> = queue.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
        assert!(queue
            .files()
            .iter()
            .all(|f| f.status == UploadStatus::Uploading));
    }

    #[test]
    fn test_resolve_only_once() {
        let mut queue = UploadQueue::new();
        let ids = queue.submit(["a.pdf"]);
        assert!(queue.resolve(ids[0], UploadStatus::Error));
        assert!(!queue.resolve(ids[0], UploadStatus::Success));
        assert_eq!(queue.get(ids[0]).unwrap().status, UploadStatus::Error);
    }

    #[test]
    fn test_resolve_rejects_non_terminal() {
        let mut queue = UploadQueue::new();
        let ids = queue.submit(["a.pdf"]);
        assert!(!queue.resolve(ids[0], UploadStatus::Uploading));
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut queue = UploadQueue::new();
        let first = queue.submit(["a.pdf"]);
        queue.clear();
        let second = queue.submit(["a.pdf"]);
        assert_ne!(first[0], second[0]);
        assert!(!queue.resolve(first[0], UploadStatus::Success));
        assert_eq!(queue.get(second[0]).unwrap().status, UploadStatus::Uploading);
    }

    #[test]
    fn test_files_resolve_in_delay_order() {
        let (scheduler, mut panel) = scripted(vec![
            resolution(2500, UploadStatus::Success),
            resolution(1200, UploadStatus::Error),
        ]);
        let ids = panel.submit_batch(["slow.pdf", "fast.pdf"]);

        scheduler.advance(ms(1500));
        assert_eq!(panel.status_of(ids[0]), Some(UploadStatus::Uploading));
        assert_eq!(panel.status_of(ids[1]), Some(UploadStatus::Error));

        scheduler.advance(ms(1000));
        assert_eq!(panel.status_of(ids[0]), Some(UploadStatus::Success));
        assert!(panel.is_settled());
    }

    #[test]
    fn test_duplicate_names_resolve_independently() {
        let (scheduler, mut panel) = scripted(vec![
            resolution(1000, UploadStatus::Success),
            resolution(2000, UploadStatus::Error),
        ]);
        let ids = panel.submit_batch(["lease.pdf", "lease.pdf"]);

        scheduler.advance(ms(1000));
        assert_eq!(panel.status_of(ids[0]), Some(UploadStatus::Success));
        assert_eq!(panel.status_of(ids[1]), Some(UploadStatus::Uploading));

        scheduler.advance(ms(1000));
        assert_eq!(panel.status_of(ids[0]), Some(UploadStatus::Success));
        assert_eq!(panel.status_of(ids[1]), Some(UploadStatus::Error));
    }

    #[test]
    fn test_close_discards_batch_and_late_timers() {
        let (scheduler, mut panel) = scripted(vec![]);
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        panel.set_on_change(Some(Rc::new(move || counter.set(counter.get() + 1))));

        panel.submit_batch(["a.pdf", "b.pdf"]);
        panel.close();
        assert!(panel.files().is_empty());
        assert!(!panel.is_open());

        assert_eq!(scheduler.run_until_idle(), 2);
        assert!(panel.files().is_empty());
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_reopened_panel_unaffected_by_old_timers() {
        let (scheduler, mut panel) = scripted(vec![
            resolution(1000, UploadStatus::Error),
            resolution(3000, UploadStatus::Success),
        ]);
        panel.submit_batch(["old.pdf"]);
        panel.close();
        panel.open();
        let ids = panel.submit_batch(["new.pdf"]);

        scheduler.advance(ms(1000));
        assert_eq!(panel.files().len(), 1);
        assert_eq!(panel.status_of(ids[0]), Some(UploadStatus::Uploading));
    }

    #[test]
    fn test_dropped_panel_makes_timers_no_ops() {
        let (scheduler, mut panel) = scripted(vec![]);
        panel.submit_batch(["a.pdf"]);
        drop(panel);
        assert_eq!(scheduler.run_until_idle(), 1);
    }

    #[test]
    fn test_drop_on_closed_panel_is_ignored() {
        let (scheduler, mut panel) = scripted(vec![]);
        panel.close();
        assert!(panel.submit_batch(["a.pdf"]).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_counts() {
        let (scheduler, mut panel) = scripted(vec![
            resolution(1000, UploadStatus::Success),
            resolution(1000, UploadStatus::Error),
            resolution(2000, UploadStatus::Success),
        ]);
        panel.submit_batch(["a", "b", "c"]);
        scheduler.advance(ms(1000));
        assert_eq!(
            panel.counts(),
            UploadCounts {
                uploading: 1,
                success: 1,
                error: 1,
            }
        );
    }

    #[test]
    fn test_random_outcomes_stay_in_bounds() {
        let config = UploadSimulationConfig::default();
        let mut outcomes = RandomOutcomes::seeded(7, &config);
        for _ in 0..500 {
            let r = outcomes.draw();
            assert!(r.delay >= ms(1000) && r.delay < ms(3000));
            assert!(r.status.is_terminal());
        }
    }

    #[test]
    fn test_random_outcomes_respect_certain_probabilities() {
        let always = UploadSimulationConfig {
            success_probability: 1.0,
            ..UploadSimulationConfig::default()
        };
        let never = UploadSimulationConfig {
            success_probability: 0.0,
            ..UploadSimulationConfig::default()
        };
        let mut ok = RandomOutcomes::seeded(1, &always);
        let mut failing = RandomOutcomes::seeded(1, &never);
        for _ in 0..50 {
            assert_eq!(ok.draw().status, UploadStatus::Success);
            assert_eq!(failing.draw().status, UploadStatus::Error);
        }
    }

    #[test]
    fn test_random_outcomes_roughly_eighty_percent_success() {
        let mut outcomes = RandomOutcomes::seeded(42, &UploadSimulationConfig::default());
        let successes = (0..10_000)
            .filter(|_| outcomes.draw().status == UploadStatus::Success)
            .count();
        assert!((7_500..8_500).contains(&successes), "got {}", successes);
    }

    #[test]
    fn test_file_serializes_for_js() {
        let mut queue = UploadQueue::new();
        queue.submit(["a.pdf"]);
        let json = serde_json::to_value(queue.files()).unwrap();
        assert_eq!(json[0]["name"], "a.pdf");
        assert_eq!(json[0]["status"], "uploading");
        assert_eq!(json[0]["id"], 0);
    }
}
