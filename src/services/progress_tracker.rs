use std::sync::atomic::{AtomicU16, AtomicU8, Ordering};
use std::sync::Mutex;
use crate::config::constants::RUNNING_TASK_CREDIT;
use crate::enums::job_phase::{JobPhase, ANALYSIS_BAND_END, ANALYSIS_BAND_START};
use crate::structs::dimension_table::DimensionTable;
use crate::structs::progress_snapshot::ProgressSnapshot;

const PERMILLE: u16 = 1000;

/// Sub-progress reports map into `[RUNNING_TASK_CREDIT, SUB_PROGRESS_CEILING]`;
/// only a terminal task fills its whole band.
const SUB_PROGRESS_CEILING: f64 = 0.95;

struct TaskSlot {
    /// Share of the analysis band, in percentage points.
    width: f64,
    /// Completed fraction of the task in permille. Only ever raised.
    done: AtomicU16,
}

/// Monotonic progress of one job.
///
/// The stored percentage is raised with `fetch_max` and never lowered, so
/// tasks finishing out of order can't make the bar jump back. The phase
/// message is replaced only by an update whose candidate is at least the
/// percentage it was recorded with.
pub struct ProgressTracker {
    percent: AtomicU8,
    slots: Vec<TaskSlot>,
    latest: Mutex<ProgressSnapshot>,
}

impl ProgressTracker {
    /// Each dimension owns a slice of the analysis band proportional to its weight.
    pub fn new(table: &DimensionTable) -> Self {
        let band = (ANALYSIS_BAND_END - ANALYSIS_BAND_START) as f64;
        let slots = table
            .entries()
            .iter()
            .map(|entry| TaskSlot { width: band * entry.weight, done: AtomicU16::new(0) })
            .collect();

        Self {
            percent: AtomicU8::new(JobPhase::Queued.fixed_percent()),
            slots,
            latest: Mutex::new(ProgressSnapshot {
                percent: JobPhase::Queued.fixed_percent(),
                phase: JobPhase::Queued,
                message: JobPhase::Queued.default_message().to_string(),
            }),
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner()).clone();
        ProgressSnapshot { percent: self.percent().max(latest.percent), ..latest }
    }

    /// Move to a phase with a fixed position in the table.
    pub fn enter_phase(&self, phase: JobPhase) {
        let candidate = match phase {
            JobPhase::Analyzing => self.analysis_candidate(),
            other => other.fixed_percent(),
        };
        self.advance(candidate, phase, phase.default_message().to_string());
    }

    pub fn task_started(&self, slot: usize) {
        self.raise_slot(slot, (RUNNING_TASK_CREDIT * PERMILLE as f64) as u16);
        self.advance_analysis("running");
    }

    pub fn task_finished(&self, slot: usize) {
        self.raise_slot(slot, PERMILLE);
        self.advance_analysis("finished");
    }

    /// Adapter-reported fraction in `[0, 1]`; out-of-range values are clamped.
    pub fn report_sub_progress(&self, slot: usize, fraction: f64) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let scaled = RUNNING_TASK_CREDIT + fraction * (SUB_PROGRESS_CEILING - RUNNING_TASK_CREDIT);
        self.raise_slot(slot, (scaled * PERMILLE as f64) as u16);
        self.advance_analysis("reporting");
    }

    /// Terminal: pins the bar at 100 with the given message.
    pub fn finish(&self, phase: JobPhase, message: &str) {
        self.advance(100, phase, message.to_string());
    }

    fn raise_slot(&self, slot: usize, permille: u16) {
        if let Some(task) = self.slots.get(slot) {
            task.done.fetch_max(permille.min(PERMILLE), Ordering::AcqRel);
        }
    }

    fn analysis_candidate(&self) -> u8 {
        let covered: f64 = self
            .slots
            .iter()
            .map(|task| task.width * task.done.load(Ordering::Acquire) as f64 / PERMILLE as f64)
            .sum();
        // Epsilon keeps float noise in the widths from costing a whole point.
        let candidate = (ANALYSIS_BAND_START as f64 + covered + 1e-9).floor();
        candidate.clamp(ANALYSIS_BAND_START as f64, ANALYSIS_BAND_END as f64) as u8
    }

    fn advance_analysis(&self, event: &str) {
        let finished = self
            .slots
            .iter()
            .filter(|task| task.done.load(Ordering::Acquire) >= PERMILLE)
            .count();
        let message = format!(
            "Running comprehensive analysis... ({}/{} analyzers finished, last event: {})",
            finished,
            self.slots.len(),
            event
        );
        self.advance(self.analysis_candidate(), JobPhase::Analyzing, message);
    }

    fn advance(&self, candidate: u8, phase: JobPhase, message: String) {
        let candidate = candidate.min(100);
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        let previous = self.percent.fetch_max(candidate, Ordering::AcqRel);
        if candidate >= previous.max(latest.percent) {
            *latest = ProgressSnapshot { percent: candidate, phase, message };
        }
    }
}
