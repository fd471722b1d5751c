use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strucmap::engine::progress::{Progress, ProgressCallback};
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders pipeline progress on stderr: a spinner per stage, a bar for batches.
///
/// Batch failures are tallied and shown in the bar message and the final summary.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    failed: Arc<AtomicU64>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(Self::spinner_style());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            failed: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let handler = self.clone();
        Box::new(move |progress: Progress| handler.handle(progress))
    }

    fn handle(&self, progress: Progress) {
        let Ok(pb) = self.pb.lock() else {
            warn!("Progress bar mutex was poisoned. Cannot update progress.");
            return;
        };

        match progress {
            Progress::StageStart { stage } => {
                pb.reset();
                pb.set_length(0);
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_message(stage.name());
            }
            Progress::StageFinish { stage } => {
                pb.disable_steady_tick();
                pb.finish_with_message(format!("✓ {}", stage.name()));
            }
            Progress::BatchStart { total } => {
                self.failed.store(0, Ordering::Relaxed);
                pb.disable_steady_tick();
                pb.reset();
                pb.set_length(total);
                pb.set_style(Self::bar_style());
                pb.set_message("Loading entries");
            }
            Progress::EntryFinished { id, ok } => {
                if !ok {
                    let failed = self.failed.fetch_add(1, Ordering::Relaxed) + 1;
                    pb.println(format!("  ✗ {id}"));
                    pb.set_message(format!("Loading entries ({failed} failed)"));
                }
                pb.inc(1);
            }
            Progress::BatchFinish => {
                let total = pb.length().unwrap_or(0);
                let failed = self.failed.load(Ordering::Relaxed);
                pb.set_position(total);
                pb.finish_with_message(format!(
                    "✓ {} loaded, {} failed",
                    total.saturating_sub(failed),
                    failed
                ));
            }
            Progress::Message(msg) => pb.println(format!("  {msg}")),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
