use std::sync::{Arc, Mutex};
use std::time::Duration;

use fqanon::progress::{ByteNum, ProgressNotifier};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

#[derive(Debug)]
struct RecordProgressBarState {
    total_bytes: Option<u64>,
    records: u64,
    initialized: bool,
}

impl RecordProgressBarState {
    fn new() -> Self {
        Self {
            total_bytes: None,
            records: 0,
            initialized: false,
        }
    }
}

/// Progress bar showing processed bytes when the input length is known, or a
/// spinner with the record count otherwise.
#[derive(Debug, Clone)]
pub(crate) struct RecordProgressBar {
    bar: ProgressBar,
    state: Arc<Mutex<RecordProgressBarState>>,
}

impl RecordProgressBar {
    pub fn new() -> RecordProgressBar {
        let init_bar = ProgressBar::hidden();
        init_bar.set_style(ProgressStyle::default_spinner());
        init_bar.enable_steady_tick(Duration::from_millis(50));
        init_bar.set_message("Initializing...");

        Self {
            bar: init_bar,
            state: Arc::new(Mutex::new(RecordProgressBarState::new())),
        }
    }

    pub fn show(&self) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut RecordProgressBarState) -> T) -> T {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state)
    }

    #[inline]
    fn init(&self, state: &mut RecordProgressBarState) {
        if state.initialized {
            return;
        }

        self.bar.set_position(0);
        if let Some(total_bytes) = state.total_bytes {
            self.bar.set_length(total_bytes);
            self.bar.set_style(
                ProgressStyle::default_bar()
                    .template("{wide_bar} {bytes}/{total_bytes} {msg} [ETA {eta}]")
                    .expect("Invalid progress bar template"),
            );
        } else {
            self.bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {bytes} ({bytes_per_sec}) {msg}")
                    .expect("Invalid progress bar template"),
            );
        }
        state.initialized = true;
    }

    /// Sets the expected input size; `None` switches to a spinner.
    pub fn set_total_bytes(&self, total_bytes: Option<u64>) {
        self.with_state(|state| {
            state.initialized = false;
            state.records = 0;
            state.total_bytes = total_bytes;
        });
    }

    pub fn println<I: AsRef<str>>(&self, msg: I) {
        self.bar.println(msg);
    }
}

impl ProgressNotifier for RecordProgressBar {
    fn processed_bytes(&self, bytes: ByteNum) {
        self.with_state(|state| self.init(state));
        self.bar.inc(bytes.get() as u64);
    }

    fn inc_records(&self, records: u64) {
        let total = self.with_state(|state| {
            self.init(state);
            state.records += records;
            state.records
        });
        self.bar.set_message(format!("{} records", total));
    }
}
