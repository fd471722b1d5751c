/// A pipeline stage, as announced to progress listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Scan,
    Build,
    Statistics,
    Alignment,
    References,
    Sites,
    Metadata,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Scan => "Scanning records",
            Stage::Build => "Building chains",
            Stage::Statistics => "Computing B-factor statistics",
            Stage::Alignment => "Aligning canonical sequences",
            Stage::References => "Resolving reference positions",
            Stage::Sites => "Extracting sites",
            Stage::Metadata => "Parsing metadata",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Progress {
    StageStart { stage: Stage },
    StageFinish { stage: Stage },

    BatchStart { total: u64 },
    EntryFinished { id: String, ok: bool },
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional listener.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` between a start and a finish event for `stage`.
    pub fn stage<T>(&self, stage: Stage, f: impl FnOnce() -> T) -> T {
        self.report(Progress::StageStart { stage });
        let result = f();
        self.report(Progress::StageFinish { stage });
        result
    }
}
