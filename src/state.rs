use std::sync::Arc;

use crate::classifier::Classifier;
use crate::config::Settings;
use crate::data::loader;
use crate::data::validate::validate;
use crate::error::PipelineError;
use crate::pipeline::{self, Outcome};
use crate::ui::dialogs::Dialogs;

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Where a load-and-predict run currently is. Every run starts and ends in
/// `Idle`; a failure jumps straight back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    FileSelected,
    Validated,
    Predicted,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Classifier loaded once at startup, or why it could not be loaded.
    classifier: Result<Arc<dyn Classifier>, String>,

    /// Current stage; `Idle` between runs.
    pub stage: Stage,

    /// Furthest stage the last run reached before returning to `Idle`.
    pub last_reached: Stage,

    /// Status line shown in the window after a run.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings, classifier: Result<Arc<dyn Classifier>, String>) -> Self {
        Self {
            settings,
            classifier,
            stage: Stage::Idle,
            last_reached: Stage::Idle,
            status_message: None,
        }
    }

    /// Name of the loaded model, or the load error.
    pub fn model_status(&self) -> Result<&str, &str> {
        match &self.classifier {
            Ok(c) => Ok(c.name()),
            Err(e) => Err(e.as_str()),
        }
    }

    /// One full run, triggered by the button: pick a file, ask about the
    /// header, load, validate, predict, report. Blocks until done.
    pub fn run(&mut self, dialogs: &mut dyn Dialogs) {
        self.last_reached = Stage::Idle;
        let result = self.run_stages(dialogs);

        match result {
            Ok(Some(outcome)) => {
                let (title, message) = outcome.message();
                dialogs.show_info(title, &message);
                self.status_message = Some(message);
            }
            Ok(None) => {
                log::debug!("File selection cancelled");
            }
            Err(e) => {
                match &e {
                    PipelineError::Read(_)
                    | PipelineError::Classifier(_)
                    | PipelineError::Write(_) => log::error!("{}: {e}", e.kind()),
                    _ => log::warn!("{}: {e}", e.kind()),
                }
                let message = e.to_string();
                dialogs.show_error(&message);
                self.status_message = Some(message);
            }
        }

        self.stage = Stage::Idle;
    }

    fn enter(&mut self, stage: Stage) {
        log::debug!("{:?} -> {:?}", self.stage, stage);
        self.stage = stage;
        self.last_reached = stage;
    }

    fn run_stages(&mut self, dialogs: &mut dyn Dialogs) -> Result<Option<Outcome>, PipelineError> {
        let Some(path) = dialogs.pick_file() else {
            return Ok(None);
        };
        loader::check_extension(&path)?;
        self.enter(Stage::FileSelected);

        let has_header = dialogs.confirm_header();
        let table = loader::load_file(&path, has_header)?;
        log::info!(
            "Loaded {} records with {} columns from {}",
            table.len(),
            table.n_columns(),
            path.display()
        );
        if let Some(headers) = &table.headers {
            log::debug!("Header row as given: {headers:?}");
        }

        validate(&table)?;
        self.enter(Stage::Validated);

        let classifier = self
            .classifier
            .as_ref()
            .map_err(|e| PipelineError::Classifier(e.clone()))?;
        let outcome = pipeline::predict(&table, classifier.as_ref(), &self.settings)?;
        self.enter(Stage::Predicted);

        Ok(Some(outcome))
    }
}
