use color_eyre::eyre::Result;

/// One selectable line in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub title: String,
    pub subtitle: String,
}

impl Choice {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Port trait for asking the user to pick from a list.
///
/// Both methods return `Ok(None)` when the user aborts the prompt.
/// Implementations live in `terminal::prompt` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Prompter: Send + Sync {
    /// Pick any number of choices, at least one. Returns the chosen indices in
    /// list order.
    async fn multi_select(&self, message: &str, choices: &[Choice]) -> Result<Option<Vec<usize>>>;

    /// Pick exactly one choice.
    async fn select(&self, message: &str, choices: &[Choice]) -> Result<Option<usize>>;
}

/// Receives free-text status updates during long running work.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str);

    /// Stop drawing until the next `report`, so a prompt can take the terminal.
    fn pause(&self) {}
}
