use color_eyre::eyre::{Result, WrapErr};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};

use crate::ports::terminal::{Choice, Prompter};

/// Terminal prompts backed by dialoguer.
///
/// dialoguer blocks on stdin, so every prompt runs on the blocking pool.
/// Esc or `q` aborts a prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

fn item(choice: &Choice) -> String {
    if choice.subtitle.is_empty() {
        choice.title.clone()
    } else {
        format!("{} ({})", choice.title, choice.subtitle)
    }
}

fn items(choices: &[Choice]) -> Vec<String> {
    choices.iter().map(item).collect()
}

#[async_trait::async_trait]
impl Prompter for DialoguerPrompter {
    async fn multi_select(&self, message: &str, choices: &[Choice]) -> Result<Option<Vec<usize>>> {
        let message = message.to_string();
        let items = items(choices);

        tokio::task::spawn_blocking(move || {
            MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .items(&items)
                .interact_opt()
        })
        .await
        .wrap_err("Prompt task panicked")?
        .wrap_err("Failed to read selection")
    }

    async fn select(&self, message: &str, choices: &[Choice]) -> Result<Option<usize>> {
        let message = message.to_string();
        let items = items(choices);

        tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .items(&items)
                .default(0)
                .interact_opt()
        })
        .await
        .wrap_err("Prompt task panicked")?
        .wrap_err("Failed to read selection")
    }
}
