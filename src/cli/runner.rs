//! CLI runner - executes commands

use crate::api::{ContextClient, ListQuery, SearchQuery};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::Credentials;
use futures::{Stream, StreamExt};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = ContextClient::new(self.build_config()?)?;

        match &self.cli.command {
            Commands::Translations { text } => {
                let translations = client.get_translations(&self.search(text)).await?;
                self.output(&translations)
            }
            Commands::Samples {
                text,
                target_text,
                no_cleanup,
                limit,
            } => {
                let mut query = self.search(text).cleanup(!no_cleanup);
                if let Some(target_text) = target_text {
                    query = query.target_text(target_text);
                }
                self.drain(client.get_translation_samples(&query), *limit)
                    .await
            }
            Commands::Suggestions {
                text,
                fuzzy,
                no_cleanup,
            } => {
                let query = self.search(text).fuzzy(*fuzzy).cleanup(!no_cleanup);
                let suggestions = client.get_search_suggestions(&query).await?;
                self.output(&suggestions)
            }
            Commands::Favorites { no_cleanup, limit } => {
                let query = self.list().cleanup(!no_cleanup);
                self.drain(client.get_favorites(&query), *limit).await
            }
            Commands::History { limit } => {
                self.drain(client.get_history(&self.list()), *limit).await
            }
            Commands::Login => {
                client.login().await?;
                let email = client
                    .config()
                    .credentials
                    .as_ref()
                    .map(|c| c.email.clone());
                self.output(&json!({ "status": "logged_in", "email": email }))
            }
        }
    }

    /// Layer the command-line flags over the config file (or defaults)
    pub fn build_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(source) = &self.cli.source {
            config.source_lang.clone_from(source);
        }
        if let Some(target) = &self.cli.target {
            config.target_lang.clone_from(target);
        }
        if let Some(agent) = &self.cli.user_agent {
            config.user_agent.clone_from(agent);
        }

        match (&self.cli.email, &self.cli.password) {
            (Some(email), Some(password)) => {
                config.credentials = Some(Credentials::new(email, password));
            }
            (None, None) => {}
            _ => {
                return Err(Error::config(
                    "--email and --password must be given together",
                ))
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Search query; languages come from the config
    fn search(&self, text: &str) -> SearchQuery {
        SearchQuery::new(text)
    }

    fn list(&self) -> ListQuery {
        ListQuery::new()
    }

    /// Print every entry of a stream, stopping after `limit` entries
    async fn drain<S, T>(&self, stream: S, limit: Option<usize>) -> Result<()>
    where
        S: Stream<Item = Result<T>>,
        T: Serialize,
    {
        let mut stream = Box::pin(stream.take(limit.unwrap_or(usize::MAX)));
        let mut count = 0usize;
        while let Some(entry) = stream.next().await {
            self.output(&entry?)?;
            count += 1;
        }
        debug!("Printed {count} entries");
        Ok(())
    }

    /// Output a value
    fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{line}");
        Ok(())
    }
}
