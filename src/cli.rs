//! Command-line arguments.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use starred_config::{Config, PublishTarget};
use starred_github::MAX_CONCURRENCY;

/// Creating your own awesome list from your GitHub stars.
///
/// Example: starred --username octocat --sort > README.md
#[derive(Parser, Debug)]
#[command(name = "starred", version, about, disable_version_flag = true)]
pub struct Cli {
    /// GitHub user whose starred repositories are listed
    #[arg(short, long)]
    pub username: Option<String>,

    /// GitHub token, required for publishing
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository to publish the list to (`repo` or `owner/repo`)
    #[arg(short, long, value_name = "REPO")]
    pub repository: Option<String>,

    /// Commit message used when publishing
    #[arg(short, long)]
    pub message: Option<String>,

    /// Group repositories by language
    #[arg(short, long)]
    pub sort: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of pages fetched in parallel
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(1..=MAX_CONCURRENCY as i64)
    )]
    pub concurrency: Option<u8>,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    /// Loads the configuration file and environment, then applies the flags
    /// on top.
    pub async fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::load().await.context("failed to load config")?,
        };
        self.apply(config.with_env())
    }

    /// Overrides `config` with the flags that were given.
    pub fn apply(&self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(username) = &self.username {
            config.username = Some(username.clone());
        }
        if let Some(repository) = &self.repository {
            let target = PublishTarget::parse(repository)
                .with_context(|| format!("invalid --repository '{repository}'"))?;
            config.target = Some(target);
        }
        if let Some(message) = &self.message {
            config.message = message.clone();
        }
        if self.sort {
            config.sort = true;
        }
        if let Some(concurrency) = self.concurrency {
            config.fetch.concurrency = usize::from(concurrency);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("starred").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&["-u", "octocat", "-r", "org/stars", "-m", "refresh", "-s"]);
        let config = Config {
            username: Some("from-file".to_string()),
            ..Default::default()
        };

        let config = cli.apply(config).unwrap();
        assert_eq!(config.username.as_deref(), Some("octocat"));
        assert_eq!(config.target, Some(PublishTarget::new("org", "stars")));
        assert_eq!(config.message, "refresh");
        assert!(config.sort);
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = parse(&[]);
        let config = Config {
            username: Some("from-file".to_string()),
            sort: true,
            ..Default::default()
        };

        let applied = cli.apply(config.clone()).unwrap();
        assert_eq!(applied, config);
    }

    #[test]
    fn concurrency_is_range_checked() {
        assert_eq!(parse(&["--concurrency", "12"]).concurrency, Some(12));
        assert!(Cli::try_parse_from(["starred", "--concurrency", "0"]).is_err());
        assert!(Cli::try_parse_from(["starred", "--concurrency", "91"]).is_err());
    }

    #[test]
    fn invalid_repository_is_rejected() {
        let cli = parse(&["-r", "a/b/c"]);
        assert!(cli.apply(Config::default()).is_err());
    }

    #[test]
    fn short_v_prints_version() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["starred", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
