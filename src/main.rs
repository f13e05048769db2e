//! starred - creating your own awesome list from your GitHub stars.
//!
//! This is the main binary: it fetches the starred repositories of a user,
//! renders them as Markdown and either prints the document or publishes it
//! to a repository.

mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use secrecy::SecretString;
use starred_config::auth::resolve_token;
use starred_github::{FetchOptions, FileChange, GitHubClient};
use starred_protocol::Catalog;
use starred_render::{RenderOptions, render};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.load_config().await?;

    let username = config
        .username
        .clone()
        .context("no username given; pass --username or set STARRED_USERNAME")?;

    let token = resolve_token(cli.token.as_deref(), config.github_token.as_deref()).await;
    if config.is_publishing() && token.is_none() {
        bail!("publishing requires a GitHub token; pass --token or set GITHUB_TOKEN");
    }

    let client = GitHubClient::new(token.map(SecretString::from))
        .await
        .context("failed to create GitHub client")?;
    client.validate_token().await.map_err(explain)?;

    let options = FetchOptions {
        concurrency: config.fetch.concurrency,
        per_page: config.fetch.per_page,
    };
    let repositories = client
        .fetch_all_starred(&username, &options)
        .await
        .map_err(explain)?;
    info!(count = repositories.len(), user = %username, "fetched starred repositories");

    let catalog = Catalog::new(repositories);
    let render_options = RenderOptions::new(username.as_str())
        .sorted(config.sort)
        .with_header(config.template.header.clone())
        .with_footer(config.template.footer.clone());
    let document = render(&catalog, &render_options);

    let Some(target) = &config.target else {
        print!("{document}");
        return Ok(());
    };

    let owner = target.owner_or(&username);
    let outcome = client
        .publish(owner, target.repo(), target.path(), &config.message, &document)
        .await
        .map_err(explain)?;
    let action = match outcome.file {
        FileChange::Created => "created",
        FileChange::Updated => "updated",
    };
    info!(
        repository = %target.full_name(&username),
        path = target.path(),
        repository_created = outcome.repository_created,
        "{action} starred list"
    );

    Ok(())
}

/// Installs a stderr subscriber; stdout carries the rendered document.
fn init_tracing() {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("starred=info,starred_github=info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Attaches a hint about what the user should check.
fn explain(error: starred_github::Error) -> anyhow::Error {
    let hint = if error.is_auth() {
        "GitHub rejected the credentials; check that your token is valid"
    } else {
        "GitHub request failed; check your network connection and try again"
    };
    anyhow::Error::new(error).context(hint)
}
