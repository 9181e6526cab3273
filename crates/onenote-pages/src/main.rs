use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use onenote_pages::auth::{InteractiveTokenSource, StaticToken, TokenSource};
use onenote_pages::config::Config;
use onenote_pages::dates::{
    consecutive_days, consecutive_days_lenient, parse_day_count, parse_start_date,
};
use onenote_pages::{OneNoteClient, PageOutcome};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "onenote-pages")]
#[command(about = "Create blank dated pages in a OneNote section")]
#[command(
    long_about = "Signs in to Microsoft Graph and creates one blank page per title in a\n\
    OneNote section. Titles default to consecutive dates such as\n\
    \"2024-Apr-08 - Monday\".\n\n\
    Page creation stops at the first page the service rejects."
)]
struct Cli {
    /// Path to the YAML configuration file.
    ///
    /// Must contain `client_id`; may also set `notebook`, `section`
    /// or a fixed `section_id`.
    #[arg(short, long, default_value = "config.yaml", env = "ONENOTE_CONFIG")]
    config: PathBuf,

    /// Bearer token to use instead of the interactive sign-in.
    #[arg(long, env = "ONENOTE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dated titles that create-pages would use
    ///
    /// Does not sign in or touch the network.
    Days {
        /// First day, e.g. 2024-Apr-08. Defaults to today.
        #[arg(short, long, default_value = "", value_name = "YYYY-Mon-DD")]
        start: String,

        /// Number of consecutive days.
        #[arg(short = 'n', long, default_value = "7", allow_hyphen_values = true)]
        days: String,
    },

    /// List notebook names and ids
    Notebooks,

    /// List the sections of a notebook
    Sections {
        /// Notebook display name (exact, case-sensitive).
        notebook: String,
    },

    /// List every section in the account
    AllSections,

    /// Create one blank page per title
    ///
    /// The target section is taken from --section-id, then from
    /// --notebook/--section, then from the config file's notebook/section,
    /// then from its legacy section_id.
    CreatePages {
        /// Notebook holding the target section.
        #[arg(long, value_name = "NAME")]
        notebook: Option<String>,

        /// Section to create pages in.
        #[arg(long, value_name = "NAME")]
        section: Option<String>,

        /// Section id, skipping name lookup.
        #[arg(long, value_name = "ID", conflicts_with_all = ["notebook", "section"])]
        section_id: Option<String>,

        /// First day, e.g. 2024-Apr-08. Defaults to today.
        #[arg(short, long, default_value = "", value_name = "YYYY-Mon-DD")]
        start: String,

        /// Number of consecutive days.
        #[arg(short = 'n', long, default_value = "7", allow_hyphen_values = true)]
        days: String,

        /// Explicit page title; repeat for several. Replaces the dated titles.
        #[arg(short, long = "title", value_name = "TEXT")]
        titles: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install crypto provider"))?;
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Days { start, days } => {
            for title in consecutive_days_lenient(&start, &days) {
                println!("{}", title);
            }
        }
        Commands::Notebooks => {
            let (_, client) = connect(&cli.config, cli.access_token).await?;
            let notebooks = client.list_notebooks().await?;
            if notebooks.is_empty() {
                println!("No notebooks found.");
            }
            for notebook in notebooks {
                println!("{} [{}]", notebook.display_name, notebook.id);
            }
        }
        Commands::Sections { notebook } => {
            let (_, client) = connect(&cli.config, cli.access_token).await?;
            let notebook_id = client.find_notebook_id(&notebook).await?;
            let sections = client.list_sections(&notebook_id).await?;
            if sections.is_empty() {
                println!("No sections found in {}.", notebook);
            }
            for section in sections {
                println!("{} [{}]", section.display_name, section.id);
            }
        }
        Commands::AllSections => {
            let (_, client) = connect(&cli.config, cli.access_token).await?;
            for section in client.list_all_sections().await? {
                println!("{} [{}]", section.display_name, section.id);
            }
        }
        Commands::CreatePages {
            notebook,
            section,
            section_id,
            start,
            days,
            titles,
        } => {
            let titles = if titles.is_empty() {
                let start = parse_start_date(&start)?;
                let count = parse_day_count(&days)?;
                consecutive_days(start, count)?
            } else {
                titles
            };

            if titles.is_empty() {
                println!("No page titles to create.");
                return Ok(());
            }

            let (config, client) = connect(&cli.config, cli.access_token).await?;
            let section_id = match section_id {
                Some(id) => id,
                None => {
                    let target = Target {
                        notebook: notebook.or_else(|| config.notebook.clone()),
                        section: section.or_else(|| config.section.clone()),
                        legacy_section_id: config.section_id.clone(),
                    };
                    resolve_section(&client, target).await?
                }
            };

            create_pages(&client, &section_id, &titles).await?;
        }
    }

    Ok(())
}

/// Load the config and sign in. Both failures end the run.
async fn connect(
    config_path: &Path,
    access_token: Option<String>,
) -> Result<(Config, OneNoteClient)> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let source: Box<dyn TokenSource> = match access_token {
        Some(token) => Box::new(StaticToken::new(token)),
        None => Box::new(InteractiveTokenSource::from_config(&config)),
    };

    let client = OneNoteClient::authenticate(&config.graph_settings(), source.as_ref()).await?;
    Ok((config, client))
}

struct Target {
    notebook: Option<String>,
    section: Option<String>,
    legacy_section_id: Option<String>,
}

async fn resolve_section(client: &OneNoteClient, target: Target) -> Result<String> {
    match (target.notebook, target.section) {
        (Some(notebook), Some(section)) => Ok(client.find_section_id(&notebook, &section).await?),
        (None, None) => target.legacy_section_id.context(
            "No target section: pass --notebook and --section, --section-id, \
             or set section_id in the config",
        ),
        _ => bail!("Notebook and section names must be given together"),
    }
}

async fn create_pages(client: &OneNoteClient, section_id: &str, titles: &[String]) -> Result<()> {
    let results = client.create_pages(section_id, titles).await;

    for result in &results {
        match &result.outcome {
            PageOutcome::Created => {
                println!("Page with title \"{}\" created successfully.", result.title);
            }
            PageOutcome::Failed { status, body } => {
                eprintln!("ERROR! - Could not create page with title \"{}\".", result.title);
                match status {
                    Some(code) => eprintln!("{}", code),
                    None => eprintln!("no response"),
                }
                eprintln!("{}", body);
            }
        }
    }

    let created = results.iter().filter(|r| r.is_created()).count();
    if created < titles.len() {
        bail!(
            "Stopped after {} of {} pages; {} not attempted",
            created,
            titles.len(),
            titles.len() - results.len()
        );
    }

    Ok(())
}
