mod config;
mod graphql;
mod http;
mod render;
mod session;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use products_hr::{Dashboard, ExperienceBand, Intent, SortKey};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
    session::SessionRegistry,
};

#[derive(Parser, Debug)]
#[command(name = "hr-dashboard", version, about = "Employee records dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path (stdout when omitted)")]
        output: Option<PathBuf>,
    },
    /// Write one page of the seed roster as CSV.
    Export(ExportCommand),
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct ExportCommand {
    #[arg(long, help = "Exact department name")]
    department: Option<String>,
    #[arg(long, value_name = "BAND", help = "0-2, 3-5 or 6+")]
    experience: Option<ExperienceBand>,
    #[arg(long, value_name = "KEY", help = "name, experience or salary")]
    sort: Option<SortKey>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, value_name = "FILE", help = "Destination file path (stdout when omitted)")]
    output: Option<PathBuf>,
}

impl ExportCommand {
    fn intents(&self) -> Vec<Intent> {
        let mut intents = Vec::new();
        if let Some(department) = &self.department {
            intents.push(Intent::DepartmentChanged(Some(department.clone())));
        }
        if let Some(band) = self.experience {
            intents.push(Intent::ExperienceChanged(band));
        }
        if let Some(key) = self.sort {
            intents.push(Intent::SortChanged(key));
        }
        if let Some(search) = &self.search {
            intents.push(Intent::SearchChanged(search.clone()));
        }
        intents.push(Intent::PageChanged(self.page));
        intents
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::from_env("hr-dashboard"))?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    let result = match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::SchemaPrint { output } => schema_print(output, &app_config),
        Command::Export(cmd) => export(cmd, &app_config),
    };
    shutdown_tracing();
    result
}

fn registry(config: &AppConfig) -> Result<Arc<SessionRegistry>> {
    let seed = config.seed_store()?;
    Ok(Arc::new(SessionRegistry::new(seed, config.session_idle)))
}

fn write_output(path: Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "output written");
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn schema_print(path: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let schema = graphql::build_schema(registry(config)?);
    write_output(path, &schema.sdl())
}

fn export(cmd: ExportCommand, config: &AppConfig) -> Result<()> {
    let mut dashboard = Dashboard::new(config.seed_store()?);
    for intent in cmd.intents() {
        dashboard.apply(intent)?;
    }
    let page = dashboard.page();
    info!(
        filtered = page.filtered,
        page = page.page,
        total_pages = page.total_pages,
        "exporting page"
    );
    write_output(cmd.output, &dashboard.export_csv())
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let registry = registry(&config)?;
    info!(records = registry.seed().len(), "seed roster ready");
    let schema = graphql::build_schema(registry.clone());
    let cookie_key = config.cookie_key();
    let state = AppState {
        registry,
        schema,
        config,
        cookie_key,
    };
    http::serve(cmd.into(), state).await
}
