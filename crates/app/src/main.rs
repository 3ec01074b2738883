mod cli;
mod seed;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use env_logger::Env;
use quiz_core::model::QuizSettings;
use services::{
    AppServices, AuthService, CategoryService, Clock, ExportOptions, ExportService, FolderService,
    QuestionService, QuizService,
};
use storage::auth::{FileSessionStore, SessionStore, StaticAuth};
use storage::remote::RemoteConfig;
use storage::repository::Storage;
use ui::{App, UiApp, build_app_context};

use crate::cli::{Cli, Command};

#[derive(Debug)]
enum ConfigError {
    MissingAnonKey,
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingAnonKey => write!(f, "--anon-key is required with --backend-url"),
            ConfigError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ConfigError {}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn folders(&self) -> Arc<FolderService> {
        self.services.folders()
    }

    fn categories(&self) -> Arc<CategoryService> {
        self.services.categories()
    }

    fn questions(&self) -> Arc<QuestionService> {
        self.services.questions()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn export(&self) -> Arc<ExportService> {
        self.services.export()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || ConfigError::InvalidDbUrl {
        raw: db_url.to_owned(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid().into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

async fn build_services(cli: &Cli) -> Result<AppServices, Box<dyn std::error::Error>> {
    let settings = QuizSettings::new(cli.sample_size, cli.auto_advance_secs)?;
    let session_store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&cli.session_file));
    let clock = Clock::default();

    if let Some(base_url) = cli.backend_url.as_deref() {
        let anon_key = cli.anon_key.as_deref().ok_or(ConfigError::MissingAnonKey)?;
        let config = RemoteConfig::new(base_url, anon_key)?;
        log::info!("using remote backend at {base_url}");
        return Ok(AppServices::new_remote(&config, clock, settings, session_store)?);
    }

    let db_url = normalize_sqlite_url(&cli.db_url);
    prepare_sqlite_file(&db_url)?;
    let auth = StaticAuth::new(cli.admin_email.clone(), cli.admin_password.clone());
    let storage = Storage::sqlite(&db_url).await?.with_auth(Arc::new(auth));
    log::info!("using local database {db_url}");
    Ok(AppServices::from_storage(storage, clock, settings, session_store))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    let services = build_services(&cli).await?;
    if let Err(err) = services.auth().restore().await {
        log::warn!("could not restore admin session: {err}");
    }

    match cli.command() {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // tao may default to always-on-top in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            if !services.auth().is_signed_in() {
                services
                    .auth()
                    .sign_in(&cli.admin_email, &cli.admin_password)
                    .await?;
            }
            let report = seed::seed_demo(&services).await?;
            log::info!(
                "seed: created {} folders, {} categories, {} questions",
                report.folders,
                report.categories,
                report.questions
            );
            Ok(())
        }
        Command::Export {
            folder_id,
            out,
            no_answers,
            only_active,
        } => {
            let options = ExportOptions {
                include_answers: !no_answers,
                only_active,
            };
            let pdf = services.export().export_folder(folder_id, options).await?;
            let path = out.unwrap_or_else(|| PathBuf::from(&pdf.file_name));
            std::fs::write(&path, &pdf.bytes)?;
            log::info!("wrote {} ({} bytes)", path.display(), pdf.bytes.len());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls_are_made_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/q.db"), "sqlite:///tmp/q.db");
        assert_eq!(normalize_sqlite_url("sqlite:/tmp/q.db"), "sqlite:///tmp/q.db");
        let relative = normalize_sqlite_url("sqlite:quiz.sqlite3");
        assert!(relative.starts_with("sqlite:///"), "{relative}");
        assert!(relative.ends_with("/quiz.sqlite3"), "{relative}");
    }

    #[test]
    fn prepare_rejects_non_file_urls() {
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
        assert!(prepare_sqlite_file("postgres://db").is_err());
        assert!(prepare_sqlite_file("sqlite://").is_err());
    }
}
