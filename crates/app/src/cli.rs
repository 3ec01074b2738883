use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quiz_core::model::FolderId;
use storage::repository::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};

#[derive(Parser, Debug)]
#[command(name = "quiz")]
#[command(version, about = "Quiz console: admin, PDF export and quiz taking", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the hosted REST backend. Local SQLite is used when absent.
    #[arg(long, env = "QUIZ_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Public API key sent with every backend request.
    #[arg(long, env = "QUIZ_ANON_KEY", global = true, hide_env_values = true)]
    pub anon_key: Option<String>,

    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = "sqlite:quiz.sqlite3", global = true)]
    pub db_url: String,

    #[arg(long, env = "QUIZ_SESSION_FILE", value_name = "FILE", default_value = "quiz-session.json", global = true)]
    pub session_file: PathBuf,

    /// Admin login accepted by the local backend.
    #[arg(long, env = "QUIZ_ADMIN_EMAIL", default_value = DEFAULT_ADMIN_EMAIL, global = true)]
    pub admin_email: String,

    #[arg(long, env = "QUIZ_ADMIN_PASSWORD", default_value = DEFAULT_ADMIN_PASSWORD, hide_env_values = true, global = true)]
    pub admin_password: String,

    /// Questions drawn per quiz.
    #[arg(long, env = "QUIZ_SAMPLE_SIZE", default_value_t = 10, global = true)]
    pub sample_size: u32,

    #[arg(long, env = "QUIZ_AUTO_ADVANCE_SECS", default_value_t = 3, global = true)]
    pub auto_advance_secs: u32,

    /// Default log filter; `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the desktop app.
    Ui,
    /// Fill the configured backend with demo content.
    Seed,
    /// Write a folder's question sheet to a PDF file.
    Export {
        folder_id: FolderId,
        /// Output path; defaults to the generated file name in the working directory.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Leave out the answer key.
        #[arg(long)]
        no_answers: bool,
        #[arg(long)]
        only_active: bool,
    },
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Ui)
    }
}
