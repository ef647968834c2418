use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::context::AppContext;
use crate::error::Result;
use crate::filter::{PriorityFilter, StatusTab};
use crate::logging::LogTarget;

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "IT ticketing dashboard for the terminal")]
#[command(version)]
pub struct Cli {
    /// Log at debug level (the HELPDESK_LOG env var takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run; the dashboard when none is given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Dashboard { input: None })
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Open the full-screen dashboard (default)
    #[command(visible_alias = "ui")]
    Dashboard {
        /// Read ticket rows from a JSON file instead of the sheet
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// List tickets
    Ls {
        /// Status tab: all, new, in-progress, resolved
        #[arg(short, long, default_value = "all", value_parser = parse_status_tab)]
        status: StatusTab,

        /// Priority: all, high, medium, low
        #[arg(short, long, default_value = "all", value_parser = parse_priority_filter)]
        priority: PriorityFilter,

        /// Only tickets from this company
        #[arg(short, long)]
        company: Option<String>,

        /// Case-insensitive search over title, description and id
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum number of tickets to print
        #[arg(long)]
        limit: Option<usize>,

        /// Read ticket rows from a JSON file instead of the sheet
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one ticket
    #[command(visible_alias = "s")]
    Show {
        /// Ticket ID (T-1004 or 1004)
        id: String,

        /// Read ticket rows from a JSON file instead of the sheet
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in and remember the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the stored session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the signed-in account
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send a message to IT support
    RequestHelp {
        /// Your email
        #[arg(short, long)]
        email: String,

        /// What you need help with
        #[arg(short, long)]
        message: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the staff identity roster
    Roster {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (sources.tickets_url, auth.api_key, ...)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the configuration file path
    Path {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Where this command's logs should go.
    pub fn log_target(&self) -> LogTarget {
        match self {
            Commands::Dashboard { .. } => LogTarget::File,
            _ => LogTarget::Stderr,
        }
    }

    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> Result<()> {
        use crate::commands::{
            LsOptions, cmd_config_path, cmd_config_set, cmd_config_show, cmd_dashboard, cmd_login,
            cmd_logout, cmd_ls, cmd_request_help, cmd_roster, cmd_show, cmd_whoami,
        };

        match self {
            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Path { json } => cmd_config_path(json),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }

            Commands::Dashboard { input } => cmd_dashboard(build_context(input)?).await,

            Commands::Ls {
                status,
                priority,
                company,
                query,
                limit,
                input,
                json,
            } => {
                let local_input = input.is_some();
                let ctx = build_context(input)?;
                let opts = LsOptions {
                    status,
                    priority,
                    company,
                    query,
                    limit,
                    local_input,
                    output_json: json,
                };
                cmd_ls(&ctx, opts).await
            }

            Commands::Show { id, input, json } => {
                let local_input = input.is_some();
                let ctx = build_context(input)?;
                cmd_show(&ctx, &id, local_input, json).await
            }

            Commands::Login {
                email,
                password,
                json,
            } => cmd_login(&AppContext::load()?, &email, password, json).await,
            Commands::Logout { json } => cmd_logout(&AppContext::load()?, json),
            Commands::Whoami { json } => cmd_whoami(&AppContext::load()?, json),

            Commands::RequestHelp {
                email,
                message,
                json,
            } => cmd_request_help(&AppContext::load()?, &email, &message, json).await,

            Commands::Roster { json } => cmd_roster(&AppContext::load()?, json).await,
        }
    }
}

fn build_context(input: Option<PathBuf>) -> Result<AppContext> {
    let ctx = AppContext::load()?;
    Ok(match input {
        Some(path) => ctx.with_ticket_file(path),
        None => ctx,
    })
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> std::result::Result<T, String>
where
    F: FnOnce(&str) -> std::result::Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_status_tab(s: &str) -> std::result::Result<StatusTab, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "status",
        &["all", "new", "in-progress", "resolved"],
    )
}

fn parse_priority_filter(s: &str) -> std::result::Result<PriorityFilter, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        &["all", "high", "medium", "low"],
    )
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = <Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "helpdesk", &mut io::stdout());
}
