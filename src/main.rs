use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use usuarios::api::{self, UsuariosClient};
use usuarios::config::{self, Settings, DEFAULT_HOST, DEFAULT_PORT};
use usuarios::directory::{DeleteOutcome, SubmitOutcome, UserDirectoryController};
use usuarios::models::{DraftField, UserId};
use usuarios::notify::{AutoConfirm, TerminalConfirm, TerminalNotifier};
use usuarios::render::{render_draft, render_records};
use usuarios::web::{build_app, AppState};

type CliController = UserDirectoryController<UsuariosClient, TerminalNotifier>;

#[derive(Parser)]
#[command(
    name = "usuarios",
    author,
    version,
    about = "Manage the people registered in a user directory backend",
    long_about = r#"usuarios: create, edit, list and delete user records held by a REST backend.

The backend is reached at API_BASE_URL (default http://localhost:8081) under /api/usuarios.
Run without a subcommand to serve the web screen.

Examples:
  1) Serve the screen:
      usuarios serve --host 127.0.0.1 --port 8080
  2) Work from the terminal:
      usuarios list
      usuarios add "Ana Gomez" ana@x.com 5551234
      usuarios edit 1 --phone 5550000
      usuarios delete 1
"#,
    after_help = "Use `usuarios <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Backend base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Keep the form values when a save fails and report connection errors
    #[arg(long, global = true)]
    strict: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web screen
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    #[command(about = "List users", long_about = "Fetch the full collection from the backend and print it as a table.")]
    List,
    #[command(about = "Create a user", long_about = "Fill a new form with the given values and submit it. All three values are required.")]
    Add {
        full_name: String,
        email: String,
        phone: String,
    },
    #[command(about = "Edit a user", long_about = "Load the user from the backend, replace the given fields and submit the update.")]
    Edit {
        id: i64,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    #[command(about = "Delete a user", long_about = "Delete a user after confirmation. Use --yes to skip the prompt.")]
    Delete {
        id: i64,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Print the resolved configuration and fetch the user list once to verify the backend answers.")]
    CheckConfig,
}

fn print_records(controller: &CliController) {
    println!("\n{}\n", render_records(controller.records()));
}

fn exit_unless_saved(outcome: SubmitOutcome) {
    if outcome != SubmitOutcome::Saved {
        process::exit(1);
    }
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = build_app(state);
    tracing::info!(%addr, "Starting user directory screen");
    println!(
        "{} {}",
        yansi::Paint::new("Web server running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new(
                    "Please stop any process using this port, or start the server with a different --port value."
                )
                .yellow()
            );
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());
    let settings = Settings::from_env().with_overrides(cli.api_url.as_deref(), cli.strict);

    let http = match api::build_http_client(settings.request_timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new("Failed to create HTTP client").red(), e);
            process::exit(1);
        }
    };
    let backend = UsuariosClient::new(http, settings.api_base_url.clone());

    let command = cli.command.unwrap_or(Commands::Serve {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
    });

    if let Commands::Serve { host, port } = command {
        start_server(AppState::new(backend, settings.error_policy), &host, port).await;
        return;
    }

    let mut controller =
        UserDirectoryController::new(backend, TerminalNotifier).with_policy(settings.error_policy);

    match command {
        // Served above.
        Commands::Serve { .. } => {}
        Commands::List => {
            controller.refresh().await;
            print_records(&controller);
        }
        Commands::Add { full_name, email, phone } => {
            controller.update_draft_field(DraftField::FullName, full_name);
            controller.update_draft_field(DraftField::Email, email);
            controller.update_draft_field(DraftField::PhoneNumber, phone);
            let outcome = controller.submit_draft().await;
            print_records(&controller);
            exit_unless_saved(outcome);
        }
        Commands::Edit { id, full_name, email, phone } => {
            if let Err(e) = controller.try_refresh().await {
                eprintln!("{}: {}", yansi::Paint::new("Failed to load users").red(), e);
                process::exit(1);
            }
            if let Err(e) = controller.begin_edit_by_id(UserId(id)) {
                eprintln!("{}", yansi::Paint::new(e.to_string()).red());
                process::exit(1);
            }
            let overrides = [
                (DraftField::FullName, full_name),
                (DraftField::Email, email),
                (DraftField::PhoneNumber, phone),
            ];
            for (field, value) in overrides {
                if let Some(v) = value {
                    controller.update_draft_field(field, v);
                }
            }
            println!("{}", render_draft(controller.draft()));
            let outcome = controller.submit_draft().await;
            print_records(&controller);
            exit_unless_saved(outcome);
        }
        Commands::Delete { id, yes } => {
            let outcome = if yes {
                controller.request_delete(UserId(id), &mut AutoConfirm(true)).await
            } else {
                controller.request_delete(UserId(id), &mut TerminalConfirm).await
            };
            match outcome {
                DeleteOutcome::Declined => {
                    println!("{}", yansi::Paint::new("Nothing deleted").dim())
                }
                DeleteOutcome::Sent => print_records(&controller),
                DeleteOutcome::Unreachable => {
                    eprintln!("{}", yansi::Paint::new("Could not reach the backend").red());
                    process::exit(1);
                }
            }
        }
        Commands::CheckConfig => {
            println!("API base URL: {}", yansi::Paint::new(&settings.api_base_url).cyan());
            println!("Error policy: {:?}", settings.error_policy);
            println!("Request timeout: {}s", settings.request_timeout.as_secs());
            match controller.try_refresh().await {
                Ok(count) => {
                    let summary = format!("Configuration looks valid ({} users returned)", count);
                    println!("{}", yansi::Paint::new(summary).green());
                }
                Err(e) => {
                    let label = yansi::Paint::new("Configuration appears invalid").red();
                    eprintln!("{}: {}", label, e);
                    process::exit(1);
                }
            }
        }
    }
}
