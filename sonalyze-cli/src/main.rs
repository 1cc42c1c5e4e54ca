mod render;

use clap::{ArgAction, Parser, Subcommand};
use sonalyze_api::{ApiClient, ClientConfig, TokenStore};
use sonalyze_core::validate::mime_from_filename;
use sonalyze_core::{AudioId, Dashboard, DashboardApi, DashboardError, Locale, UploadFile};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sonalyze", about = "Manage audio uploads and their analysis results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API token (overrides the stored token and SONALYZE_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Backend base URL (overrides SONALYZE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Message language: pt or en
    #[arg(long, global = true, default_value = "pt")]
    lang: String,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of uploads
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = sonalyze_core::DEFAULT_PAGE_SIZE)]
        per_page: u32,

        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show account statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Upload an audio file for analysis (max 10 MB)
    Upload {
        file: PathBuf,

        /// MIME type (guessed from the extension otherwise)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Delete an upload
    Delete {
        id: AudioId,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Queue an upload for analysis again
    Reanalyze { id: AudioId },
    /// Print the transcription of an upload
    Transcript { id: AudioId },
    /// Save the transcription PDF
    Pdf {
        id: AudioId,

        /// Output path (default: transcription-<id>.pdf)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Save the stored audio file
    Download {
        id: AudioId,

        /// Output path (default: audio-<id>)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Draw the frequency spectrum of an upload
    Spectrum {
        id: AudioId,

        /// Page of the uploads list the record is on
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Manage the stored API token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Store a token for later runs
    Set { token: String },
    /// Remove the stored token
    Clear,
    /// Show where the token is stored and whether one is set
    Show,
}

fn exit_with(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

/// Localized banner text when the dashboard recorded one, else the raw error.
fn report<A: DashboardApi>(dash: &Dashboard<A>, err: DashboardError) -> ! {
    match dash.state().error.as_deref() {
        Some(msg) => {
            tracing::debug!("{err}");
            exit_with(msg)
        }
        None => exit_with(err),
    }
}

fn confirm(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush().ok();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}

fn write_file(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes)
        .unwrap_or_else(|e| exit_with(format!("Failed to write {}: {e}", path.display())));
    eprintln!(
        "Wrote {} ({:.1} MB)",
        path.display(),
        bytes.len() as f64 / 1_048_576.0
    );
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn connect(base_url: Option<&str>, token: Option<&str>, store: Option<&TokenStore>) -> ApiClient {
    let config = ClientConfig::resolve(base_url, token, store).unwrap_or_else(|e| exit_with(e));
    tracing::debug!("using backend at {}", config.base_url);
    ApiClient::new(&config.base_url, config.token)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let locale = Locale::from_tag(&cli.lang)
        .unwrap_or_else(|| exit_with(format!("Unknown language '{}'. Use pt or en", cli.lang)));
    let store = TokenStore::default_location();
    let client = || connect(cli.base_url.as_deref(), cli.token.as_deref(), store.as_ref());

    match &cli.command {
        Commands::List { page, per_page, json } => {
            let mut dash = Dashboard::new(client(), locale).starting_at(*page, *per_page);
            if let Err(e) = dash.refresh_uploads().await {
                report(&dash, e);
            }
            let state = dash.state();
            if *json {
                let out = serde_json::to_string_pretty(&state.uploads)
                    .unwrap_or_else(|e| exit_with(e));
                println!("{out}");
            } else {
                print!(
                    "{}",
                    render::uploads_table(&state.uploads, state.current_page, state.total_pages, locale)
                );
            }
        }

        Commands::Stats { json } => {
            // the dashboard only logs statistics failures, so ask directly
            let stats = client().fetch_stats().await.unwrap_or_else(|e| exit_with(e));
            if *json {
                let out = serde_json::to_string_pretty(&stats).unwrap_or_else(|e| exit_with(e));
                println!("{out}");
            } else {
                println!("{}", render::stats_summary(&stats));
            }
        }

        Commands::Upload { file, mime } => {
            let bytes = tokio::fs::read(file)
                .await
                .unwrap_or_else(|e| exit_with(format!("Failed to read {}: {e}", file.display())));
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "audio".to_string());
            let mime = mime
                .clone()
                .or_else(|| mime_from_filename(&name).map(str::to_string))
                .unwrap_or_else(|| "application/octet-stream".to_string());

            eprintln!("Uploading {name} ({mime})...");
            let mut dash = Dashboard::new(client(), locale);
            match dash.upload(&UploadFile::new(name, mime, bytes)).await {
                Ok(id) => {
                    if let Some(audio) = dash.state().upload(id) {
                        println!("{}", render::upload_row(audio, locale));
                    }
                    if let Some(stats) = &dash.state().stats {
                        eprintln!("{} uploads in total", stats.total_uploads);
                    }
                }
                Err(e) => report(&dash, e),
            }
        }

        Commands::Delete { id, yes } => {
            let mut dash = Dashboard::new(client(), locale);
            match dash.delete(*id, |prompt| *yes || confirm(prompt)).await {
                Ok(()) => eprintln!("Deleted #{id}"),
                Err(DashboardError::Cancelled) => eprintln!("Cancelled"),
                Err(e) => report(&dash, e),
            }
        }

        Commands::Reanalyze { id } => {
            let mut dash = Dashboard::new(client(), locale);
            match dash.reanalyze(*id).await {
                Ok(()) => eprintln!("#{id} queued for analysis"),
                Err(e) => report(&dash, e),
            }
        }

        Commands::Transcript { id } => {
            let mut dash = Dashboard::new(client(), locale);
            let shown = dash
                .toggle_transcription(*id)
                .await
                .map(|t| t.map(str::to_string));
            match shown {
                Ok(Some(text)) => println!("{text}"),
                Ok(None) => {}
                Err(e) => report(&dash, e),
            }
        }

        Commands::Pdf { id, out } => {
            let bytes = client()
                .transcription_pdf(*id)
                .await
                .unwrap_or_else(|e| exit_with(e));
            let path = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("transcription-{id}.pdf")));
            write_file(&path, &bytes);
        }

        Commands::Download { id, out } => {
            let bytes = client()
                .download_audio(*id)
                .await
                .unwrap_or_else(|e| exit_with(e));
            let path = out.clone().unwrap_or_else(|| PathBuf::from(format!("audio-{id}")));
            write_file(&path, &bytes);
        }

        Commands::Spectrum { id, page } => {
            let mut dash = Dashboard::new(client(), locale)
                .starting_at(*page, sonalyze_core::DEFAULT_PAGE_SIZE);
            if let Err(e) = dash.refresh_uploads().await {
                report(&dash, e);
            }
            let Some(audio) = dash.state().upload(*id) else {
                exit_with(format!("#{id} is not on page {page}"));
            };
            if audio.frequency_spectrum.is_none() {
                exit_with(format!("#{id} has no frequency spectrum yet"));
            }
            let points = dash.state().spectrum_points(*id);
            println!("{}", render::spectrum_chart(&points));
        }

        Commands::Token { action } => {
            let store = store
                .as_ref()
                .unwrap_or_else(|| exit_with("Could not determine config directory"));
            match action {
                TokenAction::Set { token } => {
                    store.save(token).unwrap_or_else(|e| exit_with(e));
                    eprintln!("Token saved to {}", store.path().display());
                }
                TokenAction::Clear => {
                    store.clear().unwrap_or_else(|e| exit_with(e));
                    eprintln!("Token removed");
                }
                TokenAction::Show => {
                    let state = if store.load().is_some() { "set" } else { "not set" };
                    println!("{} ({state})", store.path().display());
                }
            }
        }
    }
}
