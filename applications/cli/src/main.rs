//! Melody - terminal music player

use clap::{Parser, Subcommand};
use melody_cli::{load_catalog, player::run_interactive, render, MelodyConfig};
use melody_client::{AuthSession, FileTokenStore, MelodyClient, UserCreate};
use melody_playback::{BootstrapParams, PlaybackState, PlayerHost};
use std::{path::PathBuf, sync::Arc};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melody")]
#[command(about = "Melody Player in the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MELODY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the player on a track
    Play {
        /// Track id
        track_id: String,
        /// List the track was picked from (e.g. recentlyPlayed)
        #[arg(short, long)]
        list: Option<String>,
        /// Resume position in seconds
        #[arg(long)]
        at: Option<String>,
        /// Start playing immediately
        #[arg(long)]
        playing: bool,
    },
    /// Show the catalog lists
    Lists,
    /// Log in to the backend
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "MELODY_PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "MELODY_PASSWORD")]
        password: String,
    },
    /// Show the logged in user
    Whoami,
    /// Forget the stored token
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = MelodyConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    config.validate()?;

    match cli.command {
        Commands::Play {
            track_id,
            list,
            at,
            playing,
        } => play(&config, track_id, list, at, playing).await?,
        Commands::Lists => lists(&config)?,
        Commands::Login { username, password } => login(&config, &username, &password).await?,
        Commands::Signup {
            username,
            email,
            password,
        } => signup(&config, UserCreate::new(username, email, password)).await?,
        Commands::Whoami => whoami(&config).await?,
        Commands::Logout => logout(&config).await?,
    }

    Ok(())
}

async fn play(
    config: &MelodyConfig,
    track_id: String,
    list: Option<String>,
    at: Option<String>,
    playing: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;

    let mut params = BootstrapParams::new(track_id).with_resume_playing(playing);
    params.list_type = list;
    params.resume_seconds = at;

    let host = PlayerHost::open(&catalog, &params, &config.playback_config());
    if host.snapshot().state == PlaybackState::Failed {
        let snapshot = host.close();
        anyhow::bail!(render::render_snapshot(&snapshot));
    }

    println!("{}", host.snapshot().playing_from());
    let last = run_interactive(host, BufReader::new(tokio::io::stdin())).await;
    tracing::info!(
        elapsed = %last.elapsed_display(),
        index = last.current_index,
        "Left player"
    );
    Ok(())
}

fn lists(config: &MelodyConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    print!("{}", render::render_lists(&catalog.lists()));
    Ok(())
}

fn auth_session(config: &MelodyConfig) -> anyhow::Result<AuthSession> {
    let client = MelodyClient::new(&config.api_config())?;
    let store = Arc::new(FileTokenStore::new(config.auth.token_path.clone()));
    Ok(AuthSession::new(client, store))
}

async fn login(config: &MelodyConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let session = auth_session(config)?;
    let user = session.login(username, password).await?;
    println!("Logged in as {} <{}>", user.username, user.email);
    Ok(())
}

async fn signup(config: &MelodyConfig, user: UserCreate) -> anyhow::Result<()> {
    let session = auth_session(config)?;
    let created = session.signup(&user).await?;
    println!(
        "Account {} created (id {}). Log in with `melody login`.",
        created.username, created.id
    );
    Ok(())
}

async fn whoami(config: &MelodyConfig) -> anyhow::Result<()> {
    let session = auth_session(config)?;
    session.restore().await;
    let user = session.require_user().await?;
    println!("{} <{}> (id {}, since {})", user.username, user.email, user.id, user.created_at);
    Ok(())
}

async fn logout(config: &MelodyConfig) -> anyhow::Result<()> {
    auth_session(config)?.logout().await;
    println!("Logged out");
    Ok(())
}
