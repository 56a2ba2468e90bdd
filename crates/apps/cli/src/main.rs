use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use catalog::{load_or_fallback, parse_directory, CatalogError, LoadedCatalog, REST_COUNTRIES_URL};
use clap::{Parser, Subcommand};
use explore::{parse_questions, Quiz, Session};
use reqwest::Client;
use scene::{orientation_facing, Orientation};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{run_quiz, write_result, write_search, TerminalView};

#[derive(Parser, Debug)]
#[command(author, version, about = "Country explorer: data, search, info and quiz")]
struct Args {
    /// Country directory URL (default: COUNTRIES_URL or the REST Countries API)
    #[arg(long)]
    url: Option<String>,

    /// Read the directory from a saved JSON file instead of the network
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the raw directory JSON
    Fetch {
        #[arg(long, default_value = "countries.json")]
        out: PathBuf,
    },

    /// List loaded countries with their capital coordinates
    List,

    /// Search country names
    Search { query: String },

    /// Show a country's details
    Info { country: String },

    /// Play the quiz on the terminal
    Quiz {
        /// JSON array of {question, options, correct}
        #[arg(long)]
        questions: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let url = args.url.unwrap_or_else(|| {
        env::var("COUNTRIES_URL").unwrap_or_else(|_| REST_COUNTRIES_URL.to_string())
    });
    let client = Client::new();

    match args.command {
        Command::Fetch { out } => fetch(&client, &url, &out).await?,
        Command::List => {
            let session = load_session(&client, &url, args.data.as_deref()).await;
            let mut stdout = io::stdout().lock();
            for record in session.catalog().iter() {
                writeln!(
                    stdout,
                    "{}\t{}\t{:.4},{:.4}",
                    record.key,
                    record.display_name,
                    record.position.lat_deg,
                    record.position.lon_deg
                )?;
            }
        }
        Command::Search { query } => {
            let session = load_session(&client, &url, args.data.as_deref()).await;
            write_search(&mut io::stdout().lock(), &session.search(&query))?;
        }
        Command::Info { country } => {
            let mut session = load_session(&client, &url, args.data.as_deref()).await;
            show_info(&mut session, &country)?;
        }
        Command::Quiz { questions } => {
            let mut quiz = match questions {
                Some(path) => Quiz::new(parse_questions(&tokio::fs::read_to_string(path).await?)?),
                None => Quiz::default(),
            };
            let mut stdout = io::stdout().lock();
            match run_quiz(&mut quiz, &mut io::stdin().lock(), &mut stdout)? {
                Some(result) => write_result(&mut stdout, &result)?,
                None => writeln!(stdout, "\n{}", quiz.score_line())?,
            }
        }
    }

    Ok(())
}

async fn fetch_directory(client: &Client, url: &str) -> Result<String, CatalogError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| CatalogError::Fetch(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(CatalogError::Fetch(format!("HTTP {}", resp.status())));
    }
    resp.text()
        .await
        .map_err(|e| CatalogError::Fetch(e.to_string()))
}

async fn load_session(client: &Client, url: &str, data: Option<&Path>) -> Session {
    let body = match data {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Fetch(format!("{}: {e}", path.display()))),
        None => fetch_directory(client, url).await,
    };
    let loaded: LoadedCatalog = load_or_fallback(body);
    info!(countries = loaded.catalog.len(), origin = ?loaded.origin, "catalog ready");
    Session::new(loaded)
}

async fn fetch(
    client: &Client,
    url: &str,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = fetch_directory(client, url).await?;
    let catalog = parse_directory(&body)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(out, &body).await?;
    info!(countries = catalog.len(), path = %out.display(), "saved directory");
    Ok(())
}

fn show_info(session: &mut Session, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = TerminalView::new(io::stdout().lock());
    if !session.select_country(key, &mut view) {
        return Err(format!("unknown country: {key}").into());
    }
    let mut stdout = view.finish()?;

    if let Some(record) = session.catalog().get(key) {
        let facing = orientation_facing(Orientation::default(), record.position);
        writeln!(
            stdout,
            "\nGlobe orientation: pitch {:.1}°, yaw {:.1}°",
            facing.pitch.to_degrees(),
            facing.yaw.to_degrees()
        )?;
    }
    Ok(())
}
