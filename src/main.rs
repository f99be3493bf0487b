use church_site::api::{ChurchApi, Endpoint, HttpChurchApi, MemoryApi};
use church_site::config::{self, SiteConfig};
use church_site::layout::SiteContext;
use church_site::server::{self, AppState};
use church_site::{generate, output};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "church-site")]
#[command(about = "Website for a church, served live or rendered to static files")]
#[command(long_about = "\
Website for a church, served live or rendered to static files

Page content comes from the church's content API. Every piece of a page
the API does not supply (request failed, timed out, or came back empty)
is replaced with built-in content, so the site always renders completely.

Site directory:

  site/
  └── config.toml        # Church details, API location, server, colors (optional)

Run 'church-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Don't contact the content API; every page renders its built-in content
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the site over HTTP until interrupted
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Render every page to static HTML files
    Render {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Show which page content the API currently supplies
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Serve { port } => {
            let (site_config, api) = load(&cli.root, cli.offline)?;
            let port = port.unwrap_or(site_config.server.port);
            let address = SocketAddr::new(site_config.server.address, port);
            let state = AppState::new(
                api,
                SiteContext::new(&site_config),
                site_config.server.ready_wait(),
            );
            server::serve(state, address).await?;
        }
        Command::Render { output: output_dir } => {
            let (site_config, api) = load(&cli.root, cli.offline)?;
            let ctx = SiteContext::new(&site_config);
            let reports = generate::generate(api, &ctx, &output_dir).await?;
            output::print_render_output(&reports, &output_dir);
        }
        Command::Check => {
            let (_, api) = load(&cli.root, cli.offline)?;
            let reports = generate::check(api).await?;
            output::print_check_output(&reports);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` from the site directory and build the content API.
fn load(
    root: &Path,
    offline: bool,
) -> Result<(SiteConfig, Arc<dyn ChurchApi>), Box<dyn std::error::Error>> {
    let site_config = config::load_config(root)?;
    let api = build_api(&site_config, offline)?;
    Ok((site_config, api))
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "church_site=debug,tower_http=debug"
    } else {
        "church_site=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_api(
    site_config: &SiteConfig,
    offline: bool,
) -> Result<Arc<dyn ChurchApi>, church_site::api::ApiError> {
    if offline {
        info!("offline: serving built-in content, contact form disabled");
        // Nothing pretends to deliver a message while offline.
        return Ok(Arc::new(MemoryApi::new().failing(Endpoint::Contact)));
    }
    let api = HttpChurchApi::new(&site_config.api.base_url, site_config.api.timeout())?;
    info!(base_url = %site_config.api.base_url, "using content API");
    Ok(Arc::new(api))
}
