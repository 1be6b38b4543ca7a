//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Static site generator for a software portfolio and its blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog post
    New {
        /// Title of the new post
        title: String,

        /// URL path of the post (defaults to <blog_path>/<slug>)
        #[arg(short, long)]
        path: Option<String>,

        /// Summary shown on the blog listing
        #[arg(long)]
        description: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// List blog posts in listing order
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            path,
            description,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            let file = folio::commands::new::create_post(
                &folio,
                &title,
                path.as_deref(),
                description.as_deref(),
            )?;
            println!("Created {:?}", file);
        }

        Commands::Generate { watch } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");

            folio.generate()?;
            println!("Generated successfully!");

            if watch {
                folio::commands::generate::watch(&folio)?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let folio = folio::Folio::new(&base_dir)?;

            tracing::info!("Generating static files...");
            // A broken post should not keep the server from starting
            if let Err(e) = folio.generate() {
                tracing::error!("{:#}", e);
            }

            folio::server::start(&folio, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let folio = folio::Folio::new(&base_dir)?;
            folio.clean()?;
            println!("Cleaned public folder");
        }

        Commands::List => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio)?;
        }

        Commands::Version => {
            println!("folio {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
