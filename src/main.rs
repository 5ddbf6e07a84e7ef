//! CLI entry point for blogfront

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogfront::store::NewPost;
use blogfront::Blog;

#[derive(Parser)]
#[command(name = "blogfront")]
#[command(version)]
#[command(about = "Serve and generate a blog from markdown files and database posts", long_about = None)]
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
    /// List the merged posts, newest first
    List {
        /// Include draft posts
        #[arg(long)]
        drafts: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Slug of the post
        slug: String,

        /// Print the page metadata instead of the post
        #[arg(long)]
        meta: bool,
    },

    /// Create a new database post
    New {
        /// Title of the new post
        #[arg(short, long)]
        title: String,

        /// Author identifier
        #[arg(short, long)]
        author: String,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,

        /// Publication date (now when omitted)
        #[arg(long)]
        date: Option<String>,

        /// Mark the post as a draft
        #[arg(long)]
        draft: bool,

        /// File holding the post body
        #[arg(long)]
        body: Option<PathBuf>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Show draft posts
        #[arg(long)]
        drafts: bool,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogfront=debug,info"
    } else {
        "blogfront=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::List { drafts, json } => {
            let blog = Blog::new(&base_dir)?;
            blogfront::commands::list::run(&blog, drafts, json).await?;
        }

        Commands::Show { slug, meta } => {
            let blog = Blog::new(&base_dir)?;
            blogfront::commands::show::run(&blog, &slug, meta).await?;
        }

        Commands::New {
            title,
            author,
            description,
            slug,
            date,
            draft,
            body,
        } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let post = NewPost {
                title,
                description,
                author,
                content: String::new(),
                draft: Some(draft),
                date,
                slug,
            };
            blogfront::commands::new::run(&blog, post, body.as_deref()).await?;
        }

        Commands::Generate { drafts } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blogfront::commands::generate::run(&blog, drafts).await?;
            println!("Generated successfully!");
        }

        Commands::Serve { port, ip, drafts } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogfront::server::start(&blog, &ip, port, drafts).await?;
        }

        Commands::Clean => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blogfront::commands::clean::run(&blog)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blogfront version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
