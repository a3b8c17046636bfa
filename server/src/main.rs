use anyhow::Context;
use clap::{Parser, Subcommand};
use recipe_server::config::Settings;
use recipe_server::{api, db, seed, telemetry};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "recipe-server")]
#[command(about = "Recipes search API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Load recipes from a JSON file into the database
    Seed {
        /// JSON file with an array of recipes (default: $RECIPES_JSON)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the OpenAPI spec and exit
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Openapi) = cli.command {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    telemetry::init_telemetry()?;

    let settings = Settings::from_env()?;
    let pool = db::create_pool(&settings.database_url, settings.pool_size)
        .context("Could not connect to the database")?;

    match cli.command {
        Some(Commands::Seed { file }) => {
            let path = file.unwrap_or_else(|| settings.recipes_json.clone());
            let summary = seed::seed_from_file(&pool, &path)?;
            println!("Seeded {} recipes.", summary.inserted);
            Ok(())
        }
        _ => serve(Arc::new(pool), &settings).await,
    }
}

async fn serve(pool: recipe_server::AppState, settings: &Settings) -> anyhow::Result<()> {
    db::run_migrations(&pool)?;

    let app = recipe_server::app(pool, settings);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui/");
    tracing::info!("Serving frontend from {}", settings.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
