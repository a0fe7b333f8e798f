use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use imgg::api;
use imgg::models::ServerConfig;
use imgg::server;
use imgg::services::codec;
use pixel_adjust::{convert, AdjustmentParameters, Pipeline};

#[derive(Parser)]
#[command(name = "imgg")]
#[command(about = "Image adjustment server - tonal, color, effect and threshold adjustments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Adjust a local image file
    Process {
        /// Input image (any format the decoder understands)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file: JPEG, or text when --array is set
        #[arg(short, long)]
        output: PathBuf,

        /// Adjustment as key=value (e.g. --param contrast=1.3); repeatable
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Write the sample array (in the `colorspace` parameter) instead of a JPEG
        #[arg(long)]
        array: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "imgg API",
        description = "Image adjustment server",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_process,
        api::handle_process_original,
        api::handle_download_array,
    ),
    components(schemas(api::ProcessForm)),
    tags(
        (name = "Processing", description = "Image adjustment and sample export")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process {
            input,
            output,
            params,
            array,
        }) => run_process_command(&input, &output, &params, array),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Parse `key=value` pairs from the command line.
fn parse_params(raw: &[String]) -> anyhow::Result<AdjustmentParameters> {
    let pairs = raw
        .iter()
        .map(|p| {
            p.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| anyhow::anyhow!("Expected KEY=VALUE, got {p:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(AdjustmentParameters::from_pairs(pairs))
}

/// Adjust a local file (no server needed)
fn run_process_command(
    input: &Path,
    output: &Path,
    params: &[String],
    array: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgg=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = ServerConfig::from_env();
    let params = parse_params(params)?;
    let pipeline = Pipeline::from_params(&params)?;

    let bytes = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let buffer = codec::decode(&bytes)?;
    let (width, height) = (buffer.width(), buffer.height());
    let adjusted = pipeline.run(buffer)?;

    if array {
        let text = convert(&adjusted, pipeline.options().colorspace)?.to_text();
        std::fs::write(output, text)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    } else {
        let jpeg = codec::encode_jpeg(&adjusted, config.jpeg_quality)?;
        std::fs::write(output, jpeg)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    let operations: Vec<String> = pipeline.operations().iter().map(|op| op.to_string()).collect();
    println!(
        "Processed {}x{} image with [{}] -> {}",
        width,
        height,
        operations.join(", "),
        output.display()
    );

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config = ServerConfig::from_env();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("imgg v{VERSION} - image adjustment server\n");

    println!("Configuration:");
    println!(
        "  CONFIG_FILE          = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!("  BIND_ADDR            = {}", config.bind_addr);
    println!("  WORKERS              = {}", config.workers);
    println!("  REQUEST_TIMEOUT_SECS = {}", config.request_timeout_secs);
    println!("  MAX_UPLOAD_BYTES     = {}", config.max_upload_bytes);
    println!("  JPEG_QUALITY         = {}", config.jpeg_quality);

    println!("\nCommands:");
    println!("  imgg serve                                   Start the HTTP server");
    println!("  imgg process -i IN -o OUT [-p KEY=VALUE]...  Adjust a local file");
    println!("\nRun 'imgg --help' for more information.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgg=debug,pixel_adjust=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let state = server::create_app_state(&config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "imgg server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
