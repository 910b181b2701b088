use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inkblot::models::{AppConfig, CropMode, StyleOverrides};
use inkblot::rendering::png::encode_png;
use inkblot::server;
use inkblot::services::{read_article, scan_articles, GeneratorService, RemoteSource};
use inkblot::{api, rendering};

#[derive(Parser)]
#[command(name = "inkblot")]
#[command(about = "Deterministic abstract cover art generated from article text")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Generate cover images for one article
    Generate {
        /// Article file (.md, .txt, .html); reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Fetch the article from a URL instead of a file
        #[arg(short, long, conflicts_with = "input")]
        url: Option<String>,

        /// Directory for the output PNGs
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Generate only this named format (default: all configured formats)
        #[arg(short, long)]
        format: Option<String>,

        /// Crop strategy override
        #[arg(short, long, value_enum)]
        crop: Option<CropMode>,
    },
    /// Generate cover images for every article in a directory
    Batch {
        /// Directory of article files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Directory for the output PNGs
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Crop strategy override
        #[arg(short, long, value_enum)]
        crop: Option<CropMode>,
    },
    /// Print the metrics and visual parameters for an article as JSON
    Analyze {
        /// Article file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkblot API",
        description = "Deterministic abstract cover art generated from article text",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(api::handle_cover, api::handle_analyze, api::handle_palettes),
    components(schemas(
        api::CoverRequest,
        api::AnalyzeRequest,
        api::AnalyzeResponse,
        api::PaletteInfo,
        inkblot::models::ContentMetrics,
        inkblot::models::VisualParameters,
        inkblot::models::CropMode,
    )),
    tags(
        (name = "Generation", description = "Cover generation and pipeline inspection")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Generate {
            input,
            url,
            output_dir,
            format,
            crop,
        }) => run_generate_command(input, url, &output_dir, format, crop),
        Some(Commands::Batch {
            input_dir,
            output_dir,
            crop,
        }) => run_batch_command(&input_dir, &output_dir, crop),
        Some(Commands::Analyze { input }) => run_analyze_command(input),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkblot=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config() -> AppConfig {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    AppConfig::load(config_file.as_deref())
}

fn read_input(input: Option<PathBuf>) -> anyhow::Result<(String, String)> {
    match input {
        Some(path) => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("article")
                .to_string();
            let text = read_article(&path)?;
            Ok((stem, text))
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(("article".to_string(), text))
        }
    }
}

/// Generate covers for one article (no server needed)
fn run_generate_command(
    input: Option<PathBuf>,
    url: Option<String>,
    output_dir: &Path,
    format: Option<String>,
    crop: Option<CropMode>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config();
    let generator = GeneratorService::new(config.master_size);

    let (stem, text) = match url {
        Some(url) => {
            let source = RemoteSource::new();
            let text = source.fetch(&url)?;
            let stem = url
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or("article")
                .trim_end_matches(".html")
                .to_string();
            (stem, text)
        }
        None => read_input(input)?,
    };

    let formats = match format {
        Some(name) => vec![config
            .get_format(&name)
            .ok_or_else(|| anyhow::anyhow!("Unknown format: {name}"))?],
        None => config.format_specs(),
    };
    let crop_mode = crop.unwrap_or(config.crop_mode);
    let style = StyleOverrides {
        min_stroke_width: config.style.min_stroke_width,
        max_stroke_width: config.style.max_stroke_width,
    };

    let (generated, derived) = generator
        .generate_formats(&text, &style, &formats, crop_mode)
        .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    std::fs::create_dir_all(output_dir)?;
    for (spec, raster) in derived {
        let png_bytes = encode_png(&raster)?;
        let path = output_dir.join(format!("{stem}-{}.png", spec.name));
        std::fs::write(&path, &png_bytes)?;
        println!("Rendered {} ({} bytes)", path.display(), png_bytes.len());
    }
    println!(
        "Seed {} / palette {} from {} words",
        generated.parameters.seed, generated.parameters.palette_index, generated.metrics.word_count
    );

    Ok(())
}

/// Generate covers for every article in a directory
fn run_batch_command(
    input_dir: &Path,
    output_dir: &Path,
    crop: Option<CropMode>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config();
    let generator = GeneratorService::new(config.master_size);
    let formats = config.format_specs();
    let crop_mode = crop.unwrap_or(config.crop_mode);
    let style = StyleOverrides {
        min_stroke_width: config.style.min_stroke_width,
        max_stroke_width: config.style.max_stroke_width,
    };

    let articles = scan_articles(input_dir)?;
    if articles.is_empty() {
        println!("No articles found in {}", input_dir.display());
        return Ok(());
    }

    std::fs::create_dir_all(output_dir)?;
    let mut rendered = 0usize;
    let mut failed = 0usize;

    for path in &articles {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("article");

        let result = read_article(path).map_err(anyhow::Error::from).and_then(|text| {
            generator
                .generate_formats(&text, &style, &formats, crop_mode)
                .map_err(anyhow::Error::from)
        });

        match result {
            Ok((_, derived)) => {
                for (spec, raster) in derived {
                    let png_bytes = encode_png(&raster)?;
                    let out = output_dir.join(format!("{stem}-{}.png", spec.name));
                    std::fs::write(&out, &png_bytes)?;
                }
                rendered += 1;
            }
            Err(e) => {
                eprintln!("  ! {}: {e}", path.display());
                failed += 1;
            }
        }
    }

    println!(
        "Rendered {rendered} of {} articles into {}{}",
        articles.len(),
        output_dir.display(),
        if failed > 0 {
            format!(" ({failed} failed)")
        } else {
            String::new()
        }
    );

    Ok(())
}

/// Print metrics and parameters for an article
fn run_analyze_command(input: Option<PathBuf>) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config();
    let generator = GeneratorService::new(config.master_size);

    let (_, text) = read_input(input)?;
    let (metrics, parameters, _) = generator.analyze(&text);

    let report = serde_json::json!({
        "metrics": metrics,
        "parameters": parameters,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Inkblot v{VERSION}");
    println!("Deterministic abstract cover art generated from article text\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config = load_config();
    println!("\nOutput Formats ({:?} crop):", config.crop_mode);
    for format in &config.formats {
        println!("  {:<12} {}x{}", format.name, format.width, format.height);
    }
    println!(
        "  master       {}x{} ({} palettes)",
        config.master_size,
        config.master_size,
        rendering::PALETTE_COUNT
    );

    println!("\nCommands:");
    println!("  inkblot serve      Start the HTTP server");
    println!("  inkblot generate   Render covers for one article");
    println!("  inkblot batch      Render covers for a directory of articles");
    println!("  inkblot analyze    Print metrics and parameters as JSON");
    println!("\nRun 'inkblot --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkblot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = Arc::new(load_config());

    let state = server::create_app_state(config);

    let app = server::build_router(state)
        // OpenAPI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Inkblot server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
