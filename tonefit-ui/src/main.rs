//! tonefit-ui - terminal front end for the personal color wizard
//!
//! Drives the same step controllers a graphical front end would:
//! photo upload → result → recommendations, or manual color → result →
//! recommendations.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tonefit_common::api::Product;
use tonefit_common::config::{resolve_base_url, TomlConfig, BASE_URL_ENV};
use tonefit_common::{color, WizardStep};
use tonefit_ui::client::ImageUpload;
use tonefit_ui::steps::{ColorOrigin, ResultSummary, StepOutcome};
use tonefit_ui::AppState;
use tracing::info;
use tonefit_ui::logging;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for tonefit-ui
#[derive(Parser, Debug)]
#[command(name = "tonefit-ui")]
#[command(about = "Personal color analysis and cosmetic recommendations")]
#[command(version)]
struct Args {
    /// Backend base URL (overrides TONEFIT_BASE_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a photo to find the personal color
    Analyze {
        /// Face photo to upload
        image: PathBuf,

        /// Free-text cosmetic preference
        #[arg(short, long, default_value = "")]
        preferences: String,

        /// Also fetch cosmetic recommendations
        #[arg(short, long)]
        recommend: bool,
    },

    /// Fetch recommendations for a known personal color
    Recommend {
        /// Color code, e.g. spring-light or winter
        #[arg(long)]
        color: String,

        /// Free-text cosmetic preference
        #[arg(short, long, default_value = "")]
        preferences: String,
    },

    /// List every known color code
    Colors,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize tracing before the config is read so its load messages are kept
    let env_override = std::env::var_os("RUST_LOG").is_some();
    let (filter, filter_handle) = logging::reloadable(logging::startup_filter());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    if !env_override {
        logging::apply_config(&filter_handle, &config.logging)
            .context("Failed to apply configured log level")?;
    }

    if let Command::Colors = args.command {
        for (code, name) in color::known_codes() {
            println!("{:<14} {}", code, name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (base_url, source) = resolve_base_url(args.base_url.as_deref(), BASE_URL_ENV, &config);
    info!(base_url = %base_url, source = ?source, "Backend resolved");

    let app = AppState::connect(&base_url, Duration::from_secs(config.request_timeout_secs))
        .context("Failed to create HTTP client")?;

    let session = app.provider.begin().await;
    session.set_step(WizardStep::ChooseMethod).await;

    let exit = match args.command {
        Command::Analyze {
            image,
            preferences,
            recommend,
        } => {
            session.set_step(WizardStep::Upload).await;
            let upload = ImageUpload::from_path(&image)
                .await
                .with_context(|| format!("Failed to read image {}", image.display()))?;

            let upload_step = app.upload_step().await?;
            let outcome = upload_step.handle_image_upload(upload).await;
            upload_step.wait_for_preview().await;

            if let Some(message) = outcome.error_message() {
                eprintln!("{}", message);
                ExitCode::FAILURE
            } else {
                print_summary(&app.result_step().await?.summary().await);
                if recommend {
                    run_recommend(&app, &preferences).await?
                } else {
                    ExitCode::SUCCESS
                }
            }
        }
        Command::Recommend { color, preferences } => {
            session.set_step(WizardStep::SelectColor).await;
            app.select_color_step().await?.select(&color).await?;
            print_summary(&app.result_step().await?.summary().await);
            run_recommend(&app, &preferences).await?
        }
        Command::Colors => ExitCode::SUCCESS,
    };

    app.provider.end().await;
    Ok(exit)
}

/// Store preferences, fetch recommendations, print them
async fn run_recommend(app: &AppState, preferences: &str) -> Result<ExitCode> {
    app.preference_step().await?.submit_cosmetic(preferences).await;

    let result_step = app.result_step().await?;
    match result_step.handle_recommend().await {
        StepOutcome::Advanced(_) => {
            let products = app.provider.session().await?.recommended_products().await;
            print_products(&products);
            Ok(ExitCode::SUCCESS)
        }
        outcome => {
            if let Some(message) = outcome.error_message() {
                eprintln!("{}", message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_summary(summary: &ResultSummary) {
    match summary.origin {
        ColorOrigin::Analysis => println!("분석이 완료되었어요!"),
        ColorOrigin::Manual => println!("선택한 퍼스널 컬러가 있어요!"),
    }
    println!("당신의 퍼스널 컬러는 {}", summary.headline);

    if !summary.note.reason.is_empty() {
        println!("\n[분석 결과]\n{}", summary.note.reason);
    }
    if !summary.note.suggestions.is_empty() {
        println!("\n[추천 팁]\n{}", summary.note.suggestions);
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("\n추천할 제품을 찾지 못했어요.");
        return;
    }

    println!();
    for (index, product) in products.iter().enumerate() {
        println!(
            "{:>2}. [{}] {} - {} ({})",
            index + 1,
            product.brand,
            product.name,
            product.option_name,
            product.price_str
        );
        if let Some(shade) = &product.shade_hex {
            println!("    shade: {}", shade);
        }
        if let Some(reason) = &product.reason {
            println!("    {}", reason);
        }
        println!("    {}", product.product_url);
    }
}
