//! # Vitrina CLI
//!
//! Command-line interface for composing platform-sized marketing ads.
//!
//! ## Usage
//!
//! ```bash
//! # List supported platforms and their default ad sizes
//! vitrina platforms
//!
//! # List templates for a platform
//! vitrina templates --platform INSTAGRAM_FEED
//!
//! # Search the catalog
//! vitrina templates --platform INSTAGRAM_FEED --search minimal
//!
//! # Compose an ad offline (deterministic recommendations)
//! vitrina compose --image photo.png --platform INSTAGRAM_FEED \
//!     --template hero-overlay --text "SALE" --output ad.png
//!
//! # Compose with AI-ranked templates
//! vitrina compose --image photo.png --platform FACEBOOK_FEED \
//!     --api-key sk-... --output ad.png
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vitrina::{
    VitrinaError,
    campaign::Dimensions,
    canvas::CanvasSession,
    catalog,
    gateway::{GatewayConfig, MockGateway, OpenAiGateway, RecommendationGateway},
    platform::Platform,
    wizard::{Analysis, Wizard},
};

/// Vitrina - marketing ad composer
#[derive(Parser, Debug)]
#[command(name = "vitrina")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported platforms with their default pixel dimensions
    Platforms,

    /// List templates available for a platform
    Templates {
        /// Platform id (e.g. INSTAGRAM_FEED)
        #[arg(long)]
        platform: Platform,

        /// Filter by free-text search over name, style, and category
        #[arg(long)]
        search: Option<String>,
    },

    /// Run the campaign flow and export a composed PNG
    Compose {
        /// Path to the image to feature in the ad
        #[arg(long)]
        image: PathBuf,

        /// Target platform id
        #[arg(long)]
        platform: Platform,

        /// Custom canvas width (overrides the platform default; needs --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Custom canvas height (overrides the platform default; needs --width)
        #[arg(long, requires = "width")]
        height: Option<u32>,

        /// Template id; omit to take the top recommendation
        #[arg(long)]
        template: Option<String>,

        /// Text overlay; repeatable
        #[arg(long)]
        text: Vec<String>,

        /// Output PNG path
        #[arg(long, default_value = "ad.png")]
        output: PathBuf,

        /// OpenAI API key; omit to run offline with deterministic ranking
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), VitrinaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Platforms => {
            for &platform in Platform::all() {
                let dims = platform.default_dimensions();
                println!("{:<24} {:>11}  {}", platform.id(), dims.to_string(), platform.category());
            }
            Ok(())
        }
        Commands::Templates { platform, search } => {
            let entries = match search {
                Some(query) => catalog::search_templates(&query)
                    .into_iter()
                    .filter(|t| catalog::template_exists(platform, &t.id))
                    .collect(),
                None => catalog::templates_for_platform(platform),
            };
            for entry in entries {
                println!("{:<24} {:<22} {}", entry.id, entry.name, entry.style);
            }
            Ok(())
        }
        Commands::Compose {
            image,
            platform,
            width,
            height,
            template,
            text,
            output,
            api_key,
        } => {
            let custom = match (width, height) {
                (Some(w), Some(h)) => Some(Dimensions::new(w, h)),
                _ => None,
            };
            match api_key {
                Some(key) => {
                    let gateway = OpenAiGateway::new(GatewayConfig::new(key))?;
                    if !gateway.check_api_key().await {
                        return Err(VitrinaError::Gateway(
                            "API key rejected by the service".to_string(),
                        ));
                    }
                    compose(gateway, image, platform, custom, template, text, output).await
                }
                None => {
                    compose(MockGateway::new(), image, platform, custom, template, text, output)
                        .await
                }
            }
        }
    }
}

/// Drive the whole wizard flow non-interactively and write the export.
async fn compose<G: RecommendationGateway>(
    gateway: G,
    image: PathBuf,
    platform: Platform,
    custom: Option<Dimensions>,
    template: Option<String>,
    text: Vec<String>,
    output: PathBuf,
) -> Result<(), VitrinaError> {
    let user_image = image::open(&image)
        .map_err(|e| VitrinaError::Image(format!("cannot open {}: {}", image.display(), e)))?;

    let mut wizard = Wizard::new(gateway);
    wizard.begin()?;
    let analysis = wizard.submit_image(&image.display().to_string()).await?;
    if let Analysis::Fallback { reason } = &analysis {
        tracing::warn!(%reason, "continuing without AI analysis");
        wizard.select_theme("general")?;
    }
    wizard.select_platform(platform, custom)?;
    wizard.skip_details().await?;

    let template_id = match template {
        Some(id) => id,
        None => {
            let page = wizard.template_page();
            page.first()
                .map(|choice| choice.id.clone())
                .ok_or_else(|| VitrinaError::NotFound("no templates available".to_string()))?
        }
    };
    wizard.select_template(&template_id)?;
    println!("Template: {}", template_id);
    if let Some(headline) = &wizard.data().headline {
        println!("Headline: {}", headline);
    }

    let mut session = CanvasSession::open(None, Some(&user_image), wizard.data().dimensions())?;
    for line in &text {
        session.add_text(line);
    }
    let png = session.export()?;
    session.close();
    wizard.store_export(png.clone())?;

    std::fs::write(&output, &png)?;
    println!(
        "Wrote {} ({})",
        output.display(),
        wizard.data().dimensions()
    );
    Ok(())
}
