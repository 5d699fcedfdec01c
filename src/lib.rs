//! # Vitrina - Marketing Ad Composer Library
//!
//! Vitrina turns an uploaded image into a finished, platform-sized marketing
//! advertisement through a guided flow: image ingestion, AI-assisted theme
//! extraction, platform and dimension selection, template recommendation,
//! interactive canvas composition, and PNG export. It provides:
//!
//! - **Wizard orchestration**: the step state machine driving the flow
//! - **Canvas compositing**: ordered image/text layers flattened to a raster
//! - **AI gateway**: theme extraction and template ranking over OpenAI,
//!   with a deterministic offline substitute
//! - **Catalog**: platform-aware template listings and default ad sizes
//!
//! ## Quick Start
//!
//! ```no_run
//! use vitrina::{
//!     canvas::CanvasSession,
//!     gateway::MockGateway,
//!     platform::Platform,
//!     wizard::Wizard,
//! };
//!
//! # async fn demo() -> Result<(), vitrina::error::VitrinaError> {
//! let mut wizard = Wizard::new(MockGateway::new());
//! wizard.begin()?;
//! wizard.submit_image("data:image/png;base64,...").await?;
//! wizard.select_platform(Platform::InstagramFeed, None)?;
//! wizard.skip_details().await?;
//! wizard.select_template("hero-overlay")?;
//!
//! let mut session = CanvasSession::open(None, None, wizard.data().dimensions())?;
//! session.add_text("SALE");
//! let png = session.export()?;
//! wizard.store_export(png)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`wizard`] | Step-sequencing state machine |
//! | [`canvas`] | Scene graph, text rasterization, flattening |
//! | [`gateway`] | AI recommendation boundary (OpenAI + mock) |
//! | [`catalog`] | Static template library |
//! | [`platform`] | Platform enum and default pixel dimensions |
//! | [`campaign`] | Campaign data model |
//! | [`error`] | Error types |

pub mod campaign;
pub mod canvas;
pub mod catalog;
pub mod error;
pub mod gateway;
pub mod platform;
pub mod wizard;

// Re-exports for convenience
pub use campaign::{CampaignData, CampaignDetails, Dimensions};
pub use canvas::CanvasSession;
pub use error::VitrinaError;
pub use platform::Platform;
pub use wizard::{Wizard, WizardState};
