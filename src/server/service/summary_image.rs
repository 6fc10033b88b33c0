//! Summary image rendering.
//!
//! After every refresh a 600x400 PNG is drawn listing the total number of stored
//! countries, the refresh time and the five countries with the highest estimated GDP.
//! Text is drawn with plotters' `ab_glyph` path, which does not discover system fonts, so
//! a TrueType font is registered on first use: the configured font if it loads, otherwise
//! the DejaVu Sans copy bundled into the binary.

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use plotters::style::register_font;

use num_format::{Locale, ToFormattedString};
use plotters::{
    prelude::{IntoDrawingArea, RGBColor, BLACK},
    style::{FontFamily, FontStyle, TextStyle},
};
use plotters_bitmap::BitMapBackend;

use crate::server::{
    config::Config,
    error::{country::CountryError, Error},
};

/// Canvas size in pixels
pub const IMAGE_SIZE: (u32, u32) = (600, 400);

const BACKGROUND: RGBColor = RGBColor(230, 230, 250);
const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: u32 = 18;

/// Font used when no `SUMMARY_FONT_PATH` is configured or it cannot be loaded
static BUNDLED_FONT: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

/// Outcome of the one-time font registration
static FONT_REGISTRATION: OnceLock<Result<(), String>> = OnceLock::new();

/// A country shown in the top list of the summary image
#[derive(Debug, Clone, PartialEq)]
pub struct TopCountry {
    pub name: String,
    pub estimated_gdp: Option<f64>,
}

impl From<entity::country::Model> for TopCountry {
    fn from(model: entity::country::Model) -> Self {
        Self {
            name: model.name,
            estimated_gdp: model.estimated_gdp,
        }
    }
}

/// Aggregates drawn on the summary image
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: u64,
    /// Already formatted refresh time
    pub last_refreshed_at: String,
    pub top_countries: Vec<TopCountry>,
}

/// One line of text and its top-left position on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub text: String,
    pub position: (i32, i32),
}

/// Formats a GDP estimate with thousands separators and two decimals, `N/A` when unknown
pub fn format_gdp(estimated_gdp: Option<f64>) -> String {
    let Some(value) = estimated_gdp else {
        return "N/A".to_string();
    };

    let cents = (value * 100.0).round() as i128;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    format!(
        "{}{}.{:02}",
        sign,
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// Lays out the text of the summary image
pub fn summary_lines(summary: &Summary) -> Vec<SummaryLine> {
    let mut lines = vec![
        SummaryLine {
            text: format!("Total Countries: {}", summary.total),
            position: (20, 20),
        },
        SummaryLine {
            text: format!("Last Refreshed: {}", summary.last_refreshed_at),
            position: (20, 50),
        },
        SummaryLine {
            text: "Top 5 Countries by GDP:".to_string(),
            position: (20, 90),
        },
    ];

    for (i, country) in summary.top_countries.iter().enumerate() {
        lines.push(SummaryLine {
            text: format!(
                "{} - GDP: {}",
                country.name,
                format_gdp(country.estimated_gdp)
            ),
            position: (40, 120 + 25 * i as i32),
        });
    }

    lines
}

/// Renders and serves the summary PNG at a fixed path
#[derive(Clone, Debug)]
pub struct SummaryImageRenderer {
    path: PathBuf,
    font_path: Option<PathBuf>,
}

impl SummaryImageRenderer {
    /// Creates a new instance of [`SummaryImageRenderer`]
    pub fn new(path: impl Into<PathBuf>, font_path: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            font_path,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.summary_image_path.clone(),
            config.summary_font_path.clone(),
        )
    }

    /// Location the image is written to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Draws `summary` and overwrites the image file
    ///
    /// Drawing and PNG encoding run on the blocking thread pool. Parent directories of the
    /// image path are created as needed.
    ///
    /// # Returns
    /// - `Ok(())` - Image written
    /// - `Err(Error::IoError)` - Parent directory could not be created
    /// - `Err(Error::RenderError)` - Drawing or encoding failed
    /// - `Err(Error::InternalError)` - The blocking task panicked
    pub async fn render(&self, summary: Summary) -> Result<(), Error> {
        let path = self.path.clone();
        let font_path = self.font_path.clone();

        tokio::task::spawn_blocking(move || draw(&path, font_path.as_deref(), &summary))
            .await
            .map_err(|e| Error::InternalError(format!("Summary image task failed: {}", e)))?
    }

    /// Reads the last rendered image
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)` - PNG bytes
    /// - `Err(Error::CountryError)` - No image has been rendered yet
    /// - `Err(Error::IoError)` - The file exists but could not be read
    pub async fn read(&self) -> Result<Vec<u8>, Error> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(CountryError::SummaryImageNotFound.into());
        }

        Ok(tokio::fs::read(&self.path).await?)
    }
}

fn draw(path: &Path, font_path: Option<&Path>, summary: &Summary) -> Result<(), Error> {
    ensure_font_registered(font_path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&BACKGROUND)
        .map_err(|e| Error::RenderError(e.to_string()))?;

    let style = TextStyle::from((FontFamily::SansSerif, FONT_SIZE)).color(&BLACK);

    for line in summary_lines(summary) {
        root.draw_text(&line.text, &style, line.position)
            .map_err(|e| Error::RenderError(e.to_string()))?;
    }

    root.present()
        .map_err(|e| Error::RenderError(e.to_string()))?;

    tracing::debug!("Summary image written to {}", path.display());

    Ok(())
}

/// Registers the sans-serif family used for every line of text
///
/// Only the first call does any work; later calls return the cached outcome even if they
/// pass a different `font_path`. A configured font that cannot be read or parsed is
/// skipped in favour of [`BUNDLED_FONT`].
///
/// # Returns
/// - `Ok(())` - A font is registered
/// - `Err(Error::RenderError)` - Not even the bundled font could be registered
fn ensure_font_registered(font_path: Option<&Path>) -> Result<(), Error> {
    FONT_REGISTRATION
        .get_or_init(|| {
            if let Some(font_path) = font_path {
                match register_font_file(font_path) {
                    Ok(()) => {
                        tracing::info!("Registered summary image font {}", font_path.display());
                        return Ok(());
                    }
                    Err(reason) => {
                        tracing::warn!(
                            "Falling back to the bundled font, {} is unusable: {}",
                            font_path.display(),
                            reason
                        );
                    }
                }
            }

            register_font(FONT_FAMILY, FontStyle::Normal, BUNDLED_FONT)
                .map_err(|_| "Bundled font is not a usable TrueType font".to_string())
        })
        .clone()
        .map_err(Error::RenderError)
}

fn register_font_file(font_path: &Path) -> Result<(), String> {
    let bytes = std::fs::read(font_path).map_err(|e| e.to_string())?;

    // Registered fonts must live for the rest of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());

    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| "not a usable TrueType font".to_string())
}
