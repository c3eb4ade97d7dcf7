//! The renderer boundary
//!
//! Rendering is an external collaborator: this crate produces a fully
//! specified [`ChartModel`](evograph_chart::ChartModel) and hands it across
//! this trait. Determinism is the model's job; a conforming renderer produces
//! byte-identical output for identical models.

use thiserror::Error;

use evograph_chart::ChartModel;

/// Output image formats a renderer must support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raster output at a fixed DPI
    Png,
    /// Vector output
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

/// Errors a rendering backend may surface
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Renderer failure: {0}")]
    Backend(String),
}

/// A chart rendering backend.
pub trait Renderer {
    /// Turn a chart model into image bytes.
    fn render(&self, model: &ChartModel, format: ImageFormat) -> Result<Vec<u8>, RenderError>;
}
