use serde::{Deserialize, Serialize};

use crate::naming::{NameTemplate, DEFAULT_TEMPLATE};

/// Archive name used when none is configured.
pub const DEFAULT_ARCHIVE_NAME: &str = "export.zip";

/// Everything the filter and naming stages read at export time.
///
/// Maximum sizes default to `u32::MAX`, which no slice can exceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub zip_name: String,
    pub filename_pattern: String,
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub dry_run: bool,
    pub use_zip_name: bool,
    pub use_filename_pattern: bool,
    pub use_filters: bool,
    pub use_min_width: bool,
    pub use_min_height: bool,
    pub use_max_width: bool,
    pub use_max_height: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            zip_name: DEFAULT_ARCHIVE_NAME.to_string(),
            filename_pattern: DEFAULT_TEMPLATE.to_string(),
            min_width: 1,
            min_height: 1,
            max_width: u32::MAX,
            max_height: u32::MAX,
            dry_run: false,
            use_zip_name: true,
            use_filename_pattern: true,
            use_filters: false,
            use_min_width: false,
            use_min_height: false,
            use_max_width: false,
            use_max_height: false,
        }
    }
}

impl ExportOptions {
    /// The file name of the finished archive.
    ///
    /// # Example
    /// ```
    /// use gridcut::ExportOptions;
    ///
    /// let mut options = ExportOptions::default();
    /// options.zip_name = "slices.zip".into();
    /// assert_eq!(options.archive_name(), "slices.zip");
    /// options.use_zip_name = false;
    /// assert_eq!(options.archive_name(), "export.zip");
    /// ```
    pub fn archive_name(&self) -> &str {
        if self.use_zip_name && !self.zip_name.is_empty() {
            &self.zip_name
        } else {
            DEFAULT_ARCHIVE_NAME
        }
    }

    pub fn name_template(&self) -> NameTemplate {
        NameTemplate::resolve(&self.filename_pattern, self.use_filename_pattern)
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Rounds a user-entered pixel size and keeps it at least one pixel.
pub fn pixel_bound(value: f64) -> u32 {
    if value.is_nan() {
        return 1;
    }
    value.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Visual styling of the guide overlay. Never recorded in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideStyle {
    pub visible: bool,
    pub color: String,
    pub color_h: String,
    pub color_v: String,
    pub selected_color: String,
    pub selected_alpha: f64,
    pub alpha_h: f64,
    pub alpha_v: f64,
    pub thickness_h: u32,
    pub thickness_v: u32,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            visible: true,
            color: "#000000".to_string(),
            color_h: "#000000".to_string(),
            color_v: "#000000".to_string(),
            selected_color: "#fbbf24".to_string(),
            selected_alpha: 1.0,
            alpha_h: 1.0,
            alpha_v: 1.0,
            thickness_h: 2,
            thickness_v: 2,
        }
    }
}

impl GuideStyle {
    /// Sets one color for both axes.
    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
        self.color_h = color.to_string();
        self.color_v = color.to_string();
    }

    pub fn set_alpha_h(&mut self, alpha: f64) {
        self.alpha_h = clamp_alpha(alpha);
    }

    pub fn set_alpha_v(&mut self, alpha: f64) {
        self.alpha_v = clamp_alpha(alpha);
    }

    pub fn set_selected_alpha(&mut self, alpha: f64) {
        self.selected_alpha = clamp_alpha(alpha);
    }

    /// Rounds the thickness and keeps it at least one pixel.
    pub fn set_thickness_h(&mut self, thickness: f64) {
        self.thickness_h = pixel_bound(thickness);
    }

    pub fn set_thickness_v(&mut self, thickness: f64) {
        self.thickness_v = pixel_bound(thickness);
    }
}

fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        return 1.0;
    }
    alpha.clamp(0.0, 1.0)
}

/// Snapping of dragged lines to nearby positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    pub enabled: bool,
    pub px: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            px: 10.0,
        }
    }
}

impl SnapSettings {
    /// Rounds the snap distance to whole pixels, at least one.
    pub fn set_px(&mut self, px: f64) {
        self.px = f64::from(pixel_bound(px));
    }
}
