//! Versioned preset and session payloads.
//!
//! Payloads are camelCase JSON records in which every field except `version` may
//! be absent. Applying a payload only overwrites the fields it carries. Three
//! shapes are accepted on import: the bare record, an entry `{ "data": … }` and
//! an exported file `{ "meta": …, "preset": { "data": … } }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::*;

use crate::editor::EditorState;
use crate::options::{pixel_bound, ExportOptions, GuideStyle, SnapSettings};
use crate::split::{GuideLine, SplitLines, Splits};
use crate::SplitError;

/// Newest payload version this crate reads and the one it writes.
pub const PRESET_VERSION: u32 = 2;

fn legacy_version() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetData {
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_split: Option<Vec<GuideLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_split: Option<Vec<GuideLine>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guides_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_color_h: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_color_v: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_guide_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_guide_alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_alpha_h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_alpha_v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_thickness_h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_thickness_v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_px: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_zip_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_filename_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_min_width_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_min_height_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_max_width_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_max_height_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dry_run: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_use_zip_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_use_filename_pattern: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_use_filters: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_use_min_width: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_use_min_height: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_use_max_width: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_use_max_height: Option<bool>,
}

#[derive(Deserialize)]
struct PresetEntry {
    data: PresetData,
}

#[derive(Deserialize)]
struct PresetFile {
    preset: PresetEntry,
}

impl PresetData {
    /// Parses any accepted payload shape.
    ///
    /// # Example
    /// ```
    /// use gridcut::PresetData;
    ///
    /// let json = r#"{"meta":{"kind":"preset"},"preset":{"name":"halves","data":{"version":1,"horizontalSplit":[{"position":50,"size":100}]}}}"#;
    /// let preset = PresetData::from_json(json).unwrap();
    /// assert_eq!(preset.horizontal_split.unwrap().len(), 1);
    /// assert!(preset.vertical_split.is_none());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SplitError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| SplitError::MalformedPreset(e.to_string()))?;
        if !value.is_object() {
            return Err(SplitError::MalformedPreset(
                "expected a JSON object".to_string(),
            ));
        }
        // The wrapper keys pick the shape, so a broken wrapped record never reads as bare.
        let data = if value.get("preset").is_some() {
            serde_json::from_value::<PresetFile>(value).map(|file| file.preset.data)
        } else if value.get("data").is_some() {
            serde_json::from_value::<PresetEntry>(value).map(|entry| entry.data)
        } else {
            serde_json::from_value::<PresetData>(value)
        }
        .map_err(|e| SplitError::MalformedPreset(e.to_string()))?;
        if data.version > PRESET_VERSION {
            return Err(SplitError::UnsupportedPresetVersion {
                found: data.version,
                supported: PRESET_VERSION,
            });
        }
        debug!("Parsed preset payload version {}", data.version);
        Ok(data)
    }

    pub fn to_json(&self) -> Result<String, SplitError> {
        serde_json::to_string_pretty(self).map_err(|e| SplitError::Encode(e.to_string()))
    }

    /// The lines this payload leads to, starting from `current`.
    ///
    /// Axes the payload carries replace the current ones and are clamped into `[0, 100]`.
    pub fn merged_splits(&self, current: &Splits) -> Splits {
        let merge = |lines: &Option<Vec<GuideLine>>, current: &SplitLines| match lines {
            Some(lines) => lines.iter().map(|line| line.clamped()).collect(),
            None => current.clone(),
        };
        Splits::new(
            merge(&self.horizontal_split, &current.horizontal),
            merge(&self.vertical_split, &current.vertical),
        )
    }

    /// Overwrites every style, snap and export field this payload carries.
    pub fn apply_settings(
        &self,
        style: &mut GuideStyle,
        snap: &mut SnapSettings,
        export: &mut ExportOptions,
    ) {
        if let Some(visible) = self.guides_visible {
            style.visible = visible;
        }
        if let Some(color) = &self.guide_color {
            style.color = color.clone();
        }
        if let Some(color) = &self.guide_color_h {
            style.color_h = color.clone();
        }
        if let Some(color) = &self.guide_color_v {
            style.color_v = color.clone();
        }
        if let Some(color) = &self.selected_guide_color {
            style.selected_color = color.clone();
        }
        if let Some(alpha) = self.selected_guide_alpha {
            style.set_selected_alpha(alpha);
        }
        if let Some(alpha) = self.guide_alpha_h {
            style.set_alpha_h(alpha);
        }
        if let Some(alpha) = self.guide_alpha_v {
            style.set_alpha_v(alpha);
        }
        if let Some(thickness) = self.guide_thickness_h {
            style.set_thickness_h(thickness);
        }
        if let Some(thickness) = self.guide_thickness_v {
            style.set_thickness_v(thickness);
        }

        if let Some(enabled) = self.snap_enabled {
            snap.enabled = enabled;
        }
        if let Some(px) = self.snap_px {
            snap.set_px(px);
        }

        if let Some(name) = &self.export_zip_name {
            export.zip_name = name.clone();
        }
        if let Some(pattern) = &self.export_filename_pattern {
            export.filename_pattern = pattern.clone();
        }
        let bounds = [
            (self.export_min_width_px, &mut export.min_width),
            (self.export_min_height_px, &mut export.min_height),
            (self.export_max_width_px, &mut export.max_width),
            (self.export_max_height_px, &mut export.max_height),
        ];
        for (value, field) in bounds {
            if let Some(value) = value {
                *field = pixel_bound(value);
            }
        }
        let flags = [
            (self.export_dry_run, &mut export.dry_run),
            (self.export_use_zip_name, &mut export.use_zip_name),
            (self.export_use_filename_pattern, &mut export.use_filename_pattern),
            (self.export_use_filters, &mut export.use_filters),
            (self.export_use_min_width, &mut export.use_min_width),
            (self.export_use_min_height, &mut export.use_min_height),
            (self.export_use_max_width, &mut export.use_max_width),
            (self.export_use_max_height, &mut export.use_max_height),
        ];
        for (value, field) in flags {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

impl From<&EditorState> for PresetData {
    /// Captures the current lines, style, snap and export options.
    fn from(state: &EditorState) -> Self {
        let unbounded = |value: u32| (value != u32::MAX).then_some(f64::from(value));
        let export = &state.export;
        Self {
            version: PRESET_VERSION,
            horizontal_split: Some(state.splits.horizontal.to_vec()),
            vertical_split: Some(state.splits.vertical.to_vec()),
            guides_visible: Some(state.style.visible),
            guide_color: Some(state.style.color.clone()),
            guide_color_h: Some(state.style.color_h.clone()),
            guide_color_v: Some(state.style.color_v.clone()),
            selected_guide_color: Some(state.style.selected_color.clone()),
            selected_guide_alpha: Some(state.style.selected_alpha),
            guide_alpha_h: Some(state.style.alpha_h),
            guide_alpha_v: Some(state.style.alpha_v),
            guide_thickness_h: Some(f64::from(state.style.thickness_h)),
            guide_thickness_v: Some(f64::from(state.style.thickness_v)),
            snap_enabled: Some(state.snap.enabled),
            snap_px: Some(state.snap.px),
            export_zip_name: Some(export.zip_name.clone()),
            export_filename_pattern: Some(export.filename_pattern.clone()),
            export_min_width_px: Some(f64::from(export.min_width)),
            export_min_height_px: Some(f64::from(export.min_height)),
            export_max_width_px: unbounded(export.max_width),
            export_max_height_px: unbounded(export.max_height),
            export_dry_run: Some(export.dry_run),
            export_use_zip_name: Some(export.use_zip_name),
            export_use_filename_pattern: Some(export.use_filename_pattern),
            export_use_filters: Some(export.use_filters),
            export_use_min_width: Some(export.use_min_width),
            export_use_min_height: Some(export.use_min_height),
            export_use_max_width: Some(export.use_max_width),
            export_use_max_height: Some(export.use_max_height),
        }
    }
}
