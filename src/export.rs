//! End-to-end export and preview pipeline.
//!
//! Both entry points take a snapshot of the editor state when called, enumerate
//! candidates per source, filter them, name the survivors and render them.
//! Renders are independent and may run on the rayon pool; results are joined in
//! enumeration order before anything is assembled.

use std::collections::HashSet;
use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;
use serde::Serialize;
use tracing::*;

use crate::archive::ArchiveAssembler;
use crate::editor::EditorState;
use crate::filter::SizeFilter;
use crate::grid::{Candidate, CanvasSize, Partition};
use crate::naming::NameVars;
use crate::options::ExportOptions;
use crate::render::{to_data_url, Renderable};
use crate::split::Splits;
use crate::SplitError;

/// The read-only part of the editor state one export run works from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSnapshot {
    pub splits: Splits,
    pub options: ExportOptions,
    pub enable_parallel: bool,
}

impl From<&EditorState> for ExportSnapshot {
    fn from(state: &EditorState) -> Self {
        Self {
            splits: state.splits.clone(),
            options: state.export.clone(),
            enable_parallel: state.config.enable_parallel,
        }
    }
}

/// A candidate that survived filtering and whitelisting, with its file name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSlice {
    pub candidate: Candidate,
    pub name: String,
}

/// The finished archive of one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Slice names in archive order, README excluded.
    pub entries: Vec<String>,
    /// Planned slices whose render failed and that are missing from the archive.
    pub dropped: usize,
    pub dry_run: bool,
}

/// One inline preview item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlicePreview {
    pub source_index: usize,
    pub slice_index: usize,
    pub width: u32,
    pub height: u32,
    pub name: String,
    pub data_url: String,
}

impl SlicePreview {
    /// The whitelist key to pass back to [`export_images`].
    pub fn key(&self) -> String {
        crate::grid::candidate_key(self.source_index, self.slice_index)
    }
}

impl ExportSnapshot {
    /// Enumerates, filters, whitelists and names slices for sources of the given sizes.
    ///
    /// `{findex}` ranks slices among those passing the filter, `{sindex}` among
    /// those also on the whitelist. Without a whitelist both ranks agree.
    ///
    /// # Example
    /// ```
    /// use gridcut::export::ExportSnapshot;
    /// use gridcut::{CanvasSize, EditorState, Splits};
    ///
    /// let mut state = EditorState::default();
    /// state.splits = Splits::grid(1, 1);
    /// let plan = ExportSnapshot::from(&state).plan(&[CanvasSize::new(100, 100)], None);
    /// let names: Vec<&str> = plan.iter().map(|slice| slice.name.as_str()).collect();
    /// assert_eq!(names, ["image-0-split-0.png", "image-0-split-1.png", "image-0-split-2.png", "image-0-split-3.png"]);
    /// ```
    pub fn plan(
        &self,
        sizes: &[CanvasSize],
        whitelist: Option<&HashSet<String>>,
    ) -> Vec<PlannedSlice> {
        let filter = SizeFilter::from(&self.options);
        let template = self.options.name_template();

        let candidates: Vec<Candidate> = sizes
            .iter()
            .enumerate()
            .flat_map(|(source_index, &size)| {
                Partition::from_splits(&self.splits, size)
                    .candidates(source_index)
                    .collect::<Vec<_>>()
            })
            .collect();
        let total = candidates.len();

        let planned: Vec<PlannedSlice> = candidates
            .into_iter()
            .filter(|candidate| filter.accepts(candidate))
            .enumerate()
            .filter(|(_, candidate)| {
                whitelist.map_or(true, |keys| keys.contains(&candidate.key()))
            })
            .enumerate()
            .map(|(sindex, (findex, candidate))| {
                let vars = NameVars {
                    i: candidate.source_index,
                    index: candidate.slice_index,
                    w: candidate.pixel_width(),
                    h: candidate.pixel_height(),
                    findex: Some(findex),
                    sindex: Some(sindex),
                };
                let name = template.format(&vars);
                PlannedSlice { candidate, name }
            })
            .collect();

        debug!(
            "Planned {} of {} candidates across {} sources",
            planned.len(),
            total,
            sizes.len()
        );
        planned
    }

    /// Renders every planned slice to PNG, dropping the ones that fail.
    fn render(
        &self,
        plan: Vec<PlannedSlice>,
        sources: &[RgbaImage],
    ) -> Vec<(PlannedSlice, Vec<u8>)> {
        if self.enable_parallel {
            Self::render_parallel(plan, sources)
        } else {
            Self::render_sequential(plan, sources)
        }
    }

    fn render_parallel(
        plan: Vec<PlannedSlice>,
        sources: &[RgbaImage],
    ) -> Vec<(PlannedSlice, Vec<u8>)> {
        trace!("Rendering {} slices in parallel", plan.len());
        plan.into_par_iter()
            .filter_map(|slice| render_one(slice, sources))
            .collect()
    }

    fn render_sequential(
        plan: Vec<PlannedSlice>,
        sources: &[RgbaImage],
    ) -> Vec<(PlannedSlice, Vec<u8>)> {
        trace!("Rendering {} slices sequentially", plan.len());
        plan.into_iter()
            .filter_map(|slice| render_one(slice, sources))
            .collect()
    }

    /// Runs the full export over decoded sources.
    pub fn export(
        &self,
        sources: &[RgbaImage],
        whitelist: Option<&HashSet<String>>,
    ) -> Result<ExportArchive, SplitError> {
        let plan = self.plan(&source_sizes(sources), whitelist);
        let planned = plan.len();
        let rendered = self.render(plan, sources);
        let dropped = planned - rendered.len();
        if dropped > 0 {
            warn!("{} of {} slices failed to render and were dropped", dropped, planned);
        }

        let mut archive = ArchiveAssembler::new();
        for (slice, bytes) in rendered {
            archive.insert(slice.name, bytes);
        }
        let entries = archive.names().map(str::to_string).collect();
        let bytes = archive.finish()?;

        info!(
            "Exported {} slices into {} ({} bytes)",
            planned - dropped,
            self.options.archive_name(),
            bytes.len()
        );
        Ok(ExportArchive {
            file_name: self.options.archive_name().to_string(),
            bytes,
            entries,
            dropped,
            dry_run: self.options.dry_run,
        })
    }

    /// Runs the pipeline up to rendering and returns inline previews instead of an archive.
    pub fn preview(&self, sources: &[RgbaImage]) -> Vec<SlicePreview> {
        let plan = self.plan(&source_sizes(sources), None);
        self.render(plan, sources)
            .into_iter()
            .map(|(slice, png)| SlicePreview {
                source_index: slice.candidate.source_index,
                slice_index: slice.candidate.slice_index,
                width: slice.candidate.pixel_width(),
                height: slice.candidate.pixel_height(),
                name: slice.name,
                data_url: to_data_url(&png),
            })
            .collect()
    }
}

fn render_one(slice: PlannedSlice, sources: &[RgbaImage]) -> Option<(PlannedSlice, Vec<u8>)> {
    let Some(source) = sources.get(slice.candidate.source_index) else {
        warn!("No source raster for slice {}", slice.candidate.key());
        return None;
    };
    match slice.candidate.render_png(source) {
        Ok(bytes) => Some((slice, bytes)),
        Err(e) => {
            warn!("Dropping {}: {}", slice.name, e);
            None
        }
    }
}

fn source_sizes(sources: &[RgbaImage]) -> Vec<CanvasSize> {
    sources
        .iter()
        .map(|source| CanvasSize::from(source.dimensions()))
        .collect()
}

/// Exports every surviving slice of `sources` into one archive.
///
/// With a whitelist only candidates whose key (`"{source}-{slice}"`) it contains are written.
pub fn export_images(
    state: &EditorState,
    sources: &[RgbaImage],
    whitelist: Option<&HashSet<String>>,
) -> Result<ExportArchive, SplitError> {
    ExportSnapshot::from(state).export(sources, whitelist)
}

/// Builds inline previews of every slice that passes the filter.
pub fn prepare_preview(state: &EditorState, sources: &[RgbaImage]) -> Vec<SlicePreview> {
    ExportSnapshot::from(state).preview(sources)
}

/// Decodes source images from disk, one decode per path.
pub fn decode_sources<P: AsRef<Path> + Sync>(
    paths: &[P],
    enable_parallel: bool,
) -> Result<Vec<RgbaImage>, SplitError> {
    let decode = |path: &P| -> Result<RgbaImage, SplitError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| SplitError::Decode(format!("{}: {}", path.display(), e)))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SplitError::InvalidDimensions { width, height });
        }
        debug!("Decoded {} ({}x{})", path.display(), width, height);
        Ok(image)
    };
    if enable_parallel {
        paths.par_iter().map(decode).collect()
    } else {
        paths.iter().map(decode).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::GuideLine;
    use crate::SplitterConfig;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn state(splits: Splits, parallel: bool) -> EditorState {
        let mut state = EditorState::new(SplitterConfig::new(100, 100, parallel));
        state.splits = splits;
        state
    }

    fn halves() -> Splits {
        Splits::new(
            [GuideLine::new(50.0, 100.0)].into_iter().collect(),
            [GuideLine::new(50.0, 100.0)].into_iter().collect(),
        )
    }

    fn source(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn test_findex_and_sindex_follow_filter_and_whitelist() {
        let splits = Splits::new(
            Default::default(),
            [GuideLine::new(25.0, 100.0)].into_iter().collect(),
        );
        let mut state = state(splits, true);
        state.export.filename_pattern = "{i}-{index}-f{findex}-s{sindex}.png".into();
        state.export.use_filters = true;
        state.export.use_min_width = true;
        state.export.min_width = 50;
        let sizes = [CanvasSize::new(100, 10), CanvasSize::new(200, 10)];

        let all: Vec<String> = ExportSnapshot::from(&state)
            .plan(&sizes, None)
            .into_iter()
            .map(|slice| slice.name)
            .collect();
        assert_eq!(all, vec!["0-1-f0-s0.png", "1-0-f1-s1.png", "1-1-f2-s2.png"]);

        let whitelist: HashSet<String> = ["1-1".to_string(), "0-0".to_string()].into_iter().collect();
        let picked: Vec<String> = ExportSnapshot::from(&state)
            .plan(&sizes, Some(&whitelist))
            .into_iter()
            .map(|slice| slice.name)
            .collect();
        assert_eq!(picked, vec!["1-1-f2-s0.png"]);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let sources = [source(64, 48), source(30, 30)];
        let parallel = export_images(&state(Splits::grid(2, 3), true), &sources, None).unwrap();
        let sequential = export_images(&state(Splits::grid(2, 3), false), &sources, None).unwrap();
        assert_eq!(parallel.entries, sequential.entries);
        assert_eq!(parallel.entries.len(), 24);
    }

    #[test]
    fn test_zero_sized_slices_are_dropped() {
        // Columns of 0.5px, 2px and 2.5px: the first truncates to zero
        let splits = Splits::new(
            Default::default(),
            [GuideLine::new(10.0, 100.0), GuideLine::new(50.0, 100.0)]
                .into_iter()
                .collect(),
        );
        let archive = export_images(&state(splits, true), &[source(5, 3)], None).unwrap();
        assert_eq!(archive.dropped, 1);
        assert_eq!(archive.entries, vec!["image-0-split-1.png", "image-0-split-2.png"]);
    }

    #[test]
    fn test_preview_matches_export_names() {
        let sources = [source(100, 100)];
        let state = state(halves(), true);
        let previews = prepare_preview(&state, &sources);
        let archive = export_images(&state, &sources, None).unwrap();

        let names: Vec<String> = previews.iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, archive.entries);
        assert_eq!(previews[3].key(), "0-3");
        assert!(previews.iter().all(|p| p.width == 50 && p.height == 50));
        assert!(previews[0].data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_archive_name_and_dry_run_are_reported() {
        let mut state = state(halves(), true);
        state.export.zip_name = "tiles.zip".into();
        state.export.dry_run = true;
        let archive = export_images(&state, &[source(10, 10)], None).unwrap();
        assert_eq!(archive.file_name, "tiles.zip");
        assert!(archive.dry_run);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_edits() {
        let mut state = state(halves(), true);
        let snapshot = ExportSnapshot::from(&state);
        state.splits = Splits::default();
        assert_eq!(snapshot.plan(&[CanvasSize::new(10, 10)], None).len(), 4);
    }
}
