//! This crate cuts images into rectangular slices along movable guide lines.
//! Guide lines live in a percent-of-canvas split model with a bounded undo/redo history;
//! at export time the lines are turned into pixel rectangles that are filtered, named,
//! rendered with the `image` crate and bundled into a zip archive.

/// Bundles named slice images into a single zip payload.
///
/// # Example
/// ```
/// use gridcut::archive::ArchiveAssembler;
///
/// let mut archive = ArchiveAssembler::new();
/// archive.insert("image-0-split-0.png", vec![1, 2, 3]);
/// let bytes = archive.finish().unwrap();
/// assert!(!bytes.is_empty());
/// ```
pub mod archive;
/// Limits and switches shared by the editor and the export pipeline.
pub mod config;
/// The editor state aggregate and its command dispatcher.
///
/// # Example
/// ```
/// use gridcut::{Axis, Command, Dispatch, EditorState};
///
/// let mut editor = EditorState::default();
/// editor.dispatch(Command::Activate);
/// assert_eq!(editor.dispatch(Command::AddLine(Axis::Horizontal)), Dispatch::Recorded);
/// assert_eq!(editor.splits.horizontal.len(), 1);
/// ```
pub mod editor;
/// End-to-end export and preview pipeline.
pub mod export;
/// Size constraints applied to candidate slices.
pub mod filter;
/// Conversion of guide lines into pixel rectangles.
///
/// # Example
/// ```
/// use gridcut::{CanvasSize, GuideLine, Partition, Splits};
///
/// let splits = Splits::new(
///     [GuideLine::new(50.0, 100.0)].into_iter().collect(),
///     [GuideLine::new(50.0, 100.0)].into_iter().collect(),
/// );
/// let partition = Partition::from_splits(&splits, CanvasSize::new(100, 100));
/// assert_eq!(partition.candidates(0).count(), 4);
/// ```
pub mod grid;
pub mod history;
/// File-name templates for exported slices.
pub mod naming;
/// Export options and guide styling.
pub mod options;
/// Versioned preset and session payloads.
pub mod preset;
/// Cutting candidates out of a source raster and encoding them.
pub mod render;
pub mod selection;
/// The split model: guide lines per axis and the algorithms that generate them.
pub mod split;

use smallvec::SmallVec;
use thiserror::Error;

pub use config::SplitterConfig;
pub use editor::{Command, Dispatch, EditorState, RejectReason, SessionPhase};
pub use export::{export_images, prepare_preview, ExportArchive, SlicePreview};
pub use filter::SizeFilter;
pub use grid::{normalize, CanvasSize, Candidate, Cell, Column, Partition, Row};
pub use history::HistoryLog;
pub use naming::{NameTemplate, NameVars};
pub use options::{ExportOptions, GuideStyle, SnapSettings};
pub use preset::PresetData;
pub use selection::SelectionSet;
pub use split::{Axis, GuideLine, SplitLines, Splits};

// Most editing sessions stay well below this many lines per axis
const DEFAULT_SMALLVEC_SIZE: usize = 32;
/// Per-axis line cap used when no configuration is supplied.
pub const DEFAULT_MAX_SPLITS: usize = 100;
/// Undo depth used when no configuration is supplied.
pub const DEFAULT_MAX_HISTORY: usize = 100;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Slice {key} has no pixels ({width}x{height})")]
    EmptySlice {
        key: String,
        width: u32,
        height: u32,
    },

    #[error("Failed to decode source image: {0}")]
    Decode(String),

    #[error("Failed to encode slice: {0}")]
    Encode(String),

    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed preset: {0}")]
    MalformedPreset(String),

    #[error("Unsupported preset version {found} (newest supported is {supported})")]
    UnsupportedPresetVersion { found: u32, supported: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A type alias for SmallVec with an optimized stack-allocated buffer size.
pub type SmallVecLine<T> = SmallVec<[T; DEFAULT_SMALLVEC_SIZE]>;
