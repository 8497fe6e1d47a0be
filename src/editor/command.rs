use super::*;

/// Which axes a subdivision applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivideTarget {
    Both,
    Axis(Axis),
}

impl From<SubdivideTarget> for Option<Axis> {
    fn from(target: SubdivideTarget) -> Self {
        match target {
            SubdivideTarget::Both => None,
            SubdivideTarget::Axis(axis) => Some(axis),
        }
    }
}

/// Partial update of the free-form export options. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptionsPatch {
    pub zip_name: Option<String>,
    pub filename_pattern: Option<String>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub dry_run: Option<bool>,
}

/// Partial update of the export enable flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportFlagsPatch {
    pub use_zip_name: Option<bool>,
    pub use_filename_pattern: Option<bool>,
    pub use_filters: Option<bool>,
    pub use_min_width: Option<bool>,
    pub use_min_height: Option<bool>,
    pub use_max_width: Option<bool>,
    pub use_max_height: Option<bool>,
}

/// Partial update of guide alphas and thicknesses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GuideStylePatch {
    pub alpha_h: Option<f64>,
    pub alpha_v: Option<f64>,
    pub thickness_h: Option<f64>,
    pub thickness_v: Option<f64>,
    pub selected_alpha: Option<f64>,
}

/// Everything the host can ask the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddLine(Axis),
    RemoveLastLine(Axis),
    /// Moves one line without recording history; pair with [`Command::Checkpoint`].
    SetLinePosition {
        axis: Axis,
        index: usize,
        position: f64,
    },
    Subdivide {
        target: SubdivideTarget,
        count: usize,
    },
    /// Regenerates both axes by subdividing empty sequences `count` times.
    SubdivideFromEmpty(usize),
    GenerateGrid {
        horizontal: usize,
        vertical: usize,
    },
    SplitIntoTwo(Axis),
    Clear,
    /// Removes the selected lines of the first axis that has a selection.
    RemoveSelectedLine,
    /// Removes the selected lines of both axes.
    RemoveSelectedLines,
    Undo,
    Redo,
    /// Records the current lines as a history entry.
    Checkpoint,

    SetSelectedLine {
        axis: Axis,
        index: usize,
    },
    ToggleSelectedLine {
        axis: Axis,
        index: usize,
        multi: bool,
    },
    ClearSelection,
    SelectAll,
    SelectOnlyAxis(Axis),

    SetGuidesVisible(bool),
    SetGuideColor(String),
    SetGuideColors {
        horizontal: Option<String>,
        vertical: Option<String>,
        selected: Option<String>,
    },
    SetGuideStyle(GuideStylePatch),
    SetCanvasSize {
        width: f64,
        height: f64,
    },
    SetSnap {
        enabled: Option<bool>,
        px: Option<f64>,
    },

    SetExportOptions(ExportOptionsPatch),
    SetExportFlags(ExportFlagsPatch),
    SetExportMax {
        width: Option<f64>,
        height: Option<f64>,
    },
    ResetExportOptions,

    ApplyPreset(PresetData),
    HydrateSession(PresetData),
    SetActiveSource(Option<String>),

    Activate,
    Deactivate,
    BeginExport,
    FinishExport,
    ResetAll,
}

impl Command {
    /// Whether a successful run of this command appends a history entry.
    pub fn records_history(&self) -> bool {
        matches!(
            self,
            Command::AddLine(_)
                | Command::RemoveLastLine(_)
                | Command::Subdivide { .. }
                | Command::SubdivideFromEmpty(_)
                | Command::GenerateGrid { .. }
                | Command::SplitIntoTwo(_)
                | Command::Clear
                | Command::RemoveSelectedLine
                | Command::RemoveSelectedLines
                | Command::Checkpoint
                | Command::ApplyPreset(_)
        )
    }

    /// Whether this command edits the lines and therefore needs an active session.
    pub fn edits_geometry(&self) -> bool {
        self.records_history()
            || matches!(
                self,
                Command::SetLinePosition { .. } | Command::Undo | Command::Redo
            )
    }

    pub(super) fn phase_transition(&self) -> Option<PhaseTransition> {
        match self {
            Command::Activate => Some(PhaseTransition::Activate),
            Command::Deactivate => Some(PhaseTransition::Deactivate),
            Command::BeginExport => Some(PhaseTransition::BeginExport),
            Command::FinishExport => Some(PhaseTransition::FinishExport),
            _ => None,
        }
    }

    pub(super) fn replaces_session(&self) -> bool {
        matches!(
            self,
            Command::HydrateSession(_) | Command::SetActiveSource(_) | Command::ResetAll
        )
    }
}
