use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::*;

use crate::config::SplitterConfig;
use crate::grid::CanvasSize;
use crate::history::HistoryLog;
use crate::options::{pixel_bound, ExportOptions, GuideStyle, SnapSettings};
use crate::preset::PresetData;
use crate::selection::SelectionSet;
use crate::split::{Axis, Splits};

mod command;
mod phase;

pub use command::{
    Command, ExportFlagsPatch, ExportOptionsPatch, GuideStylePatch, SubdivideTarget,
};
pub use phase::{PhaseTransition, SessionPhase};

/// What a dispatched command did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The lines changed and a history entry was appended.
    Recorded,
    /// The state changed without a history entry.
    Applied,
    /// The command was valid but had nothing to do.
    Unchanged,
    /// The command was refused; the state is exactly as before.
    Rejected(RejectReason),
}

impl Dispatch {
    pub fn changed(&self) -> bool {
        matches!(self, Dispatch::Recorded | Dispatch::Applied)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("{axis} axis would exceed {limit} lines")]
    TooManyLines { axis: Axis, limit: usize },

    #[error("not allowed while the session is {phase}")]
    Phase { phase: SessionPhase },
}

/// The single state aggregate of an editing session.
///
/// All mutation goes through [`EditorState::dispatch`], one command at a time.
/// Export and preview read a snapshot of it and never write back.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub active_source: Option<String>,
    pub splits: Splits,
    pub selection: SelectionSet,
    pub history: HistoryLog,
    pub phase: SessionPhase,
    pub style: GuideStyle,
    pub snap: SnapSettings,
    pub canvas_size: CanvasSize,
    pub export: ExportOptions,
    pub config: SplitterConfig,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(SplitterConfig::default())
    }
}

impl EditorState {
    /// Creates an idle editor with no lines and a history holding that empty baseline.
    pub fn new(config: SplitterConfig) -> Self {
        let splits = Splits::default();
        Self {
            active_source: None,
            history: HistoryLog::with_baseline(config.max_history, splits.clone()),
            splits,
            selection: SelectionSet::default(),
            phase: SessionPhase::default(),
            style: GuideStyle::default(),
            snap: SnapSettings::default(),
            canvas_size: CanvasSize::default(),
            export: ExportOptions::default(),
            config,
        }
    }

    /// Captures the current lines and settings as a preset payload.
    pub fn to_preset(&self) -> PresetData {
        PresetData::from(self)
    }

    /// Applies one command.
    ///
    /// A rejected command leaves every field untouched, including history.
    pub fn dispatch(&mut self, command: Command) -> Dispatch {
        let outcome = self
            .guard(&command)
            .and_then(|()| self.apply(command))
            .unwrap_or_else(|reason| {
                warn!("Command rejected: {}", reason);
                Dispatch::Rejected(reason)
            });
        debug!(
            "Dispatch {:?}: h={} v={} history={}/{}",
            outcome,
            self.splits.horizontal.len(),
            self.splits.vertical.len(),
            self.history.offset(),
            self.history.len()
        );
        outcome
    }

    fn guard(&self, command: &Command) -> Result<(), RejectReason> {
        let allowed = if command.edits_geometry() {
            self.phase.accepts_geometry()
        } else if command.replaces_session() {
            self.phase.accepts_session_changes()
        } else {
            true
        };
        if allowed {
            Ok(())
        } else {
            Err(RejectReason::Phase { phase: self.phase })
        }
    }

    fn check_limit(&self, next: &Splits) -> Result<(), RejectReason> {
        match next.exceeding(self.config.max_splits) {
            Some(axis) => Err(RejectReason::TooManyLines {
                axis,
                limit: self.config.max_splits,
            }),
            None => Ok(()),
        }
    }

    fn commit(&mut self, next: Splits, record: bool) -> Result<Dispatch, RejectReason> {
        self.check_limit(&next)?;
        if next == self.splits {
            return Ok(Dispatch::Unchanged);
        }
        self.splits = next;
        if record {
            self.history.record(self.splits.clone());
            Ok(Dispatch::Recorded)
        } else {
            Ok(Dispatch::Applied)
        }
    }

    fn apply(&mut self, command: Command) -> Result<Dispatch, RejectReason> {
        if let Some(transition) = command.phase_transition() {
            return Ok(match self.phase.transition(transition)? {
                Some(next) => {
                    debug!("Session phase {} -> {}", self.phase, next);
                    self.phase = next;
                    Dispatch::Applied
                }
                None => Dispatch::Unchanged,
            });
        }

        let record = command.records_history();
        match command {
            Command::AddLine(axis) => self.commit(self.splits.with_line_added(axis), record),
            Command::RemoveLastLine(axis) => {
                self.commit(self.splits.with_last_removed(axis), record)
            }
            Command::SetLinePosition {
                axis,
                index,
                position,
            } => self.commit(self.splits.with_position(axis, index, position), record),
            Command::Subdivide { target, count } => {
                self.commit(self.splits.subdivided(target.into(), count), record)
            }
            Command::SubdivideFromEmpty(count) => {
                self.commit(Splits::default().subdivided(None, count), record)
            }
            Command::GenerateGrid {
                horizontal,
                vertical,
            } => self.commit(Splits::grid(horizontal, vertical), record),
            Command::SplitIntoTwo(axis) => self.commit(Splits::split_in_two(axis), record),
            Command::Clear => self.commit(Splits::default(), record),
            Command::RemoveSelectedLine => {
                let axis = [Axis::Horizontal, Axis::Vertical]
                    .into_iter()
                    .find(|&axis| !self.selection.axis(axis).is_empty());
                let Some(axis) = axis else {
                    return Ok(Dispatch::Unchanged);
                };
                let next = self.splits.without_indices(axis, self.selection.axis(axis));
                let outcome = self.commit(next, record)?;
                self.selection.clear();
                Ok(outcome)
            }
            Command::RemoveSelectedLines => {
                if self.selection.is_empty() {
                    return Ok(Dispatch::Unchanged);
                }
                let next = self
                    .splits
                    .without_indices(Axis::Horizontal, &self.selection.horizontal)
                    .without_indices(Axis::Vertical, &self.selection.vertical);
                let outcome = self.commit(next, record)?;
                self.selection.clear();
                Ok(outcome)
            }
            Command::Undo => Ok(self.restore(|history| history.undo().cloned())),
            Command::Redo => Ok(self.restore(|history| history.redo().cloned())),
            Command::Checkpoint => {
                if self.history.current() == Some(&self.splits) {
                    return Ok(Dispatch::Unchanged);
                }
                self.history.record(self.splits.clone());
                Ok(Dispatch::Recorded)
            }

            Command::SetSelectedLine { axis, index } => {
                self.selection.select_only(axis, index);
                Ok(Dispatch::Applied)
            }
            Command::ToggleSelectedLine { axis, index, multi } => {
                self.selection.toggle(axis, index, multi);
                Ok(Dispatch::Applied)
            }
            Command::ClearSelection => {
                self.selection.clear();
                Ok(Dispatch::Applied)
            }
            Command::SelectAll => {
                self.selection.select_all(&self.splits);
                Ok(Dispatch::Applied)
            }
            Command::SelectOnlyAxis(axis) => {
                self.selection.select_axis(axis, &self.splits);
                Ok(Dispatch::Applied)
            }

            Command::SetGuidesVisible(visible) => {
                self.style.visible = visible;
                Ok(Dispatch::Applied)
            }
            Command::SetGuideColor(color) => {
                self.style.set_color(&color);
                Ok(Dispatch::Applied)
            }
            Command::SetGuideColors {
                horizontal,
                vertical,
                selected,
            } => {
                if let Some(color) = horizontal {
                    self.style.color_h = color;
                }
                if let Some(color) = vertical {
                    self.style.color_v = color;
                }
                if let Some(color) = selected {
                    self.style.selected_color = color;
                }
                Ok(Dispatch::Applied)
            }
            Command::SetGuideStyle(patch) => {
                if let Some(alpha) = patch.alpha_h {
                    self.style.set_alpha_h(alpha);
                }
                if let Some(alpha) = patch.alpha_v {
                    self.style.set_alpha_v(alpha);
                }
                if let Some(thickness) = patch.thickness_h {
                    self.style.set_thickness_h(thickness);
                }
                if let Some(thickness) = patch.thickness_v {
                    self.style.set_thickness_v(thickness);
                }
                if let Some(alpha) = patch.selected_alpha {
                    self.style.set_selected_alpha(alpha);
                }
                Ok(Dispatch::Applied)
            }
            Command::SetCanvasSize { width, height } => {
                self.canvas_size = CanvasSize::from_measured(width, height);
                Ok(Dispatch::Applied)
            }
            Command::SetSnap { enabled, px } => {
                if let Some(enabled) = enabled {
                    self.snap.enabled = enabled;
                }
                if let Some(px) = px {
                    self.snap.set_px(px);
                }
                Ok(Dispatch::Applied)
            }

            Command::SetExportOptions(patch) => {
                if let Some(name) = patch.zip_name {
                    self.export.zip_name = name;
                }
                if let Some(pattern) = patch.filename_pattern {
                    self.export.filename_pattern = pattern;
                }
                if let Some(width) = patch.min_width {
                    self.export.min_width = pixel_bound(width);
                }
                if let Some(height) = patch.min_height {
                    self.export.min_height = pixel_bound(height);
                }
                if let Some(dry_run) = patch.dry_run {
                    self.export.dry_run = dry_run;
                }
                Ok(Dispatch::Applied)
            }
            Command::SetExportFlags(patch) => {
                let export = &mut self.export;
                let flags = [
                    (patch.use_zip_name, &mut export.use_zip_name),
                    (patch.use_filename_pattern, &mut export.use_filename_pattern),
                    (patch.use_filters, &mut export.use_filters),
                    (patch.use_min_width, &mut export.use_min_width),
                    (patch.use_min_height, &mut export.use_min_height),
                    (patch.use_max_width, &mut export.use_max_width),
                    (patch.use_max_height, &mut export.use_max_height),
                ];
                for (value, field) in flags {
                    if let Some(value) = value {
                        *field = value;
                    }
                }
                Ok(Dispatch::Applied)
            }
            Command::SetExportMax { width, height } => {
                if let Some(width) = width {
                    self.export.max_width = pixel_bound(width);
                }
                if let Some(height) = height {
                    self.export.max_height = pixel_bound(height);
                }
                Ok(Dispatch::Applied)
            }
            Command::ResetExportOptions => {
                self.export.reset();
                Ok(Dispatch::Applied)
            }

            Command::ApplyPreset(data) => {
                let next = data.merged_splits(&self.splits);
                self.check_limit(&next)?;
                data.apply_settings(&mut self.style, &mut self.snap, &mut self.export);
                self.selection.clear();
                Ok(match self.commit(next, record)? {
                    Dispatch::Unchanged => Dispatch::Applied,
                    outcome => outcome,
                })
            }
            Command::HydrateSession(data) => {
                let next = data.merged_splits(&self.splits);
                self.check_limit(&next)?;
                data.apply_settings(&mut self.style, &mut self.snap, &mut self.export);
                self.splits = next;
                Ok(Dispatch::Applied)
            }
            Command::SetActiveSource(source) => {
                debug!("Active source set to {:?}", source);
                self.active_source = source;
                self.history.reset(self.splits.clone());
                Ok(Dispatch::Applied)
            }
            Command::ResetAll => {
                let mut fresh = EditorState::new(self.config.clone());
                fresh.active_source = self.active_source.take();
                fresh.phase = self.phase;
                fresh.canvas_size = self.canvas_size;
                *self = fresh;
                Ok(Dispatch::Applied)
            }

            Command::Activate
            | Command::Deactivate
            | Command::BeginExport
            | Command::FinishExport => Ok(Dispatch::Unchanged),
        }
    }

    fn restore(&mut self, step: impl FnOnce(&mut HistoryLog) -> Option<Splits>) -> Dispatch {
        match step(&mut self.history) {
            Some(snapshot) => {
                self.splits = snapshot;
                Dispatch::Applied
            }
            None => Dispatch::Unchanged,
        }
    }
}

/// Pure form of [`EditorState::dispatch`]: returns the next state and leaves `state` alone.
pub fn reduce(state: &EditorState, command: Command) -> (EditorState, Dispatch) {
    let mut next = state.clone();
    let outcome = next.dispatch(command);
    (next, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::GuideLine;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn active(config: SplitterConfig) -> EditorState {
        let mut editor = EditorState::new(config);
        assert_eq!(editor.dispatch(Command::Activate), Dispatch::Applied);
        editor
    }

    fn grid(horizontal: usize, vertical: usize) -> Command {
        Command::GenerateGrid {
            horizontal,
            vertical,
        }
    }

    #[test]
    fn test_geometry_needs_active_session() {
        let mut editor = EditorState::default();
        let before = editor.clone();
        assert_eq!(
            editor.dispatch(Command::AddLine(Axis::Vertical)),
            Dispatch::Rejected(RejectReason::Phase {
                phase: SessionPhase::Idle
            })
        );
        assert_eq!(editor, before);

        // Styling is fine in any phase
        assert_eq!(editor.dispatch(Command::SetGuidesVisible(false)), Dispatch::Applied);
    }

    #[test]
    fn test_exporting_freezes_geometry_and_session() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(Command::BeginExport);
        assert!(matches!(
            editor.dispatch(Command::Clear),
            Dispatch::Rejected(RejectReason::Phase { .. })
        ));
        assert!(matches!(
            editor.dispatch(Command::SetActiveSource(Some("a.png".into()))),
            Dispatch::Rejected(RejectReason::Phase { .. })
        ));
        assert_eq!(editor.dispatch(Command::FinishExport), Dispatch::Applied);
        assert_eq!(editor.phase, SessionPhase::Active);
    }

    #[test]
    fn test_line_cap_rejects_without_touching_state() {
        let mut editor = active(SplitterConfig::new(3, 100, true));
        editor.dispatch(grid(3, 0));
        let before = editor.clone();

        assert_eq!(
            editor.dispatch(Command::AddLine(Axis::Horizontal)),
            Dispatch::Rejected(RejectReason::TooManyLines {
                axis: Axis::Horizontal,
                limit: 3
            })
        );
        assert_eq!(
            editor.dispatch(Command::Subdivide {
                target: SubdivideTarget::Axis(Axis::Horizontal),
                count: 1
            }),
            Dispatch::Rejected(RejectReason::TooManyLines {
                axis: Axis::Horizontal,
                limit: 3
            })
        );
        assert_eq!(editor, before);
        assert_eq!(editor.dispatch(Command::AddLine(Axis::Vertical)), Dispatch::Recorded);
    }

    #[test]
    fn test_first_edit_is_undoable() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(Command::AddLine(Axis::Horizontal));
        assert_eq!(editor.dispatch(Command::Undo), Dispatch::Applied);
        assert_eq!(editor.splits, Splits::default());
        assert_eq!(editor.dispatch(Command::Undo), Dispatch::Unchanged);
        assert_eq!(editor.dispatch(Command::Redo), Dispatch::Applied);
        assert_eq!(editor.splits.horizontal.len(), 1);
        assert_eq!(editor.dispatch(Command::Redo), Dispatch::Unchanged);
    }

    #[test]
    fn test_drag_records_only_at_checkpoints() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(Command::AddLine(Axis::Vertical));
        assert_eq!(editor.history.len(), 2);

        // mouse-down on an already recorded state adds nothing
        assert_eq!(editor.dispatch(Command::Checkpoint), Dispatch::Unchanged);
        for position in [55.0, 60.0, 65.0] {
            let outcome = editor.dispatch(Command::SetLinePosition {
                axis: Axis::Vertical,
                index: 0,
                position,
            });
            assert_eq!(outcome, Dispatch::Applied);
        }
        assert_eq!(editor.history.len(), 2);

        assert_eq!(editor.dispatch(Command::Checkpoint), Dispatch::Recorded);
        editor.dispatch(Command::Undo);
        assert_eq!(editor.splits.vertical[0], GuideLine::new(50.0, 100.0));
    }

    #[test]
    fn test_nan_drag_is_unchanged() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(Command::AddLine(Axis::Horizontal));
        let outcome = editor.dispatch(Command::SetLinePosition {
            axis: Axis::Horizontal,
            index: 0,
            position: f64::NAN,
        });
        assert_eq!(outcome, Dispatch::Unchanged);
        assert_eq!(editor.splits.horizontal[0].position, 50.0);
    }

    #[test]
    fn test_undo_property_for_k_edits() {
        let mut editor = active(SplitterConfig::default());
        let edits = [
            Command::AddLine(Axis::Horizontal),
            Command::AddLine(Axis::Vertical),
            Command::Subdivide {
                target: SubdivideTarget::Both,
                count: 2,
            },
            Command::RemoveLastLine(Axis::Vertical),
            Command::SplitIntoTwo(Axis::Vertical),
            grid(4, 1),
        ];
        let k = edits.len();
        for edit in edits {
            assert_eq!(editor.dispatch(edit), Dispatch::Recorded);
        }
        let after = editor.splits.clone();

        for _ in 0..k {
            editor.dispatch(Command::Undo);
        }
        assert_eq!(editor.splits, Splits::default());
        for _ in 0..k {
            editor.dispatch(Command::Redo);
        }
        assert_eq!(editor.splits, after);
    }

    #[test]
    fn test_history_eviction() {
        let max_history = 10;
        let mut editor = active(SplitterConfig::new(1000, max_history, true));
        for count in 1..=max_history + 5 {
            editor.dispatch(grid(count, 0));
        }
        assert_eq!(editor.history.len(), max_history);

        for _ in 0..max_history - 1 {
            assert_eq!(editor.dispatch(Command::Undo), Dispatch::Applied);
        }
        assert_eq!(editor.splits, Splits::grid(6, 0));
        assert_eq!(editor.dispatch(Command::Undo), Dispatch::Unchanged);
    }

    #[test]
    fn test_remove_selected_line_uses_first_selected_axis() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(grid(3, 2));
        editor.dispatch(Command::ToggleSelectedLine {
            axis: Axis::Horizontal,
            index: 1,
            multi: true,
        });
        editor.dispatch(Command::ToggleSelectedLine {
            axis: Axis::Vertical,
            index: 0,
            multi: true,
        });

        assert_eq!(editor.dispatch(Command::RemoveSelectedLine), Dispatch::Recorded);
        assert_eq!(editor.splits.horizontal.len(), 2);
        assert_eq!(editor.splits.vertical.len(), 2);
        assert!(editor.selection.is_empty());
        assert_eq!(editor.dispatch(Command::RemoveSelectedLine), Dispatch::Unchanged);
    }

    #[test]
    fn test_remove_selected_lines_on_both_axes() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(grid(3, 2));
        editor.dispatch(Command::SelectAll);
        editor.dispatch(Command::ToggleSelectedLine {
            axis: Axis::Horizontal,
            index: 0,
            multi: true,
        });

        assert_eq!(editor.dispatch(Command::RemoveSelectedLines), Dispatch::Recorded);
        assert_eq!(editor.splits.horizontal.len(), 1);
        assert!(editor.splits.vertical.is_empty());
        assert!(editor.selection.is_empty());
    }

    #[test]
    fn test_apply_preset_records_and_clears_selection() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(Command::AddLine(Axis::Horizontal));
        editor.dispatch(Command::SetSelectedLine {
            axis: Axis::Horizontal,
            index: 0,
        });
        let preset = PresetData {
            vertical_split: Some(vec![GuideLine::new(120.0, 100.0)]),
            snap_enabled: Some(true),
            ..Default::default()
        };

        assert_eq!(editor.dispatch(Command::ApplyPreset(preset)), Dispatch::Recorded);
        assert_eq!(editor.splits.vertical[0].position, 100.0);
        assert_eq!(editor.splits.horizontal.len(), 1);
        assert!(editor.snap.enabled);
        assert!(editor.selection.is_empty());
    }

    #[test]
    fn test_oversized_preset_is_rejected_entirely() {
        let mut editor = active(SplitterConfig::new(2, 100, true));
        let before = editor.clone();
        let preset = PresetData {
            horizontal_split: Some(vec![GuideLine::new(10.0, 100.0); 3]),
            guides_visible: Some(false),
            ..Default::default()
        };
        assert!(matches!(
            editor.dispatch(Command::HydrateSession(preset)),
            Dispatch::Rejected(RejectReason::TooManyLines { .. })
        ));
        assert_eq!(editor, before);
    }

    #[test]
    fn test_hydrate_does_not_record() {
        let mut editor = EditorState::default();
        let preset = PresetData {
            horizontal_split: Some(vec![GuideLine::new(25.0, 100.0)]),
            ..Default::default()
        };
        assert_eq!(editor.dispatch(Command::HydrateSession(preset)), Dispatch::Applied);
        assert_eq!(editor.splits.horizontal.len(), 1);
        assert_eq!(editor.history.len(), 1);
    }

    #[test]
    fn test_set_active_source_resets_history() {
        let mut editor = active(SplitterConfig::default());
        editor.dispatch(grid(1, 1));
        editor.dispatch(grid(2, 2));
        editor.dispatch(Command::SetActiveSource(Some("photo.png".into())));

        assert_eq!(editor.history.len(), 1);
        assert_eq!(editor.history.current(), Some(&Splits::grid(2, 2)));
        assert_eq!(editor.dispatch(Command::Undo), Dispatch::Unchanged);
    }

    #[test]
    fn test_reset_all_keeps_source_and_phase() {
        let mut editor = active(SplitterConfig::new(7, 9, false));
        editor.dispatch(Command::SetActiveSource(Some("photo.png".into())));
        editor.dispatch(grid(2, 2));
        editor.dispatch(Command::SetExportFlags(ExportFlagsPatch {
            use_filters: Some(true),
            ..Default::default()
        }));

        assert_eq!(editor.dispatch(Command::ResetAll), Dispatch::Applied);
        assert_eq!(editor.active_source.as_deref(), Some("photo.png"));
        assert_eq!(editor.phase, SessionPhase::Active);
        assert_eq!(editor.splits, Splits::default());
        assert!(!editor.export.use_filters);
        assert_eq!(editor.config, SplitterConfig::new(7, 9, false));
        assert_eq!(editor.history.len(), 1);
    }

    #[test]
    fn test_option_setters_round_and_clamp() {
        let mut editor = EditorState::default();
        editor.dispatch(Command::SetCanvasSize {
            width: 799.7,
            height: -4.0,
        });
        editor.dispatch(Command::SetExportOptions(ExportOptionsPatch {
            min_width: Some(0.3),
            min_height: Some(20.6),
            ..Default::default()
        }));
        editor.dispatch(Command::SetExportMax {
            width: Some(-5.0),
            height: None,
        });
        editor.dispatch(Command::SetGuideStyle(GuideStylePatch {
            selected_alpha: Some(2.0),
            thickness_h: Some(5.4),
            ..Default::default()
        }));

        assert_eq!(editor.canvas_size, CanvasSize::new(799, 0));
        assert_eq!((editor.export.min_width, editor.export.min_height), (1, 21));
        assert_eq!((editor.export.max_width, editor.export.max_height), (1, u32::MAX));
        assert_eq!(editor.style.selected_alpha, 1.0);
        assert_eq!(editor.style.thickness_h, 5);
        assert_eq!(editor.history.len(), 1);
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let editor = active(SplitterConfig::default());
        let (next, outcome) = reduce(&editor, Command::AddLine(Axis::Horizontal));
        assert_eq!(outcome, Dispatch::Recorded);
        assert!(editor.splits.is_empty());
        assert_eq!(next.splits.horizontal.len(), 1);
    }

    proptest! {
        #[test]
        fn test_line_cap_never_exceeded_proptest(
            ops in prop::collection::vec((0..6u8, 0..4usize), 1..60),
            max_splits in 1..12usize,
        ) {
            let mut editor = active(SplitterConfig::new(max_splits, 20, true));
            for (op, n) in ops {
                let command = match op {
                    0 => Command::AddLine(Axis::Horizontal),
                    1 => Command::AddLine(Axis::Vertical),
                    2 => Command::Subdivide { target: SubdivideTarget::Both, count: n },
                    3 => grid(n * 3, n),
                    4 => Command::Undo,
                    _ => Command::Redo,
                };
                editor.dispatch(command);
                prop_assert!(editor.splits.horizontal.len() <= max_splits);
                prop_assert!(editor.splits.vertical.len() <= max_splits);
                prop_assert!(editor.history.offset() < editor.history.len());
            }
        }
    }
}
