use super::*;

/// Where the editing session currently is.
///
/// Geometry edits are only accepted while `Active`; `Exporting` freezes the
/// session until the export finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Exporting,
}

impl SessionPhase {
    pub fn accepts_geometry(self) -> bool {
        self == SessionPhase::Active
    }

    /// Whether commands that replace the whole session (hydrate, reset, new source) may run.
    pub fn accepts_session_changes(self) -> bool {
        self != SessionPhase::Exporting
    }

    /// Computes the phase a transition command leads to.
    ///
    /// `Ok(None)` means the command is valid but the phase does not move.
    ///
    /// # Example
    /// ```
    /// use gridcut::editor::PhaseTransition;
    /// use gridcut::SessionPhase;
    ///
    /// let next = SessionPhase::Active.transition(PhaseTransition::BeginExport);
    /// assert_eq!(next, Ok(Some(SessionPhase::Exporting)));
    /// assert!(SessionPhase::Idle.transition(PhaseTransition::BeginExport).is_err());
    /// ```
    pub fn transition(self, transition: PhaseTransition) -> Result<Option<Self>, RejectReason> {
        use PhaseTransition::*;
        use SessionPhase::*;

        let next = match (self, transition) {
            (Exporting, Activate | Deactivate) => return Err(RejectReason::Phase { phase: self }),
            (_, BeginExport) if self != Active => return Err(RejectReason::Phase { phase: self }),
            (Idle, Activate) => Active,
            (Active, Deactivate) => Idle,
            (Active, BeginExport) => Exporting,
            (Exporting, FinishExport) => Active,
            _ => self,
        };
        Ok((next != self).then_some(next))
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => f.write_str("idle"),
            SessionPhase::Active => f.write_str("active"),
            SessionPhase::Exporting => f.write_str("exporting"),
        }
    }
}

/// The commands that move the session between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTransition {
    Activate,
    Deactivate,
    BeginExport,
    FinishExport,
}
