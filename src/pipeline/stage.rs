//! Pipeline state machine.

use crate::pipeline::error::FailureKind;

/// Where a pipeline run is.
///
/// Runs only move forward: `Idle → Extracting → Parsing → Validating →
/// Building → Signing → Broadcasting → Succeeded`, or to `Failed` from any
/// working stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Extracting,
    Parsing,
    Validating,
    Building,
    Signing,
    Broadcasting,
    Succeeded,
    Failed(FailureKind),
}

impl PipelineStage {
    /// Position in the forward order; terminal states share the last slot.
    fn ordinal(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Extracting => 1,
            Self::Parsing => 2,
            Self::Validating => 3,
            Self::Building => 4,
            Self::Signing => 5,
            Self::Broadcasting => 6,
            Self::Succeeded | Self::Failed(_) => 7,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    /// Whether `next` is a legal transition from `self`.
    pub fn can_advance_to(&self, next: PipelineStage) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Failed(_) => !matches!(self, Self::Idle),
            Self::Succeeded => matches!(self, Self::Broadcasting),
            _ => next.ordinal() == self.ordinal() + 1,
        }
    }
}
