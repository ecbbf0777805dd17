//! Query timing phases and their display names.
//!
//! The set of phases is closed. Each phase carries a stable integer code
//! (its declaration index) so that codes produced by other components can be
//! resolved to a name without failing, see [`display_name_for_code`].

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use utoipa::ToSchema;

use crate::error::StatsError;

/// Name returned for codes outside the declared phase set.
pub const UNKNOWN_PHASE_NAME: &str = "Unknown query timing";

/// A category of query execution time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[repr(i32)]
pub enum Phase {
    /// Total time spent evaluating the query.
    EvalTotal = 0,
    /// Sorting of the final result.
    ResultSort = 1,
    /// Parsing and preparing the query before evaluation.
    QueryPreparation = 2,
    /// Evaluation proper, excluding preparation.
    InnerEval = 3,
    /// Appending evaluated values to the result.
    ResultAppend = 4,
    /// Waiting in the execution queue for a free slot.
    ExecQueueWait = 5,
    /// Total time from submission to completion.
    ExecTotal = 6,
}

impl Phase {
    /// Human-readable label, e.g. `"Exec queue wait time"`.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::EvalTotal => "Eval total time",
            Self::ResultSort => "Result sorting time",
            Self::QueryPreparation => "Query preparation time",
            Self::InnerEval => "Inner eval time",
            Self::ResultAppend => "Result append time",
            Self::ExecQueueWait => "Exec queue wait time",
            Self::ExecTotal => "Exec total time",
        }
    }

    /// The variant identifier, e.g. `"ExecQueueWait"`.
    pub fn identifier(self) -> &'static str {
        self.into()
    }

    /// Stable integer code, equal to the declaration index.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// The phase with integer code `code`, or `None` outside `0..=6`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::EvalTotal),
            1 => Some(Self::ResultSort),
            2 => Some(Self::QueryPreparation),
            3 => Some(Self::InnerEval),
            4 => Some(Self::ResultAppend),
            5 => Some(Self::ExecQueueWait),
            6 => Some(Self::ExecTotal),
            _ => None,
        }
    }
}

/// Resolve a raw phase code to its display name.
///
/// Never fails: codes outside the declared set yield [`UNKNOWN_PHASE_NAME`].
pub const fn display_name_for_code(code: i32) -> &'static str {
    match Phase::from_code(code) {
        Some(phase) => phase.display_name(),
        None => UNKNOWN_PHASE_NAME,
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.display_name())
    }
}

impl TryFrom<i32> for Phase {
    type Error = StatsError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Phase::from_code(code).ok_or(StatsError::UnknownPhaseCode(code))
    }
}

impl From<Phase> for i32 {
    fn from(phase: Phase) -> Self {
        phase.code()
    }
}

impl FromStr for Phase {
    type Err = StatsError;

    /// Parses the variant identifier, e.g. `"InnerEval"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::iter()
            .find(|phase| phase.identifier() == s)
            .ok_or_else(|| StatsError::UnknownPhase(s.to_string()))
    }
}
