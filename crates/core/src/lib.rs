//! Core outcome types, bounds, and shared primitives for the experiment gate workspace.

/// Compiled-in defaults applied when a configuration leaves a field unspecified.
pub mod constants {
    /// Reference body a condition targets when none is configured.
    pub const DEFAULT_BODY: &str = "kerbin";
    /// Lower eccentricity bound (circular orbit).
    pub const ECCENTRICITY_MIN: f64 = 0.0;
    /// Upper eccentricity bound (parabolic escape).
    pub const ECCENTRICITY_MAX: f64 = 1.0;
    /// Lower inclination bound in degrees.
    pub const INCLINATION_MIN_DEG: f64 = 0.0;
    /// Upper inclination bound in degrees.
    pub const INCLINATION_MAX_DEG: f64 = 180.0;
    /// Lower orbital speed bound (m/s).
    pub const SPEED_MIN_M_S: f64 = 0.0;
    /// Widest representable lower limit.
    pub const UNBOUNDED_LOW: f64 = f64::MIN;
    /// Widest representable upper limit.
    pub const UNBOUNDED_HIGH: f64 = f64::MAX;
    /// Default multiplier on the host's data collection rate.
    pub const DATA_RATE_MODIFIER: f64 = 1.0;
    /// Default multiplier on the host's maximum collectable data.
    pub const MAXIMUM_DATA_MODIFIER: f64 = 1.0;
    /// Default additive bonus on the host's maximum collectable data.
    pub const MAXIMUM_DATA_BONUS: f64 = 0.0;
}

/// Evaluation outcomes and the requirement/restriction state machine.
pub mod outcome {
    use std::fmt;

    use serde::Serialize;

    /// Result of evaluating a condition for one tick.
    ///
    /// Variants are declared in increasing severity so `Ord` gives the
    /// aggregation precedence directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Outcome {
        /// The activity may proceed.
        Valid,
        /// The activity must wait; nothing accumulated is lost.
        Invalid,
        /// Accumulated progress must be discarded.
        Reset,
        /// The activity must be aborted.
        Failed,
    }

    impl Outcome {
        pub fn as_str(&self) -> &'static str {
            match self {
                Outcome::Valid => "valid",
                Outcome::Invalid => "invalid",
                Outcome::Reset => "reset",
                Outcome::Failed => "failed",
            }
        }
    }

    impl fmt::Display for Outcome {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Severity applied when a restriction's forbidden state is occurring.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ExclusionMode {
        /// Treat as not-yet-valid and retry on a later tick.
        #[default]
        None,
        /// Discard accumulated progress.
        Reset,
        /// Abort the activity.
        Fail,
    }

    impl ExclusionMode {
        /// Parse a configured mode, ignoring case and surrounding whitespace.
        ///
        /// Returns `None` for text that names no known mode.
        pub fn parse(s: &str) -> Option<Self> {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                Some(ExclusionMode::None)
            } else if trimmed.eq_ignore_ascii_case("reset") {
                Some(ExclusionMode::Reset)
            } else if trimmed.eq_ignore_ascii_case("fail") {
                Some(ExclusionMode::Fail)
            } else {
                None
            }
        }

        pub fn as_str(&self) -> &'static str {
            match self {
                ExclusionMode::None => "none",
                ExclusionMode::Reset => "reset",
                ExclusionMode::Fail => "fail",
            }
        }
    }

    impl fmt::Display for ExclusionMode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Map a condition's raw `satisfied` flag to an [`Outcome`].
    ///
    /// Requirements pass when satisfied. Restrictions pass when their
    /// forbidden state is absent; when it is present, `exclusion` picks the
    /// severity. `exclusion` is ignored for requirements.
    pub fn resolve_outcome(
        satisfied: bool,
        is_restriction: bool,
        exclusion: ExclusionMode,
    ) -> Outcome {
        match (is_restriction, satisfied) {
            (false, true) => Outcome::Valid,
            (false, false) => Outcome::Invalid,
            (true, false) => Outcome::Valid,
            (true, true) => match exclusion {
                ExclusionMode::Reset => Outcome::Reset,
                ExclusionMode::Fail => Outcome::Failed,
                ExclusionMode::None => Outcome::Invalid,
            },
        }
    }

    /// Combine per-condition outcomes, most severe first. An empty input is `Valid`.
    pub fn aggregate<I>(outcomes: I) -> Outcome
    where
        I: IntoIterator<Item = Outcome>,
    {
        outcomes.into_iter().max().unwrap_or(Outcome::Valid)
    }
}

/// Inclusive numeric ranges used by condition sub-checks.
pub mod bounds {
    use super::constants::{UNBOUNDED_HIGH, UNBOUNDED_LOW};

    /// Closed interval `[min, max]`.
    ///
    /// Inverted ranges (`min > max`) are kept as configured; they contain no
    /// value, so any sub-check against them always fails.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct InclusiveRange {
        pub min: f64,
        pub max: f64,
    }

    impl InclusiveRange {
        #[inline]
        pub const fn new(min: f64, max: f64) -> Self {
            Self { min, max }
        }

        /// Range spanning every finite value.
        #[inline]
        pub const fn unbounded() -> Self {
            Self::new(UNBOUNDED_LOW, UNBOUNDED_HIGH)
        }

        /// Whether `value` lies within the range, bounds included. NaN is never contained.
        #[inline]
        pub fn contains(&self, value: f64) -> bool {
            self.min <= value && value <= self.max
        }

        #[inline]
        pub fn is_inverted(&self) -> bool {
            self.min > self.max
        }
    }

    /// Whether a limit sits at the edge of representable values.
    #[inline]
    pub fn is_unbounded(limit: f64) -> bool {
        limit.is_infinite() || limit <= UNBOUNDED_LOW || limit >= UNBOUNDED_HIGH
    }
}
