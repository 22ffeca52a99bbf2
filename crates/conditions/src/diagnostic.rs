//! Human-readable explanation of a condition's sub-checks.

use std::fmt::{self, Write};

use gate_core::bounds::{InclusiveRange, is_unbounded};
use gate_core::outcome::ExclusionMode;

/// Multi-line text rebuilt on every evaluation.
///
/// The buffer is reused between ticks, so steady-state evaluation does not allocate.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticText {
    text: String,
}

impl DiagnosticText {
    /// Clear the text and write the title plus the requirement/restriction preamble.
    pub fn begin(&mut self, title: &str, is_restriction: bool, exclusion: ExclusionMode) {
        self.text.clear();
        self.text.push_str(title);
        let preamble = match (is_restriction, exclusion) {
            (false, _) => "The following conditions must be met.",
            (true, ExclusionMode::Reset) => {
                "The following conditions must not be met. If they are, the experiment will be reset."
            }
            (true, ExclusionMode::Fail) => {
                "The following conditions must not be met. If they are, the experiment will fail."
            }
            (true, ExclusionMode::None) => "The following conditions must not be met.",
        };
        self.line(format_args!("{preamble}"));
    }

    /// Sub-check comparing a configured name to the live one.
    pub fn equals(&mut self, label: &str, expected: &str, current: &str) {
        self.line(format_args!("{label} equal to {expected}. Currently {current}"));
    }

    /// Sub-check testing a live value against an inclusive range.
    pub fn range(&mut self, label: &str, range: InclusiveRange, current: f64) {
        self.line(format_args!(
            "{label} between {} and {}. Currently {current:.2}",
            Limit(range.min),
            Limit(range.max),
        ));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        self.text.push('\n');
        // Writing into a String cannot fail.
        let _ = self.text.write_fmt(args);
    }
}

impl fmt::Display for DiagnosticText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

struct Limit(f64);

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_unbounded(self.0) {
            f.write_str(if self.0 < 0.0 { "-inf" } else { "inf" })
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}
