use gate_core::outcome::ExclusionMode;

/// Text conversion for configuration fields.
pub trait ConfigValue: Sized {
    /// Parse raw configuration text, `None` when it is not a valid value.
    fn parse_config(raw: &str) -> Option<Self>;

    /// Render the value so that `parse_config` returns it unchanged.
    fn format_config(&self) -> String;
}

impl ConfigValue for f64 {
    /// NaN is rejected: no range can contain it.
    fn parse_config(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().filter(|value: &f64| !value.is_nan())
    }

    fn format_config(&self) -> String {
        format_f64(*self)
    }
}

impl ConfigValue for bool {
    fn parse_config(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Some(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn format_config(&self) -> String {
        self.to_string()
    }
}

impl ConfigValue for String {
    fn parse_config(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn format_config(&self) -> String {
        self.clone()
    }
}

impl ConfigValue for ExclusionMode {
    fn parse_config(raw: &str) -> Option<Self> {
        ExclusionMode::parse(raw)
    }

    fn format_config(&self) -> String {
        self.as_str().to_string()
    }
}

/// Shortest text that parses back to exactly `value`.
///
/// Magnitudes outside `[1e-5, 1e16)` use scientific notation so the
/// unbounded defaults stay readable.
pub fn format_f64(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}
