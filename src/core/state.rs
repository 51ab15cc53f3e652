//! Cell states - immutable descriptors of one condition a cell may be in.
//!
//! A [`State`] carries an ordinal `value`, a one-character `glyph` and a
//! display [`Color`]. States are validated on construction and never change
//! afterwards, so they are shared between cells as `Arc<State>`.
//!
//! ## Equality vs. Identity
//!
//! Two states compare equal (`==`) when their values match, whatever their
//! glyph or color. Cells do **not** use this relation for their registries:
//! a cell only accepts the exact `Arc` instance that was registered
//! (`Arc::ptr_eq`). See [`Cell`](super::Cell).
//!
//! ## DEAD
//!
//! [`DEAD`] (value 0, blank glyph, neutral color) is a process-wide shared
//! instance. Every fresh cell starts in it.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::error::ValidationError;

/// The canonical dead state: value `0`, glyph `' '`, color `Color::Default`.
///
/// Initialized once on first access and shared read-only afterwards.
pub static DEAD: Lazy<Arc<State>> = Lazy::new(|| {
    Arc::new(State {
        value: 0,
        glyph: ' ',
        color: Color::Default,
    })
});

/// One possible condition of a cell.
///
/// ## Example
///
/// ```
/// use ca_cell::{Color, State};
///
/// let alive = State::new(1, "•", Color::Green).unwrap();
/// assert_eq!(alive.value(), 1);
/// assert_eq!(alive.render(), "\x1b[32m•\x1b[0m");
///
/// // Equality only looks at the value.
/// let other = State::new(1, "#", Color::Red).unwrap();
/// assert_eq!(alive, other);
///
/// assert!(State::new(-1, "•", Color::Green).is_err());
/// assert!(State::new(1, "••", Color::Green).is_err());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "StateSpec")]
pub struct State {
    value: u64,
    glyph: char,
    color: Color,
}

impl State {
    /// Create a validated state.
    ///
    /// Fails when `value` is negative, or when `glyph` is not exactly one
    /// printable character. Nothing is constructed on failure.
    pub fn new(value: i64, glyph: &str, color: Color) -> Result<Self, ValidationError> {
        let value = u64::try_from(value).map_err(|_| ValidationError::NegativeValue(value))?;
        Self::from_ordinal(value, glyph, color)
    }

    fn from_ordinal(value: u64, glyph: &str, color: Color) -> Result<Self, ValidationError> {
        let glyph = check_glyph(glyph)?;
        Ok(Self { value, glyph, color })
    }

    /// Create a validated state in the fallback color (`White`).
    pub fn with_glyph(value: i64, glyph: &str) -> Result<Self, ValidationError> {
        Self::new(value, glyph, Color::FALLBACK)
    }

    /// A handle to the shared [`DEAD`] instance.
    ///
    /// Every call returns the same allocation.
    #[must_use]
    pub fn dead() -> Arc<State> {
        Arc::clone(&DEAD)
    }

    /// Ordinal value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Raw glyph, without color.
    #[must_use]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Colored glyph: color escape, glyph, then the neutral reset escape.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn check_glyph(glyph: &str) -> Result<char, ValidationError> {
    let mut chars = glyph.chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(ValidationError::GlyphLength {
                len: glyph.chars().count(),
            })
        }
    };
    if c.is_control() {
        return Err(ValidationError::NonPrintableGlyph(c));
    }
    Ok(c)
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.color.escape(),
            self.glyph,
            Color::Default.escape()
        )
    }
}

/// 2^64, the first float above the ordinal range.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Unvalidated state description, as found in configuration files.
///
/// Values arrive as arbitrary JSON numbers and colors as free-form names, so
/// this is where non-integer values and unknown colors are caught.
///
/// ```
/// use ca_cell::{State, StateSpec};
///
/// let spec: StateSpec = serde_json::from_str(r#"{"value": 2, "glyph": "o", "color": "bright_red"}"#).unwrap();
/// let state = State::try_from(spec).unwrap();
/// assert_eq!(state.value(), 2);
///
/// let bad: StateSpec = serde_json::from_str(r#"{"value": 1.5, "glyph": "o"}"#).unwrap();
/// assert!(State::try_from(bad).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
    pub value: serde_json::Number,
    pub glyph: String,
    /// Color name; `None` means the fallback color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StateSpec {
    /// Create a spec from an integer value.
    pub fn new(value: i64, glyph: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            glyph: glyph.into(),
            color: None,
        }
    }

    /// Set the color name.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn integer_value(&self) -> Result<u64, ValidationError> {
        let n = &self.value;
        if let Some(v) = n.as_u64() {
            return Ok(v);
        }
        if let Some(v) = n.as_i64() {
            return Err(ValidationError::NegativeValue(v));
        }
        // Floats: integral ones (`2.0`) are integers.
        match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => {
                if f < 0.0 {
                    Err(ValidationError::NegativeValue(f as i64))
                } else if f >= U64_LIMIT {
                    Err(ValidationError::ValueOutOfRange(n.to_string()))
                } else {
                    Ok(f as u64)
                }
            }
            _ => Err(ValidationError::NonIntegerValue(n.to_string())),
        }
    }
}

impl TryFrom<StateSpec> for State {
    type Error = ValidationError;

    fn try_from(spec: StateSpec) -> Result<Self, Self::Error> {
        let value = spec.integer_value()?;
        let color = match &spec.color {
            Some(name) => name.parse()?,
            None => Color::FALLBACK,
        };
        State::from_ordinal(value, &spec.glyph, color)
    }
}

impl From<&State> for StateSpec {
    fn from(state: &State) -> Self {
        Self {
            value: state.value.into(),
            glyph: state.glyph.to_string(),
            color: Some(state.color.name().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid() {
        let state = State::new(1, "•", Color::Black).unwrap();
        assert_eq!(state.value(), 1);
        assert_eq!(state.glyph(), '•');
        assert_eq!(state.color(), Color::Black);
        assert_eq!(state.render(), "\x1b[30m•\x1b[0m");
    }

    #[test]
    fn test_default_color_is_white() {
        let state = State::with_glyph(1, "•").unwrap();
        assert_eq!(state.color(), Color::White);
        assert_eq!(state.render(), format!("{}•{}", Color::White.escape(), Color::Default.escape()));
    }

    #[test]
    fn test_render_uses_color() {
        let state = State::new(1, "•", Color::Red).unwrap();
        assert_eq!(state.render(), "\x1b[31m•\x1b[0m");
        assert_eq!(format!("{}", state), state.render());
    }

    #[test]
    fn test_negative_value_rejected() {
        assert_eq!(
            State::new(-1, "•", Color::Black).unwrap_err(),
            ValidationError::NegativeValue(-1)
        );
    }

    #[test]
    fn test_large_values_accepted() {
        let state = State::new(5_000_000_000, "x", Color::Red).unwrap();
        assert_eq!(state.value(), 5_000_000_000);

        let max = State::new(i64::MAX, "x", Color::Red).unwrap();
        assert_eq!(max.value(), i64::MAX as u64);
    }

    #[test]
    fn test_glyph_length_rejected() {
        assert_eq!(
            State::new(1, "••", Color::Black).unwrap_err(),
            ValidationError::GlyphLength { len: 2 }
        );
        assert_eq!(
            State::new(1, "", Color::Black).unwrap_err(),
            ValidationError::GlyphLength { len: 0 }
        );
    }

    #[test]
    fn test_glyph_counts_chars_not_bytes() {
        // Three UTF-8 bytes, one character.
        assert_eq!("•".len(), 3);
        assert!(State::new(1, "•", Color::Black).is_ok());
    }

    #[test]
    fn test_control_glyph_rejected() {
        assert_eq!(
            State::new(1, "\n", Color::Black).unwrap_err(),
            ValidationError::NonPrintableGlyph('\n')
        );
    }

    #[test]
    fn test_equality_by_value() {
        let a = State::new(1, "•", Color::Black).unwrap();
        let b = State::new(1, "•", Color::Black).unwrap();
        let c = State::new(2, "•", Color::Black).unwrap();
        let d = State::new(1, "x", Color::Cyan).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, d);
        assert!(a < c);
    }

    #[test]
    fn test_dead_constant() {
        assert_eq!(DEAD.value(), 0);
        assert_eq!(DEAD.glyph(), ' ');
        assert_eq!(DEAD.color(), Color::Default);
        assert_eq!(DEAD.render(), "\x1b[0m \x1b[0m");
    }

    #[test]
    fn test_dead_is_one_instance() {
        assert!(Arc::ptr_eq(&State::dead(), &State::dead()));
        assert!(Arc::ptr_eq(&State::dead(), &DEAD));
    }

    #[test]
    fn test_state_spec_non_integer() {
        let spec: StateSpec = serde_json::from_str(r#"{"value": 1.5, "glyph": "•"}"#).unwrap();
        assert_eq!(
            State::try_from(spec).unwrap_err(),
            ValidationError::NonIntegerValue("1.5".into())
        );
    }

    #[test]
    fn test_state_spec_integral_float_accepted() {
        let spec: StateSpec = serde_json::from_str(r#"{"value": 2.0, "glyph": "•"}"#).unwrap();
        assert_eq!(State::try_from(spec).unwrap().value(), 2);
    }

    #[test]
    fn test_state_spec_negative_and_huge() {
        let neg = StateSpec::new(-3, "•");
        assert_eq!(State::try_from(neg).unwrap_err(), ValidationError::NegativeValue(-3));

        let beyond_u64: StateSpec =
            serde_json::from_str(r#"{"value": 1e20, "glyph": "•"}"#).unwrap();
        assert!(matches!(
            State::try_from(beyond_u64),
            Err(ValidationError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_state_spec_large_values_accepted() {
        let spec: StateSpec =
            serde_json::from_str(r#"{"value": 5000000000, "glyph": "x"}"#).unwrap();
        assert_eq!(State::try_from(spec).unwrap().value(), 5_000_000_000);

        let max: StateSpec =
            serde_json::from_str(r#"{"value": 18446744073709551615, "glyph": "x"}"#).unwrap();
        assert_eq!(State::try_from(max).unwrap().value(), u64::MAX);
    }

    #[test]
    fn test_state_spec_unknown_color() {
        let spec = StateSpec::new(1, "•").with_color("Chartreuse");
        assert_eq!(
            State::try_from(spec).unwrap_err(),
            ValidationError::UnknownColor("Chartreuse".into())
        );
    }

    #[test]
    fn test_state_spec_defaults_to_white() {
        let state = State::try_from(StateSpec::new(4, "@")).unwrap();
        assert_eq!(state.color(), Color::White);
    }

    #[test]
    fn test_serde_validates() {
        let state: State =
            serde_json::from_str(r##"{"value": 3, "glyph": "#", "color": "Blue"}"##).unwrap();
        assert_eq!(state.value(), 3);
        assert_eq!(state.color(), Color::Blue);

        assert!(serde_json::from_str::<State>(r###"{"value": 3, "glyph": "##"}"###).is_err());
        assert!(serde_json::from_str::<State>(r##"{"value": -3, "glyph": "#"}"##).is_err());
    }

    #[test]
    fn test_serialization_shape() {
        let state = State::new(5, "*", Color::BrightYellow).unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": 5, "glyph": "*", "color": "BrightYellow"})
        );

        let back: State = serde_json::from_value(json).unwrap();
        assert_eq!(back.render(), state.render());
    }

    #[test]
    fn test_state_spec_from_state() {
        let state = State::new(7, "%", Color::Magenta).unwrap();
        let spec = StateSpec::from(&state);
        assert_eq!(spec.color.as_deref(), Some("Magenta"));
        assert_eq!(State::try_from(spec).unwrap().render(), state.render());
    }
}
