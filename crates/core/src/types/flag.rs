//! Lenient boolean coercion for legacy form fields.

/// Coerce a form value to a boolean.
///
/// Only the literal `"true"`, compared case-insensitively, yields `true`.
/// Every other input yields `false`, including `"yes"`, `"1"`, the empty
/// string, and values with surrounding whitespace. Existing clients depend on
/// this exact rule, so it must not be tightened.
///
/// ```
/// use honest_shops_core::parse_lenient_bool;
///
/// assert!(parse_lenient_bool("TRUE"));
/// assert!(!parse_lenient_bool("yes"));
/// ```
#[must_use]
pub fn parse_lenient_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_in_any_case() {
        for input in ["true", "True", "TRUE", "tRuE"] {
            assert!(parse_lenient_bool(input), "{input} should be true");
        }
    }

    #[test]
    fn test_everything_else_is_false() {
        for input in ["false", "yes", "1", "", "on", " true", "true ", "truee"] {
            assert!(!parse_lenient_bool(input), "{input:?} should be false");
        }
    }
}
