//! Path parameter parsing.

use super::error::AppError;
use crate::models::DogId;

/// Parse the `{id}` path segment.
///
/// Any numeric text is accepted, but only whole numbers within the `DogId`
/// range can name a stored dog. Other numbers (`2.5`, `1e20`, `Infinity`)
/// yield `Ok(None)` so callers answer "not found" without touching the store.
/// Text that is not a number is [`AppError::InvalidId`]. The only spelled-out
/// number is `Infinity`; `NaN`, `inf` and other case variants are rejected.
pub fn parse_dog_id(raw: &str) -> Result<Option<DogId>, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidId);
    }

    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(DogId::try_from(int).ok());
    }

    // f64 parsing also accepts `inf`, `infinity` and `nan` in any case
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return Err(AppError::InvalidId);
    }

    let number: f64 = trimmed.parse().map_err(|_| AppError::InvalidId)?;
    let in_range = number >= f64::from(DogId::MIN) && number <= f64::from(DogId::MAX);
    if number.fract() == 0.0 && in_range {
        Ok(Some(number as DogId))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_ids() {
        assert_eq!(parse_dog_id("1").unwrap(), Some(1));
        assert_eq!(parse_dog_id(" 42 ").unwrap(), Some(42));
        assert_eq!(parse_dog_id("-3").unwrap(), Some(-3));
        assert_eq!(parse_dog_id("+7").unwrap(), Some(7));
    }

    #[test]
    fn test_whole_number_notation() {
        assert_eq!(parse_dog_id("5.0").unwrap(), Some(5));
        assert_eq!(parse_dog_id("1e3").unwrap(), Some(1000));
    }

    #[test]
    fn test_numeric_but_unmatchable() {
        assert_eq!(parse_dog_id("2.5").unwrap(), None);
        assert_eq!(parse_dog_id("99999999999").unwrap(), None);
        assert_eq!(parse_dog_id("1e20").unwrap(), None);
        assert_eq!(parse_dog_id("1e400").unwrap(), None);
        assert_eq!(parse_dog_id("Infinity").unwrap(), None);
        assert_eq!(parse_dog_id("-Infinity").unwrap(), None);
        assert_eq!(parse_dog_id("+Infinity").unwrap(), None);
    }

    #[test]
    fn test_not_a_number() {
        for raw in [
            "abc", "12abc", "NaN", "nan", "", "   ", "inf", "INF", "+inf", "-inf", "infinity",
            "INFINITY", "-infinity",
        ] {
            assert!(
                matches!(parse_dog_id(raw), Err(AppError::InvalidId)),
                "expected {:?} to be rejected",
                raw
            );
        }
    }
}
