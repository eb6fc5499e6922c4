use crate::domain::model::Numeric;
use crate::utils::error::{MathApiError, Result};
use url::Host;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses a query value into a finite number. Integer literals stay integers.
pub fn parse_number(field_name: &str, raw: &str) -> Result<Numeric> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MathApiError::invalid_number(field_name, raw));
    }

    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(Numeric::Int(int));
    }

    match trimmed.parse::<f64>() {
        Ok(real) if real.is_finite() => Ok(Numeric::Real(real)),
        _ => Err(MathApiError::invalid_number(field_name, raw)),
    }
}

/// Parses a comma-separated list such as `1,2,3`. Empty elements are rejected.
pub fn parse_number_list(field_name: &str, raw: &str) -> Result<Vec<Numeric>> {
    if raw.trim().is_empty() {
        return Err(MathApiError::invalid_number(field_name, raw));
    }

    raw.split(',')
        .map(|item| parse_number(field_name, item))
        .collect()
}

pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    validate_non_empty_string(field_name, host)?;

    // Bare IPv6 literals are accepted by the listener but url::Host expects brackets.
    let candidate = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };

    Host::parse(&candidate)
        .map(|_| ())
        .map_err(|e| MathApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: format!("Invalid host: {}", e),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MathApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(MathApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MathApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_keeps_integers() {
        assert_eq!(parse_number("s", "4").unwrap(), Numeric::Int(4));
        assert_eq!(parse_number("x1", "-12").unwrap(), Numeric::Int(-12));
        assert_eq!(parse_number("r", "2.5").unwrap(), Numeric::Real(2.5));
        assert_eq!(parse_number("r", " 3 ").unwrap(), Numeric::Int(3));
    }

    #[test]
    fn test_parse_number_rejects_garbage_and_non_finite() {
        for raw in ["", "abc", "4cm", "NaN", "inf", "-infinity", "1e400"] {
            let err = parse_number("s", raw).unwrap_err();
            assert!(
                matches!(err, MathApiError::InvalidNumber { ref name, .. } if name == "s"),
                "expected InvalidNumber for {:?}, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_parse_number_list() {
        let nums = parse_number_list("nums", "1,2,3.5").unwrap();
        assert_eq!(
            nums,
            vec![Numeric::Int(1), Numeric::Int(2), Numeric::Real(3.5)]
        );

        assert!(parse_number_list("nums", "").is_err());
        assert!(parse_number_list("nums", "1,,2").is_err());
        assert!(parse_number_list("nums", "1,two").is_err());
    }

    #[test]
    fn test_validate_host() {
        assert!(validate_host("server.host", "127.0.0.1").is_ok());
        assert!(validate_host("server.host", "localhost").is_ok());
        assert!(validate_host("server.host", "::1").is_ok());
        assert!(validate_host("server.host", "").is_err());
        assert!(validate_host("server.host", "bad host").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("server.port", 3001u32, 1, 65535).is_ok());
        assert!(validate_range("server.port", 0u32, 1, 65535).is_err());
        assert!(validate_range("server.port", 70000u32, 1, 65535).is_err());
    }
}
