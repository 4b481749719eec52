use glam::Vec3;

/// Errors from parsing a comma-separated numeric triple.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected 3 comma-separated components, found {0}")]
    ComponentCount(usize),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
}

/// Parse text such as `"1.39, 0.3, 0.3"` into a vector.
///
/// Exactly three finite numbers are accepted; surrounding whitespace around
/// each component is ignored.
pub fn parse_triple(text: &str) -> Result<Vec3, ParseError> {
    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    if tokens.len() != 3 {
        return Err(ParseError::ComponentCount(tokens.len()));
    }

    let mut out = [0.0_f32; 3];
    for (slot, token) in out.iter_mut().zip(&tokens) {
        *slot = token
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber((*token).to_string()))?;
    }
    Ok(Vec3::from_array(out))
}

/// Format a vector the way the entry fields display it: `"x, y, z"`.
pub fn format_triple(v: Vec3) -> String {
    format!("{}, {}, {}", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_triple() {
        assert_eq!(parse_triple("1,2,3").unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn parses_with_whitespace_and_signs() {
        let v = parse_triple(" -0.2580, 21.8948 ,1.7567 ").unwrap();
        assert_eq!(v, Vec3::new(-0.2580, 21.8948, 1.7567));
    }

    #[test]
    fn too_few_components() {
        assert_eq!(parse_triple("1,2"), Err(ParseError::ComponentCount(2)));
    }

    #[test]
    fn too_many_components() {
        assert_eq!(parse_triple("1,2,3,4"), Err(ParseError::ComponentCount(4)));
    }

    #[test]
    fn non_numeric_token() {
        assert_eq!(
            parse_triple("1,a,3"),
            Err(ParseError::InvalidNumber("a".into()))
        );
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(matches!(
            parse_triple("1,,3"),
            Err(ParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(parse_triple("1,inf,3").is_err());
        assert!(parse_triple("NaN,0,0").is_err());
    }

    #[test]
    fn format_matches_entry_field() {
        assert_eq!(format_triple(Vec3::new(1.39, 0.3, 0.3)), "1.39, 0.3, 0.3");
        assert_eq!(format_triple(Vec3::new(0.0, 1.0, 0.0)), "0, 1, 0");
    }

    #[test]
    fn formatted_text_parses_back() {
        let v = Vec3::new(-0.8025, -0.0982, 0.6609);
        assert_eq!(parse_triple(&format_triple(v)).unwrap(), v);
    }
}
