use jiff::{SignedDuration, SpanRelativeTo};

/// Accepts `90s`, `5m`, `PT1H30M` or a bare number of seconds.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    let duration = input
        .parse::<SignedDuration>()
        .ok()
        .or_else(|| {
            input
                .parse::<jiff::Span>()
                .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
                .ok()
        })
        .or_else(|| input.parse::<i64>().ok().map(SignedDuration::from_secs))
        .ok_or_else(|| format!("Invalid duration '{input}'"))?;

    if duration <= SignedDuration::ZERO {
        return Err(format!("The duration must be positive, got '{input}'"));
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30"), Ok(SignedDuration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Ok(SignedDuration::from_mins(5)));
        assert_eq!(
            parse_duration("PT1H30M"),
            Ok(SignedDuration::from_secs(5400))
        );
    }

    #[test]
    fn test_parse_invalid_duration() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("-5").is_err());
    }
}
