use crate::{error::TimeFormatError, problem::units::Seconds};

#[macro_export]
macro_rules! timer_debug {
    ($msg:literal,$block:expr) => {{
        let now = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(now);

        tracing::debug!("{}: Took {:?}", $msg, elapsed);

        result
    }};
}

/// Parses a `HH:MM:SS` clock string into seconds. Hours take at least two
/// digits and may exceed 23, minutes and seconds take exactly two.
pub fn time_to_int(value: &str) -> Result<Seconds, TimeFormatError> {
    let malformed = || TimeFormatError::Malformed(value.to_string());
    let mut parts = value.trim().split(':');

    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let parse = |part: &str, limit: Option<i64>| -> Result<i64, TimeFormatError> {
        let width_ok = match limit {
            Some(_) => part.len() == 2,
            None => part.len() >= 2,
        };
        if !width_ok || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let parsed = part.parse::<u32>().map_err(|_| malformed())?;
        let parsed = i64::from(parsed);

        match limit {
            Some(limit) if parsed >= limit => Err(TimeFormatError::OutOfRange {
                value: value.to_string(),
                part: part.to_string(),
            }),
            _ => Ok(parsed),
        }
    };

    let hours = parse(hours, None)?;
    let minutes = parse(minutes, Some(60))?;
    let seconds = parse(seconds, Some(60))?;

    Ok(hours * 3600 + minutes * 60 + seconds)
}

/// Formats seconds as `HH:MM:SS`. Aggregated totals can run past 24 hours and
/// are printed with as many hour digits as needed.
pub fn int_to_time(value: Seconds) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let value = value.abs();

    let hours = value / 3600;
    let minutes = (value % 3600) / 60;
    let seconds = value % 60;

    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
}
