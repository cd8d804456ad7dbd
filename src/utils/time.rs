/// Error for malformed HHMM time strings
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidTime(pub String);

impl std::fmt::Display for InvalidTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Invalid time format: {}", self.0)
    }
}

impl std::error::Error for InvalidTime {}

/// Parse 'HHMM' (e.g., "0930") into minutes since midnight.
/// Requires exactly four ASCII digits after trimming.
pub fn parse_hhmm(hhmm: &str) -> Result<u32, InvalidTime> {
    let trimmed = hhmm.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidTime(trimmed.to_string()));
    }

    let hours: u32 = trimmed[..2]
        .parse()
        .map_err(|_| InvalidTime(trimmed.to_string()))?;
    let minutes: u32 = trimmed[2..]
        .parse()
        .map_err(|_| InvalidTime(trimmed.to_string()))?;

    if hours > 23 || minutes > 59 {
        return Err(InvalidTime(trimmed.to_string()));
    }

    Ok(hours * 60 + minutes)
}

/// Convert minutes since midnight back to 'HHMM'.
pub fn minutes_to_hhmm(minutes: u32) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}
