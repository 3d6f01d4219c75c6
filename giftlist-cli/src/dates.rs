use anyhow::Result;
use chrono::NaiveDate;

/// Parse a reminder date typed by the user.
///
/// Accepts `YYYY-MM-DD`, or natural language such as "tomorrow" or
/// "next friday".
pub fn parse_date_input(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let dt = fuzzydate::parse(input)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
