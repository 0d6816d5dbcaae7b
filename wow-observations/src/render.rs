//! Plain-text console rendering of observation records.

use std::io::Write;

use crate::models::Observation;

/// Printed in place of a `null` value
pub const NULL_PLACEHOLDER: &str = "null";

/// Progress line written before each page is requested
pub fn write_page_header<W: Write>(out: &mut W, page_number: u32) -> std::io::Result<()> {
    writeln!(out, "Processing page {}", page_number)
}

/// Write one observation, showing at most `max_fields` observation field values.
///
/// ```text
/// ID=123
///   datetime=2020-10-01T10:00:00+09:30
///   location=-34.9285,138.6007
///   species=Caladenia tentaculata
///   Orchid type=Terrestrial
/// ```
pub fn write_observation<W: Write>(
    out: &mut W,
    observation: &Observation,
    max_fields: usize,
) -> std::io::Result<()> {
    writeln!(out, "ID={}", observation.id)?;
    writeln!(out, "  datetime={}", or_null(observation.time_observed_at.as_deref()))?;
    writeln!(out, "  location={}", or_null(observation.display_location()))?;
    writeln!(out, "  species={}", or_null(observation.species_guess.as_deref()))?;
    for field in observation.observation_field_values.iter().take(max_fields) {
        writeln!(out, "  {}", field)?;
    }
    Ok(())
}

fn or_null(value: Option<&str>) -> &str {
    value.unwrap_or(NULL_PLACEHOLDER)
}
