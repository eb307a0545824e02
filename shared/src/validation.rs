//! Validation utilities for the Warehouse Inventory Management system

// ============================================================================
// Stock Input Validations
// ============================================================================

/// Maximum length of a free-text note on a movement record
pub const MAX_NOTE_LENGTH: usize = 200;

/// Validate a free-text note attached to a stock movement
pub fn validate_note(note: &str) -> Result<(), &'static str> {
    if note.chars().count() > MAX_NOTE_LENGTH {
        return Err("Note must be at most 200 characters");
    }
    Ok(())
}

// ============================================================================
// Report Period Validations
// ============================================================================

/// Parse a report month in `YYYY-MM` form into (year, month)
pub fn parse_month(month: &str) -> Result<(i32, u32), &'static str> {
    let (year_part, month_part) = month
        .split_once('-')
        .ok_or("Month must be in YYYY-MM format")?;

    let year: i32 = year_part
        .parse()
        .map_err(|_| "Month must be in YYYY-MM format")?;
    let month_number: u32 = month_part
        .parse()
        .map_err(|_| "Month must be in YYYY-MM format")?;

    if !(1..=12).contains(&month_number) {
        return Err("Month number must be between 01 and 12");
    }
    if !(1970..=9999).contains(&year) {
        return Err("Year out of range");
    }

    Ok((year, month_number))
}
