//! Date helper functions
//!
//! Publication dates arrive from the CMS as UTC timestamps and are shown
//! as pt-BR calendar dates, e.g. "19 Abr 2021".

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// Abbreviated pt-BR month names, capitalized for display
const MONTHS_ABBR_PT_BR: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Format a publication timestamp as a localized calendar date.
///
/// The timestamp is converted to `tz` before the calendar date is taken.
/// A missing date formats to `None`; rendering decides how to show the
/// empty slot.
pub fn format_publication_date(date: Option<&DateTime<Utc>>, tz: Tz) -> Option<String> {
    date.map(|date| {
        let local = date.with_timezone(&tz);
        format!(
            "{:02} {} {}",
            local.day(),
            MONTHS_ABBR_PT_BR[local.month0() as usize],
            local.year()
        )
    })
}

/// Parse an IANA timezone name, falling back to UTC on an unknown name
pub fn parse_timezone(name: &str) -> Tz {
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!("Unknown timezone {:?}, falling back to UTC", name);
            chrono_tz::UTC
        }
    }
}
