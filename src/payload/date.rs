//! Horodate decoding for standard mode.
//!
//! A horodate is `SYYMMDDhhmmss`, where `S` is the season: `H` (hiver) for
//! winter time at UTC+1, anything else (usually `E`, été) for summer time at
//! UTC+2. The digits are local time at that offset.

use crate::constants::{TIC_SUMMER_OFFSET_SECS, TIC_WINTER_OFFSET_SECS, TIC_WINTER_SEASON};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use log::debug;

/// UTC offset selected by the season character.
pub fn season_offset(season: char) -> Option<FixedOffset> {
    let secs = if season.eq_ignore_ascii_case(&TIC_WINTER_SEASON) {
        TIC_WINTER_OFFSET_SECS
    } else {
        TIC_SUMMER_OFFSET_SECS
    };
    FixedOffset::east_opt(secs)
}

/// Decodes a horodate token, `None` when it is malformed.
pub fn parse_horodate(token: &str) -> Option<DateTime<FixedOffset>> {
    let mut chars = token.chars();
    let season = chars.next()?;
    let digits = chars.as_str();

    if digits.len() != 12 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(digits, "%y%m%d%H%M%S").ok()?;
    season_offset(season)?.from_local_datetime(&naive).single()
}

/// Decodes a horodate token, falling back to the Unix epoch.
pub fn decode_horodate(token: Option<&str>) -> DateTime<FixedOffset> {
    token.and_then(parse_horodate).unwrap_or_else(|| {
        debug!("Invalid horodate {token:?}, using epoch");
        DateTime::<FixedOffset>::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_date() {
        let date = parse_horodate("H221113153547").unwrap();
        assert_eq!(date.to_rfc3339(), "2022-11-13T15:35:47+01:00");
        assert_eq!(date.timestamp(), 1668350147);
    }

    #[test]
    fn test_summer_date_is_another_instant() {
        let winter = parse_horodate("H221113153547").unwrap();
        let summer = parse_horodate("E221113153547").unwrap();
        assert_eq!(summer.to_rfc3339(), "2022-11-13T15:35:47+02:00");
        assert_eq!(winter.timestamp() - summer.timestamp(), 3600);
    }

    #[test]
    fn test_reference_instants() {
        assert_eq!(parse_horodate("H000101000000").unwrap().timestamp(), 946681200);
        assert_eq!(parse_horodate("H221113153548").unwrap().timestamp(), 1668350148);
        assert_eq!(parse_horodate("E221218174516").unwrap().timestamp(), 1671378316);
    }

    #[test]
    fn test_season_offsets() {
        assert_eq!(season_offset('H').unwrap().local_minus_utc(), 3600);
        assert_eq!(season_offset('E').unwrap().local_minus_utc(), 7200);
        assert_eq!(season_offset(' ').unwrap().local_minus_utc(), 7200);
    }

    #[test]
    fn test_lowercase_season() {
        let date = parse_horodate("h221113153547").unwrap();
        assert_eq!(date.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_malformed_dates() {
        assert!(parse_horodate("").is_none());
        assert!(parse_horodate("H").is_none());
        assert!(parse_horodate("H2211131535").is_none());
        assert!(parse_horodate("H22111315354X").is_none());
        assert!(parse_horodate("H221313153547").is_none());
        assert_eq!(decode_horodate(Some("bogus")).timestamp(), 0);
        assert_eq!(decode_horodate(None).timestamp(), 0);
    }
}
