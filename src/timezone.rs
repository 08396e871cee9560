use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the timezone is not a canonical timezone name.
pub fn get_local_date(canonical_timezone: &str) -> Result<Date, Error> {
    let Some(local_offset) = get_local_offset(canonical_timezone) else {
        tracing::error!("Invalid timezone {canonical_timezone}");
        return Err(Error::InvalidTimezoneError(canonical_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, UtcOffset};

    use crate::{
        Error,
        timezone::{get_local_date, get_local_offset},
    };

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(get_local_offset("Mars/Olympus_Mons"), None);
        assert_eq!(
            get_local_date("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[test]
    fn local_date_is_within_a_day_of_utc() {
        let utc_today = OffsetDateTime::now_utc().date();

        let local_today = get_local_date("Pacific/Auckland").unwrap();

        assert!((local_today - utc_today).whole_days().abs() <= 1);
    }
}
