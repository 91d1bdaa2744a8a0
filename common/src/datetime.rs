//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData, ops::RangeInclusive};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    PrimitiveDateTime, UtcOffset,
};

/// Calendar date without a time.
pub type Date = time::Date;

/// Format of a [`Date`] exchanged with the backend (`YYYY-MM-DD`).
const DATE_FORMAT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Format of a local date and time sent by backends without an offset.
const LOCAL_FORMAT: &[FormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second]]]\
     [optional [.[subsecond]]]"
);

/// Years (in UTC) a [`DateTime`] may fall into, being the ones representable
/// as [RFC 3339].
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
const YEARS: RangeInclusive<i32> = 0..=9999;

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time within the [RFC 3339] range of years.
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] at the provided `hour` and `minute` (UTC)
    /// of the provided [`Date`].
    ///
    /// [`None`] is returned if the time components or the year are out of
    /// range.
    #[must_use]
    pub fn at(date: Date, hour: u8, minute: u8) -> Option<Self> {
        let time = time::Time::from_hms(hour, minute, 0).ok()?;
        Self::from_inner(PrimitiveDateTime::new(date, time).assume_utc())
    }

    /// Creates a new [`DateTime`] from the provided Unix timestamp.
    ///
    /// [`None`] is returned if the timestamp is out of range.
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Self::from_inner(
            time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
        )
    }

    /// Returns the Unix timestamp of this [`DateTime`].
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Parses a new [`DateTime`] from the provided string.
    ///
    /// Accepts [RFC 3339] strings and local date-times without an offset
    /// (`YYYY-MM-DDTHH:MM[:SS[.fff]]`), the latter being treated as UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the string matches neither of the formats, or if
    /// it falls outside the `0000`-`9999` years once shifted to UTC.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let dt = match time::OffsetDateTime::parse(input, &Rfc3339) {
            Ok(dt) => dt,
            Err(rfc3339) => PrimitiveDateTime::parse(input, LOCAL_FORMAT)
                .map(PrimitiveDateTime::assume_utc)
                .map_err(|_| ParseError::Format(rfc3339))?,
        };
        Self::from_inner(dt).ok_or(ParseError::OutOfRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner
            .format(&Rfc3339)
            .expect("years out of RFC 3339 range are never constructed")
    }

    /// Returns the UTC [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        self.inner.date()
    }

    /// Returns the UTC hour and minute of this [`DateTime`].
    #[must_use]
    pub fn hour_minute(&self) -> (u8, u8) {
        (self.inner.hour(), self.inner.minute())
    }

    /// Normalizes the provided [`time::OffsetDateTime`] to UTC, unless it
    /// leaves the [`YEARS`] range.
    fn from_inner(dt: time::OffsetDateTime) -> Option<Self> {
        let inner = dt.checked_to_offset(UtcOffset::UTC)?;
        YEARS.contains(&inner.year()).then_some(Self {
            inner,
            _of: PhantomData,
        })
    }
}

/// Formats the provided [`Date`] as `YYYY-MM-DD`.
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).expect("infallible for valid dates")
}

/// Parses a [`Date`] from a `YYYY-MM-DD` string.
///
/// # Errors
///
/// Returns an error if the string is not a valid date.
pub fn parse_date(input: &str) -> Result<Date, time::error::Parse> {
    Date::parse(input, DATE_FORMAT)
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// String matches none of the accepted formats.
    #[display("invalid date and time: {_0}")]
    Format(time::error::Parse),

    /// Date and time falls outside the `0000`-`9999` years in UTC.
    #[display("date and time out of range")]
    OutOfRange,
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> std::fmt::Display for DateTimeOf<Of> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

pub mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! [`DateTimeOf`] is (de)serialized as an [RFC 3339] string by default.
    //!
    //! [RFC 3339]: https://tools.ietf.org/html/rfc3339

    use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

    use super::DateTimeOf;

    impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
        fn serialize<S: serde::Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_rfc3339())
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::parse(&s).map_err(D::Error::custom)
        }
    }

    pub mod date {
        //! Module providing serialization and deserialization of a
        //! [`Date`] as a `YYYY-MM-DD` string.
        //!
        //! [`Date`]: super::super::Date

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::super::{format_date, parse_date, Date};

        /// Serializes the [`Date`] as a `YYYY-MM-DD` string.
        ///
        /// # Errors
        ///
        /// Never errors on its own.
        pub fn serialize<S: Serializer>(
            date: &Date,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format_date(*date))
        }

        /// Deserializes a `YYYY-MM-DD` (or a longer date-time) string into a
        /// [`Date`].
        ///
        /// # Errors
        ///
        /// Returns an error if the string doesn't start with a valid date.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Date, D::Error> {
            let s = String::deserialize(deserializer)?;
            parse_date(s.get(..10).unwrap_or(&s)).map_err(D::Error::custom)
        }
    }

    pub mod date_option {
        //! Module providing serialization and deserialization of an optional
        //! [`Date`] as a nullable `YYYY-MM-DD` string.
        //!
        //! [`Date`]: super::super::Date

        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::Date;

        /// Serializes the optional [`Date`] as a `YYYY-MM-DD` string or `null`.
        ///
        /// # Errors
        ///
        /// Never errors on its own.
        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::date::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes a nullable date string into an optional [`Date`].
        ///
        /// Empty strings are treated as missing dates.
        ///
        /// # Errors
        ///
        /// Returns an error if a non-empty string isn't a valid date.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let s = Option::<String>::deserialize(deserializer)?;
            match s.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => super::super::parse_date(s.get(..10).unwrap_or(s))
                    .map(Some)
                    .map_err(serde::de::Error::custom),
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use time::{macros::date, Month};

    use super::{format_date, parse_date, Date, DateTime, ParseError};

    #[test]
    fn parses_rfc3339_and_local() {
        let utc = DateTime::parse("2024-03-01T10:30:00Z").unwrap();
        let offset = DateTime::parse("2024-03-01T07:30:00-03:00").unwrap();
        let local = DateTime::parse("2024-03-01T10:30:00").unwrap();
        let short = DateTime::parse("2024-03-01T10:30").unwrap();

        assert_eq!(utc, offset);
        assert_eq!(utc, local);
        assert_eq!(utc, short);
        assert_eq!(utc.to_rfc3339(), "2024-03-01T10:30:00Z");
        assert_eq!(utc.hour_minute(), (10, 30));

        assert!(DateTime::parse("yesterday").is_err());
    }

    #[test]
    fn rejects_years_leaving_range_in_utc() {
        assert!(matches!(
            DateTime::parse("9999-12-31T23:30:00-01:00"),
            Err(ParseError::OutOfRange),
        ));
        assert!(matches!(
            DateTime::parse("0000-01-01T00:30:00+01:00"),
            Err(ParseError::OutOfRange),
        ));

        let last = DateTime::parse("9999-12-31T22:30:00-01:00").unwrap();
        assert_eq!(last.to_rfc3339(), "9999-12-31T23:30:00Z");
        let first = DateTime::parse("0000-01-01T01:30:00+01:00").unwrap();
        assert_eq!(first.to_rfc3339(), "0000-01-01T00:30:00Z");
    }

    #[test]
    fn fails_to_decode_out_of_range_json() {
        let err = serde_json::from_str::<DateTime>(
            r#""0000-01-01T00:30:00+01:00""#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("out of range"));
        assert!(DateTime::from_unix_timestamp(-62_167_219_201).is_none());
        let before = Date::from_calendar_date(-1, Month::December, 31).unwrap();
        assert!(DateTime::at(before, 23, 0).is_none());
    }

    #[test]
    fn builds_from_date_and_time() {
        let dt = DateTime::at(date!(2024 - 03 - 01), 9, 15).unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-03-01T09:15:00Z");
        assert_eq!(dt.date(), date!(2024 - 03 - 01));
        assert!(DateTime::at(date!(2024 - 03 - 01), 24, 0).is_none());
    }

    #[test]
    fn formats_dates() {
        assert_eq!(format_date(date!(2024 - 03 - 01)), "2024-03-01");
        assert_eq!(parse_date("2024-03-01").unwrap(), date!(2024 - 03 - 01));
        assert!(parse_date("01/03/2024").is_err());
    }
}
