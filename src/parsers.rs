//! This module implements ISO-8601 parsing and printing for the value types.
//!
//! Parsing is done by a small byte cursor. Every grammar here is ASCII, so a
//! byte position is also a character position and is reported on errors.

use crate::{
    builtins::core::{Duration, Instant, LocalDate, LocalDateTime, LocalTime, Period, ZoneOffset},
    utils, Sign, TemporalError, TemporalResult, NANOS_PER_SECOND, SECONDS_PER_DAY,
    SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use alloc::format;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

// ==== Cursor ====

struct Cursor<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Consumes `expected` if it is next, ignoring ASCII case.
    fn eat(&mut self, expected: u8) -> bool {
        match self.peek() {
            Some(b) if b.eq_ignore_ascii_case(&expected) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, expected: u8) -> TemporalResult<()> {
        if self.is_done() {
            return Err(self.abrupt_end());
        }
        if !self.eat(expected) {
            return Err(self.error());
        }
        Ok(())
    }

    fn sign(&mut self) -> Option<Sign> {
        match self.peek()? {
            b'+' => {
                self.pos += 1;
                Some(Sign::Positive)
            }
            b'-' => {
                self.pos += 1;
                Some(Sign::Negative)
            }
            _ => None,
        }
    }

    /// Reads exactly `count` digits.
    fn fixed_digits(&mut self, count: usize) -> TemporalResult<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            let digit = self.digit()?;
            value = value * 10 + digit;
        }
        Ok(value)
    }

    fn digit(&mut self) -> TemporalResult<u32> {
        match self.peek() {
            Some(b @ b'0'..=b'9') => {
                self.pos += 1;
                Ok(u32::from(b - b'0'))
            }
            Some(_) => Err(self.error()),
            None => Err(self.abrupt_end()),
        }
    }

    /// Reads a run of digits, returning its text.
    fn digit_run(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        &self.source[start..self.pos]
    }

    fn finish(&self) -> TemporalResult<()> {
        if !self.is_done() {
            return Err(self.error().with_message(format!(
                "Text '{}' could not be parsed, unparsed text found at index {}",
                self.source, self.pos
            )));
        }
        Ok(())
    }

    fn error(&self) -> TemporalError {
        TemporalError::parse()
            .with_message(format!(
                "Text '{}' could not be parsed at index {}",
                self.source, self.pos
            ))
            .with_position(self.pos)
    }

    fn abrupt_end(&self) -> TemporalError {
        TemporalError::abrupt_end(self.pos)
    }

    /// Converts an error raised while building a value into a parse error.
    fn invalid(&self, err: TemporalError) -> TemporalError {
        TemporalError::parse()
            .with_message(format!(
                "Text '{}' could not be parsed: {}",
                self.source,
                err.message()
            ))
            .with_position(self.pos)
    }
}

// ==== Component grammars ====

fn date(cursor: &mut Cursor<'_>) -> TemporalResult<LocalDate> {
    let year = match cursor.sign() {
        Some(sign) => {
            let digits = cursor.digit_run();
            if !(4..=9).contains(&digits.len()) {
                return Err(cursor.error());
            }
            // A plus sign is only written for years beyond four digits.
            if sign == Sign::Positive && digits.len() == 4 {
                return Err(cursor.error());
            }
            let magnitude: i32 = digits.parse().map_err(|_| cursor.error())?;
            magnitude * sign as i32
        }
        None => cursor.fixed_digits(4)? as i32,
    };
    cursor.expect(b'-')?;
    let month = cursor.fixed_digits(2)?;
    cursor.expect(b'-')?;
    let day = cursor.fixed_digits(2)?;
    LocalDate::of(year, month as i32, day as i32).map_err(|e| cursor.invalid(e))
}

fn time(cursor: &mut Cursor<'_>) -> TemporalResult<LocalTime> {
    let hour = cursor.fixed_digits(2)?;
    cursor.expect(b':')?;
    let minute = cursor.fixed_digits(2)?;
    let mut second = 0;
    let mut nano = 0;
    if cursor.eat(b':') {
        second = cursor.fixed_digits(2)?;
        if cursor.eat(b'.') || cursor.eat(b',') {
            nano = fraction(cursor, 1)?;
        }
    }
    LocalTime::of_hmsn(hour as i32, minute as i32, second as i32, nano as i32)
        .map_err(|e| cursor.invalid(e))
}

/// Reads up to nine fraction digits as nanoseconds.
fn fraction(cursor: &mut Cursor<'_>, min_digits: usize) -> TemporalResult<u32> {
    let digits = cursor.digit_run();
    if digits.len() < min_digits || digits.len() > 9 {
        return Err(cursor.error());
    }
    let nanos = digits
        .bytes()
        .chain(core::iter::repeat(b'0'))
        .take(9)
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    Ok(nanos)
}

fn date_time(cursor: &mut Cursor<'_>) -> TemporalResult<LocalDateTime> {
    let date = date(cursor)?;
    cursor.expect(b'T')?;
    let time = time(cursor)?;
    Ok(LocalDateTime::of(date, time))
}

/// Reads `Z` or `±HH[:MM[:SS]]` or `±HHMM[SS]` inside a larger text.
fn embedded_offset(cursor: &mut Cursor<'_>) -> TemporalResult<ZoneOffset> {
    if cursor.eat(b'Z') {
        return Ok(ZoneOffset::UTC);
    }
    let Some(sign) = cursor.sign() else {
        return Err(if cursor.is_done() {
            cursor.abrupt_end()
        } else {
            cursor.error()
        });
    };
    let hours = cursor.fixed_digits(2)?;
    let (mut minutes, mut seconds) = (0, 0);
    if cursor.eat(b':') {
        minutes = cursor.fixed_digits(2)?;
        if cursor.eat(b':') {
            seconds = cursor.fixed_digits(2)?;
        }
    } else if matches!(cursor.peek(), Some(b'0'..=b'9')) {
        minutes = cursor.fixed_digits(2)?;
        if matches!(cursor.peek(), Some(b'0'..=b'9')) {
            seconds = cursor.fixed_digits(2)?;
        }
    }
    let sign = sign as i32;
    ZoneOffset::of_hours_minutes_seconds(
        sign * hours as i32,
        sign * minutes as i32,
        sign * seconds as i32,
    )
    .map_err(|e| cursor.invalid(e))
}

// ==== Value parsers ====

pub(crate) fn parse_local_date(text: &str) -> TemporalResult<LocalDate> {
    let mut cursor = Cursor::new(text);
    let date = date(&mut cursor)?;
    cursor.finish()?;
    Ok(date)
}

pub(crate) fn parse_local_time(text: &str) -> TemporalResult<LocalTime> {
    let mut cursor = Cursor::new(text);
    let time = time(&mut cursor)?;
    cursor.finish()?;
    Ok(time)
}

pub(crate) fn parse_local_date_time(text: &str) -> TemporalResult<LocalDateTime> {
    let mut cursor = Cursor::new(text);
    let date_time = date_time(&mut cursor)?;
    cursor.finish()?;
    Ok(date_time)
}

pub(crate) fn parse_instant(text: &str) -> TemporalResult<Instant> {
    let mut cursor = Cursor::new(text);
    let date_time = date_time(&mut cursor)?;
    let offset = embedded_offset(&mut cursor)?;
    cursor.finish()?;
    Instant::of_epoch_second_adjusted(
        date_time.to_epoch_second(offset),
        i64::from(date_time.nano()),
    )
    .map_err(|e| cursor.invalid(e))
}

/// Parses a standalone offset id.
///
/// Accepted forms are `Z`, `±H`, `±HH`, `±HHMM`, `±HH:MM`, `±HHMMSS` and
/// `±HH:MM:SS`.
pub(crate) fn parse_offset(text: &str) -> TemporalResult<ZoneOffset> {
    if text == "Z" {
        return Ok(ZoneOffset::UTC);
    }
    let mut cursor = Cursor::new(text);
    let Some(sign) = cursor.sign() else {
        return Err(cursor.error().with_message(format!("Invalid ID for ZoneOffset: {text}")));
    };
    let (hours, minutes, seconds) = match text.len() - 1 {
        1 => (cursor.fixed_digits(1)?, 0, 0),
        2 => (cursor.fixed_digits(2)?, 0, 0),
        4 => (cursor.fixed_digits(2)?, cursor.fixed_digits(2)?, 0),
        5 => {
            let hours = cursor.fixed_digits(2)?;
            cursor.expect(b':')?;
            (hours, cursor.fixed_digits(2)?, 0)
        }
        6 => (
            cursor.fixed_digits(2)?,
            cursor.fixed_digits(2)?,
            cursor.fixed_digits(2)?,
        ),
        8 => {
            let hours = cursor.fixed_digits(2)?;
            cursor.expect(b':')?;
            let minutes = cursor.fixed_digits(2)?;
            cursor.expect(b':')?;
            (hours, minutes, cursor.fixed_digits(2)?)
        }
        _ => {
            return Err(cursor
                .error()
                .with_message(format!("Invalid ID for ZoneOffset: {text}")))
        }
    };
    cursor.finish()?;
    let sign = sign as i32;
    ZoneOffset::of_hours_minutes_seconds(
        sign * hours as i32,
        sign * minutes as i32,
        sign * seconds as i32,
    )
}

/// The pieces of a zoned date-time text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedZonedDateTime<'a> {
    pub(crate) date_time: LocalDateTime,
    pub(crate) offset: Option<ZoneOffset>,
    pub(crate) zone: Option<&'a str>,
}

/// Parses `date-time [offset] ['[' zone ']']`.
pub(crate) fn parse_zoned_date_time(text: &str) -> TemporalResult<ParsedZonedDateTime<'_>> {
    let mut cursor = Cursor::new(text);
    let date_time = date_time(&mut cursor)?;
    let offset = match cursor.peek() {
        Some(b'+' | b'-' | b'Z' | b'z') => Some(embedded_offset(&mut cursor)?),
        _ => None,
    };
    let zone = if cursor.eat(b'[') {
        let start = cursor.pos;
        while cursor.peek().is_some_and(|b| b != b']') {
            cursor.pos += 1;
        }
        let id = &text[start..cursor.pos];
        if cursor.is_done() {
            return Err(cursor.abrupt_end());
        }
        if id.is_empty() {
            return Err(cursor.error());
        }
        cursor.pos += 1;
        Some(id)
    } else {
        None
    };
    cursor.finish()?;
    Ok(ParsedZonedDateTime {
        date_time,
        offset,
        zone,
    })
}

/// A signed run of digits and whether its text carried a minus sign.
struct SignedNumber<'a> {
    negative: bool,
    digits: &'a str,
}

impl SignedNumber<'_> {
    fn to_i64(&self, cursor: &Cursor<'_>) -> TemporalResult<i64> {
        let magnitude = i128::from(
            self.digits
                .parse::<u64>()
                .map_err(|_| overflow(cursor))?,
        );
        let value = if self.negative { -magnitude } else { magnitude };
        i64::try_from(value).map_err(|_| overflow(cursor))
    }

    fn to_i32(&self, cursor: &Cursor<'_>) -> TemporalResult<i32> {
        utils::to_i32(self.to_i64(cursor)?).map_err(|_| overflow(cursor))
    }
}

fn overflow(cursor: &Cursor<'_>) -> TemporalError {
    TemporalError::parse()
        .with_message(format!(
            "Text '{}' could not be parsed: numeric overflow",
            cursor.source
        ))
        .with_position(cursor.pos)
}

/// Reads `[-+]?[0-9]+` when the cursor is at a sign or a digit.
fn signed_number<'a>(cursor: &mut Cursor<'a>) -> TemporalResult<Option<SignedNumber<'a>>> {
    if !matches!(cursor.peek(), Some(b'+' | b'-' | b'0'..=b'9')) {
        return Ok(None);
    }
    let negative = cursor.sign() == Some(Sign::Negative);
    let digits = cursor.digit_run();
    if digits.is_empty() {
        return Err(if cursor.is_done() {
            cursor.abrupt_end()
        } else {
            cursor.error()
        });
    }
    Ok(Some(SignedNumber { negative, digits }))
}

/// Parses `[-+]?P[nD][T[nH][nM][n[.f]S]]`, ignoring case.
pub(crate) fn parse_duration(text: &str) -> TemporalResult<Duration> {
    let mut cursor = Cursor::new(text);
    let negate = cursor.sign() == Some(Sign::Negative);
    cursor.expect(b'P')?;

    let mut seconds = 0i64;
    let mut nanos = 0i64;
    let mut found = false;

    if let Some(days) = signed_number(&mut cursor)? {
        cursor.expect(b'D')?;
        let days = days.to_i64(&cursor)?;
        seconds = days.checked_mul(SECONDS_PER_DAY).ok_or_else(|| overflow(&cursor))?;
        found = true;
    }

    if cursor.eat(b'T') {
        // Units must appear in the order hours, minutes, seconds.
        let mut last_unit = 0;
        let mut found_time = false;
        while let Some(number) = signed_number(&mut cursor)? {
            let unit_seconds = match cursor.peek().map(|b| b.to_ascii_uppercase()) {
                Some(b'H') if last_unit < 1 => {
                    last_unit = 1;
                    SECONDS_PER_HOUR
                }
                Some(b'M') if last_unit < 2 => {
                    last_unit = 2;
                    SECONDS_PER_MINUTE
                }
                Some(b'S' | b'.' | b',') if last_unit < 3 => {
                    last_unit = 3;
                    1
                }
                Some(_) => return Err(cursor.error()),
                None => return Err(cursor.abrupt_end()),
            };
            if unit_seconds == 1 && (cursor.eat(b'.') || cursor.eat(b',')) {
                let fraction = i64::from(fraction(&mut cursor, 0)?);
                nanos = if number.negative { -fraction } else { fraction };
                cursor.expect(b'S')?;
            } else {
                cursor.pos += 1;
            }
            let value = number
                .to_i64(&cursor)?
                .checked_mul(unit_seconds)
                .ok_or_else(|| overflow(&cursor))?;
            seconds = seconds.checked_add(value).ok_or_else(|| overflow(&cursor))?;
            found_time = true;
        }
        if !found_time {
            return Err(if cursor.is_done() {
                cursor.abrupt_end()
            } else {
                cursor.error()
            });
        }
        found = true;
    }

    if !found {
        return Err(cursor.error().with_message(format!(
            "Text '{text}' cannot be parsed to a Duration"
        )));
    }
    cursor.finish()?;

    let duration = Duration::of_seconds_adjusted(seconds, nanos).map_err(|_| overflow(&cursor))?;
    if negate {
        return duration.negated().map_err(|_| overflow(&cursor));
    }
    Ok(duration)
}

/// Parses `[-+]?P[nY][nM][nW][nD]`, ignoring case.
pub(crate) fn parse_period(text: &str) -> TemporalResult<Period> {
    let mut cursor = Cursor::new(text);
    let negate = cursor.sign() == Some(Sign::Negative);
    cursor.expect(b'P')?;

    let mut parts = [0i32; 4];
    let mut last_unit = None;
    while let Some(number) = signed_number(&mut cursor)? {
        let unit = match cursor.peek().map(|b| b.to_ascii_uppercase()) {
            Some(b'Y') => 0,
            Some(b'M') => 1,
            Some(b'W') => 2,
            Some(b'D') => 3,
            Some(_) => return Err(cursor.error()),
            None => return Err(cursor.abrupt_end()),
        };
        if last_unit.is_some_and(|last| unit <= last) {
            return Err(cursor.error());
        }
        parts[unit] = number.to_i32(&cursor)?;
        last_unit = Some(unit);
        cursor.pos += 1;
    }
    if last_unit.is_none() {
        return Err(cursor.error().with_message(format!(
            "Text '{text}' cannot be parsed to a Period"
        )));
    }
    cursor.finish()?;

    let [years, months, weeks, days] = parts;
    let days = weeks
        .checked_mul(7)
        .and_then(|w| w.checked_add(days))
        .ok_or_else(|| overflow(&cursor))?;
    let period = Period::of(years, months, days);
    if negate {
        return period.negated().map_err(|_| overflow(&cursor));
    }
    Ok(period)
}

// ==== Formatting ====

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Splits a nanosecond value into nine digits, returning the position after
/// the last non-zero digit.
fn u32_to_digits(mut value: u32) -> ([u8; 9], usize) {
    let mut output = [0; 9];
    let mut precision = 0;
    let mut i = 9;
    while i != 0 {
        let v = (value % 10) as u8;
        value /= 10;
        if precision == 0 && v != 0 {
            precision = i;
        }
        output[i - 1] = v;
        i -= 1;
    }

    (output, precision)
}

fn write_digits<W: core::fmt::Write + ?Sized>(
    digits: &[u8],
    sink: &mut W,
) -> core::fmt::Result {
    for digit in digits {
        digit.write_to(sink)?;
    }
    Ok(())
}

const fn decimal_len(mut value: u32) -> usize {
    let mut len = 1;
    while value >= 10 {
        value /= 10;
        len += 1;
    }
    len
}

/// `yyyy-MM-dd`, with a sign and at least four digits outside `0000..=9999`.
#[derive(Debug)]
pub(crate) struct FormattableDate(pub i32, pub u8, pub u8);

impl FormattableDate {
    const fn year_len(&self) -> usize {
        if 0 <= self.0 && self.0 <= 9999 {
            return 4;
        }
        let digits = decimal_len(self.0.unsigned_abs());
        1 + if digits < 4 { 4 } else { digits }
    }
}

impl Writeable for FormattableDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let year = self.0;
        if !(0..=9999).contains(&year) {
            sink.write_char(if year < 0 { '-' } else { '+' })?;
        }
        let magnitude = year.unsigned_abs();
        for _ in decimal_len(magnitude)..4 {
            sink.write_char('0')?;
        }
        magnitude.write_to(sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.1, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.2, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(6 + self.year_len())
    }
}

/// `HH:mm`, then `:ss` and a fraction of 3, 6 or 9 digits as needed.
#[derive(Debug)]
pub(crate) struct FormattableTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nano: u32,
    /// Always writes the seconds, even when they are zero.
    pub include_seconds: bool,
}

impl FormattableTime {
    const fn fraction_len(&self) -> usize {
        if self.nano == 0 {
            0
        } else if self.nano % 1_000_000 == 0 {
            3
        } else if self.nano % 1_000 == 0 {
            6
        } else {
            9
        }
    }

    const fn writes_seconds(&self) -> bool {
        self.include_seconds || self.second > 0 || self.nano > 0
    }
}

impl Writeable for FormattableTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        if !self.writes_seconds() {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        let len = self.fraction_len();
        if len == 0 {
            return Ok(());
        }
        sink.write_char('.')?;
        let (digits, _) = u32_to_digits(self.nano);
        write_digits(&digits[..len], sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if !self.writes_seconds() {
            return LengthHint::exact(5);
        }
        match self.fraction_len() {
            0 => LengthHint::exact(8),
            len => LengthHint::exact(9 + len),
        }
    }
}

/// `Z` or `±HH:MM[:SS]`.
#[derive(Debug)]
pub(crate) struct FormattableOffset {
    pub total_seconds: i32,
}

impl Writeable for FormattableOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.total_seconds == 0 {
            return sink.write_char('Z');
        }
        sink.write_char(if self.total_seconds < 0 { '-' } else { '+' })?;
        let abs = self.total_seconds.unsigned_abs();
        write_padded_u8((abs / 3600) as u8, sink)?;
        sink.write_char(':')?;
        write_padded_u8(((abs / 60) % 60) as u8, sink)?;
        if abs % 60 != 0 {
            sink.write_char(':')?;
            write_padded_u8((abs % 60) as u8, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self.total_seconds {
            0 => LengthHint::exact(1),
            s if s % 60 != 0 => LengthHint::exact(9),
            _ => LengthHint::exact(6),
        }
    }
}

/// `PT8H6M12.345S`; hours are the largest unit written.
#[derive(Debug)]
pub(crate) struct FormattableDuration {
    pub seconds: i64,
    pub nanos: u32,
}

impl Writeable for FormattableDuration {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.seconds == 0 && self.nanos == 0 {
            return sink.write_str("PT0S");
        }
        // A negative duration with a fraction prints its seconds rounded
        // towards zero and the complement of the fraction.
        let borrow = self.seconds < 0 && self.nanos > 0;
        let total = if borrow { self.seconds + 1 } else { self.seconds };
        let hours = total / SECONDS_PER_HOUR;
        let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = total % SECONDS_PER_MINUTE;

        sink.write_str("PT")?;
        if hours != 0 {
            hours.write_to(sink)?;
            sink.write_char('H')?;
        }
        if minutes != 0 {
            minutes.write_to(sink)?;
            sink.write_char('M')?;
        }
        if seconds == 0 && self.nanos == 0 {
            return Ok(());
        }
        if borrow && seconds == 0 {
            sink.write_str("-0")?;
        } else {
            seconds.write_to(sink)?;
        }
        if self.nanos > 0 {
            let fraction = if borrow {
                NANOS_PER_SECOND as u32 - self.nanos
            } else {
                self.nanos
            };
            let (digits, precision) = u32_to_digits(fraction);
            sink.write_char('.')?;
            write_digits(&digits[..precision], sink)?;
        }
        sink.write_char('S')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::at_least(4)
    }
}

/// `P1Y2M3D`, or `P0D` for zero.
#[derive(Debug)]
pub(crate) struct FormattablePeriod(pub i32, pub i32, pub i32);

impl Writeable for FormattablePeriod {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.0 == 0 && self.1 == 0 && self.2 == 0 {
            return sink.write_str("P0D");
        }
        sink.write_char('P')?;
        for (value, suffix) in [(self.0, 'Y'), (self.1, 'M'), (self.2, 'D')] {
            if value != 0 {
                value.write_to(sink)?;
                sink.write_char(suffix)?;
            }
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::at_least(3)
    }
}

impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableOffset);
impl_display_with_writeable!(FormattableDuration);
impl_display_with_writeable!(FormattablePeriod);

#[cfg(test)]
mod tests {
    use super::{
        parse_duration, parse_local_date, parse_zoned_date_time, FormattableDate, FormattableTime,
    };
    use crate::{error::ErrorKind, LocalDate, LocalDateTime, ZoneOffset};
    use alloc::string::ToString;

    #[test]
    fn date_years() {
        assert_eq!(FormattableDate(2007, 1, 2).to_string(), "2007-01-02");
        assert_eq!(FormattableDate(0, 1, 2).to_string(), "0000-01-02");
        assert_eq!(FormattableDate(-44, 3, 15).to_string(), "-0044-03-15");
        assert_eq!(FormattableDate(12_345, 3, 15).to_string(), "+12345-03-15");
    }

    #[test]
    fn signed_years() {
        assert_eq!(
            parse_local_date("+10000-01-01").unwrap(),
            LocalDate::of(10_000, 1, 1).unwrap()
        );
        assert_eq!(
            parse_local_date("-0001-01-01").unwrap(),
            LocalDate::of(-1, 1, 1).unwrap()
        );
        assert_eq!(
            parse_local_date("-12345-03-15").unwrap().to_string(),
            "-12345-03-15"
        );

        // Four digit years are written without a plus sign.
        let err = parse_local_date("+2008-01-01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.position(), Some(5));
        assert!(parse_local_date("+0000-01-01").is_err());
        assert!(parse_local_date("+999-01-01").is_err());
    }

    #[test]
    fn time_fractions() {
        let time = |second, nano, include_seconds| FormattableTime {
            hour: 1,
            minute: 2,
            second,
            nano,
            include_seconds,
        };
        assert_eq!(time(0, 0, false).to_string(), "01:02");
        assert_eq!(time(0, 0, true).to_string(), "01:02:00");
        assert_eq!(time(3, 120_000_000, false).to_string(), "01:02:03.120");
        assert_eq!(time(3, 120_500_000, false).to_string(), "01:02:03.120500");
        assert_eq!(time(3, 1, false).to_string(), "01:02:03.000000001");
    }

    #[test]
    fn zoned_pieces() {
        let parsed = parse_zoned_date_time("2012-06-30T12:30:40+01:00[Europe/Paris]").unwrap();
        assert_eq!(
            parsed.date_time,
            LocalDateTime::try_new(2012, 6, 30, 12, 30, 40, 0).unwrap()
        );
        assert_eq!(parsed.offset, Some(ZoneOffset::of_hours(1).unwrap()));
        assert_eq!(parsed.zone, Some("Europe/Paris"));

        let parsed = parse_zoned_date_time("2012-06-30T12:30[UTC]").unwrap();
        assert_eq!(parsed.offset, None);
        assert_eq!(parsed.zone, Some("UTC"));

        let parsed = parse_zoned_date_time("2012-06-30T12:30:40.5+0130").unwrap();
        assert_eq!(parsed.offset, Some(ZoneOffset::of_hours_minutes(1, 30).unwrap()));
        assert_eq!(parsed.zone, None);

        let err = parse_zoned_date_time("2012-06-30T12:30[Europe/Paris").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(parse_zoned_date_time("2012-06-30T12:30[]").is_err());
        assert!(parse_zoned_date_time("2012-06-30T12:30+01:00 ").is_err());
    }

    #[test]
    fn error_positions() {
        let err = parse_duration("PT1X").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.position(), Some(3));

        let err = parse_duration("PT").unwrap_err();
        assert_eq!(err.position(), Some(2));
    }
}
