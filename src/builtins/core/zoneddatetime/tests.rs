use alloc::{string::ToString, vec, vec::Vec};

use super::ZonedDateTime;
use crate::{
    error::ErrorKind, provider::InMemoryProvider, ChronoField, ChronoUnit, DayOfWeek, Duration,
    Instant, LocalDateTime, LocalTime, Month, Period, Temporal, TemporalAccessor, TimeDefinition,
    ZoneId, ZoneOffset, ZoneOffsetTransition, ZoneOffsetTransitionRule, ZoneRules,
};

fn offset(hours: i32) -> ZoneOffset {
    ZoneOffset::of_hours(hours).unwrap()
}

fn dt(y: i32, mo: i32, d: i32, h: i32, mi: i32) -> LocalDateTime {
    LocalDateTime::try_new(y, mo, d, h, mi, 0, 0).unwrap()
}

fn paris_rules() -> ZoneRules {
    let rule = |month, dom, before, after| {
        ZoneOffsetTransitionRule::of(
            month,
            dom,
            Some(DayOfWeek::Sunday),
            LocalTime::of(1, 0).unwrap(),
            0,
            TimeDefinition::Utc,
            offset(1),
            before,
            after,
        )
        .unwrap()
    };
    let historic = vec![
        ZoneOffsetTransition::of(dt(1996, 3, 31, 2, 0), offset(1), offset(2)).unwrap(),
        ZoneOffsetTransition::of(dt(1996, 10, 27, 3, 0), offset(2), offset(1)).unwrap(),
    ];
    ZoneRules::new(
        offset(1),
        offset(1),
        Vec::new(),
        historic,
        vec![
            rule(Month::March, -1, offset(1), offset(2)),
            rule(Month::October, -1, offset(2), offset(1)),
        ],
    )
    .unwrap()
}

fn provider() -> InMemoryProvider {
    InMemoryProvider::default().with_zone("Europe/Paris", paris_rules())
}

fn paris() -> ZoneId {
    ZoneId::of_with_provider("Europe/Paris", &provider()).unwrap()
}

#[test]
fn gap_moves_forward() {
    let zdt = ZonedDateTime::of_local(dt(2008, 3, 30, 2, 30), paris(), None).unwrap();
    assert_eq!(zdt.to_local_date_time(), dt(2008, 3, 30, 3, 30));
    assert_eq!(zdt.offset(), offset(2));
    assert_eq!(zdt.to_string(), "2008-03-30T03:30+02:00[Europe/Paris]");

    // A preferred offset cannot keep a time that does not exist.
    let zdt = ZonedDateTime::of_local(dt(2008, 3, 30, 2, 30), paris(), Some(offset(1))).unwrap();
    assert_eq!(zdt.to_local_date_time(), dt(2008, 3, 30, 3, 30));
}

#[test]
fn overlap_prefers_earlier_offset() {
    let local = dt(2008, 10, 26, 2, 30);
    let earlier = ZonedDateTime::of(local, paris()).unwrap();
    assert_eq!(earlier.offset(), offset(2));
    assert_eq!(earlier.to_local_date_time(), local);

    let later = earlier.with_later_offset_at_overlap().unwrap();
    assert_eq!(later.offset(), offset(1));
    assert_eq!(later.to_local_date_time(), local);
    assert_eq!(later.with_earlier_offset_at_overlap().unwrap(), earlier);

    let preferred = ZonedDateTime::of_local(local, paris(), Some(offset(1))).unwrap();
    assert_eq!(preferred, later);
    let unrelated = ZonedDateTime::of_local(local, paris(), Some(offset(5))).unwrap();
    assert_eq!(unrelated, earlier);

    assert_eq!(later.to_epoch_second() - earlier.to_epoch_second(), 3_600);
}

#[test]
fn strict_construction() {
    let err = ZonedDateTime::of_strict(dt(2008, 3, 30, 2, 30), offset(1), paris()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ZoneResolution);
    assert_eq!(
        err.message(),
        "LocalDateTime '2008-03-30T02:30' falls in a gap in zone 'Europe/Paris'"
    );

    let err = ZonedDateTime::of_strict(dt(2008, 7, 1, 12, 0), offset(1), paris()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ZoneResolution);

    let overlap = dt(2008, 10, 26, 2, 30);
    let zdt = ZonedDateTime::of_strict(overlap, offset(1), paris()).unwrap();
    assert_eq!(zdt.offset(), offset(1));
    assert!(ZonedDateTime::of_strict(overlap, offset(2), paris()).is_ok());

    let fixed = ZoneId::Offset(offset(3));
    assert!(ZonedDateTime::of_strict(overlap, offset(3), fixed.clone()).is_ok());
    assert!(ZonedDateTime::of_strict(overlap, offset(2), fixed).is_err());
}

#[test]
fn resolution_is_total() {
    let zone = paris();
    let rules = zone.rules();
    for day in [dt(2008, 3, 30, 0, 0), dt(2008, 10, 26, 0, 0)] {
        for step in 0..(4 * 24) {
            let local = day.plus_minutes(step * 15).unwrap();
            let zdt = ZonedDateTime::of(local, zone.clone()).unwrap();
            let valid = rules.valid_offsets(&zdt.to_local_date_time()).unwrap();
            assert!(valid.contains(&zdt.offset()), "{local} resolved to {zdt}");
            if valid.is_empty() || rules.valid_offsets(&local).unwrap().is_empty() {
                assert_eq!(zdt.to_local_date_time(), local.plus_hours(1).unwrap());
            } else {
                assert_eq!(zdt.to_local_date_time(), local);
            }
        }
    }
}

#[test]
fn instants() {
    let instant = Instant::parse("2008-03-30T01:00:00Z").unwrap();
    let zdt = instant.at_zone(paris()).unwrap();
    assert_eq!(zdt.to_string(), "2008-03-30T03:00+02:00[Europe/Paris]");
    assert_eq!(zdt.to_instant(), Ok(instant));

    let before = ZonedDateTime::of_instant(instant.minus_nanos(1).unwrap(), paris()).unwrap();
    let last_nano = LocalDateTime::try_new(2008, 3, 30, 1, 59, 59, 999_999_999).unwrap();
    assert_eq!(before.to_local_date_time(), last_nano);
    assert_eq!(before.offset(), offset(1));

    let tokyo = zdt.with_zone_same_instant(ZoneId::Offset(offset(9))).unwrap();
    assert_eq!(tokyo.to_string(), "2008-03-30T10:00+09:00");
    assert_eq!(tokyo.to_instant(), Ok(instant));

    let same_local = zdt.with_zone_same_local(ZoneId::Offset(offset(9))).unwrap();
    assert_eq!(same_local.to_local_date_time(), zdt.to_local_date_time());
    assert_eq!(same_local.offset(), offset(9));
}

#[test]
fn calendar_and_time_arithmetic() {
    let before_gap = ZonedDateTime::of(dt(2008, 3, 30, 1, 30), paris()).unwrap();
    let plus_hour = before_gap.plus_hours(1).unwrap();
    assert_eq!(plus_hour.to_local_date_time(), dt(2008, 3, 30, 3, 30));
    assert_eq!(plus_hour.offset(), offset(2));
    assert_eq!(
        before_gap.plus_duration(&Duration::of_seconds(3_600)).unwrap(),
        plus_hour
    );

    let day_before = ZonedDateTime::of(dt(2008, 3, 29, 12, 0), paris()).unwrap();
    let next_day = day_before.plus_days(1).unwrap();
    assert_eq!(next_day.to_local_date_time(), dt(2008, 3, 30, 12, 0));
    assert_eq!(next_day.offset(), offset(2));
    assert_eq!(day_before.plus_unit(1, &ChronoUnit::Days).unwrap(), next_day);
    assert_eq!(day_before.plus_period(&Period::of_days(1)).unwrap(), next_day);
    assert_eq!(next_day.minus_days(1).unwrap(), day_before);

    // Crossing a gap by calendar days keeps the wall-clock time unless it
    // lands in the gap.
    let into_gap = ZonedDateTime::of(dt(2008, 3, 29, 2, 30), paris()).unwrap();
    assert_eq!(
        into_gap.plus_days(1).unwrap().to_local_date_time(),
        dt(2008, 3, 30, 3, 30)
    );

    let overlap_later = ZonedDateTime::of_local(dt(2008, 10, 26, 2, 30), paris(), Some(offset(1)))
        .unwrap();
    let earlier = overlap_later.minus_hours(1).unwrap();
    assert_eq!(earlier.to_local_date_time(), dt(2008, 10, 26, 2, 30));
    assert_eq!(earlier.offset(), offset(2));

    // Preferring the current offset keeps the later offset inside the overlap.
    let shifted = overlap_later.with_minute(45).unwrap();
    assert_eq!(shifted.offset(), offset(1));
}

#[test]
fn until_across_transitions() {
    let start = ZonedDateTime::of(dt(2008, 3, 30, 0, 0), paris()).unwrap();
    let end = ZonedDateTime::of(dt(2008, 3, 30, 4, 0), paris()).unwrap();
    assert_eq!(start.until(&end, &ChronoUnit::Hours), Ok(3));
    assert_eq!(start.until(&end, &ChronoUnit::Minutes), Ok(180));
    assert_eq!(end.until(&start, &ChronoUnit::Hours), Ok(-3));

    let day_before = ZonedDateTime::of(dt(2008, 3, 29, 12, 0), paris()).unwrap();
    let day_after = ZonedDateTime::of(dt(2008, 3, 30, 12, 0), paris()).unwrap();
    // The end is aligned to +01:00, which makes it 11:00 on the next day.
    assert_eq!(day_before.until(&day_after, &ChronoUnit::Days), Ok(0));
    assert_eq!(day_before.until(&day_after, &ChronoUnit::Hours), Ok(23));

    // The end is first converted to the start's zone.
    let utc_end = day_after.with_zone_same_instant(ZoneId::Offset(ZoneOffset::UTC)).unwrap();
    assert_eq!(day_before.until(&utc_end, &ChronoUnit::Days), Ok(0));
    assert_eq!(day_before.until(&utc_end, &ChronoUnit::Hours), Ok(23));
}

#[test]
fn until_days_aligns_offsets() {
    let start = ZonedDateTime::of(dt(2008, 3, 29, 12, 0), paris()).unwrap();
    let full_day = ZonedDateTime::of(dt(2008, 3, 30, 13, 0), paris()).unwrap();
    assert_eq!(full_day.offset(), offset(2));
    assert_eq!(start.until(&full_day, &ChronoUnit::Days), Ok(1));
    assert_eq!(start.until(&full_day, &ChronoUnit::Hours), Ok(24));
    assert_eq!(full_day.until(&start, &ChronoUnit::Days), Ok(-1));

    // Months in the autumn gain the hour back.
    let summer = ZonedDateTime::of(dt(2008, 9, 26, 12, 0), paris()).unwrap();
    let winter = ZonedDateTime::of(dt(2008, 10, 26, 12, 0), paris()).unwrap();
    assert_eq!(summer.until(&winter, &ChronoUnit::Months), Ok(1));
    assert_eq!(summer.until(&winter, &ChronoUnit::Days), Ok(30));
    assert_eq!(winter.until(&summer, &ChronoUnit::Days), Ok(-30));
}

#[test]
fn fields() {
    let summer = ZonedDateTime::of(dt(2008, 7, 1, 12, 0), paris()).unwrap();
    assert_eq!(summer.get(&ChronoField::OffsetSeconds), Ok(7_200));
    assert_eq!(summer.get_long(&ChronoField::InstantSeconds), Ok(summer.to_epoch_second()));
    assert_eq!(
        summer.get(&ChronoField::InstantSeconds).unwrap_err().kind(),
        ErrorKind::Range
    );
    assert_eq!(summer.get(&ChronoField::HourOfDay), Ok(12));

    // An invalid offset is ignored.
    let unchanged = summer.with_field(&ChronoField::OffsetSeconds, 3_600).unwrap();
    assert_eq!(unchanged, summer);

    let overlap = ZonedDateTime::of(dt(2008, 10, 26, 2, 30), paris()).unwrap();
    let later = overlap.with_field(&ChronoField::OffsetSeconds, 3_600).unwrap();
    assert_eq!(later.offset(), offset(1));

    let moved = summer
        .with_field(&ChronoField::InstantSeconds, summer.to_epoch_second() + 60)
        .unwrap();
    assert_eq!(moved.to_local_date_time(), dt(2008, 7, 1, 12, 1));

    let into_gap = summer
        .with_field(&ChronoField::DayOfMonth, 30)
        .unwrap()
        .with_field(&ChronoField::MonthOfYear, 3)
        .unwrap()
        .with_field(&ChronoField::HourOfDay, 2)
        .unwrap();
    assert_eq!(into_gap.to_local_date_time(), dt(2008, 3, 30, 3, 0));
}

#[test]
fn text_round_trip() {
    let provider = provider();
    for text in [
        "2008-03-30T03:30+02:00[Europe/Paris]",
        "2008-10-26T02:30+01:00[Europe/Paris]",
        "2008-10-26T02:30+02:00[Europe/Paris]",
        "2012-06-30T12:30:40.500-05:00",
        "2012-06-30T12:30:40Z",
        "2012-06-30T12:30:40Z[UTC]",
    ] {
        let zdt = ZonedDateTime::parse_with_provider(text, &provider).unwrap();
        assert_eq!(zdt.to_string(), text);
    }

    // The offset fixes the instant, which is then shown in the zone.
    let zdt = ZonedDateTime::parse_with_provider("2008-07-01T12:00+01:00[Europe/Paris]", &provider)
        .unwrap();
    assert_eq!(zdt.to_string(), "2008-07-01T13:00+02:00[Europe/Paris]");

    // Without an offset the local date-time is resolved.
    let zdt = ZonedDateTime::parse_with_provider("2008-03-30T02:30[Europe/Paris]", &provider)
        .unwrap();
    assert_eq!(zdt.to_string(), "2008-03-30T03:30+02:00[Europe/Paris]");

    let zdt = ZonedDateTime::parse_with_provider("2008-07-01T12:00+01:00[+01:00]", &provider)
        .unwrap();
    assert_eq!(zdt.to_string(), "2008-07-01T12:00+01:00");

    for invalid in [
        "2008-07-01T12:00",
        "2008-07-01T12:00+01:00[Europe/Paris",
        "2008-07-01T12:00+01:00[]",
        "2008-07-01T12:00+01:00[Europe/Nowhere]",
    ] {
        assert!(
            ZonedDateTime::parse_with_provider(invalid, &provider).is_err(),
            "{invalid}"
        );
    }
}

#[test]
fn ordering() {
    let instant = Instant::parse("2008-07-01T10:00:00Z").unwrap();
    let paris = instant.at_zone(paris()).unwrap();
    let fixed = instant.at_zone(ZoneId::Offset(offset(2))).unwrap();
    let later = paris.plus_nanos(1).unwrap();

    assert!(paris < later);
    assert!(fixed < later);
    // Equal instants and local date-times order by zone id.
    assert!(fixed < paris);
    assert_ne!(fixed, paris);
    assert_eq!(paris.with_fixed_offset_zone(), fixed);
}

#[test]
fn start_of_day_in_gap() {
    let rule = |month, before, after| {
        ZoneOffsetTransitionRule::of(
            month,
            1,
            None,
            LocalTime::MIDNIGHT,
            0,
            TimeDefinition::Wall,
            offset(-3),
            before,
            after,
        )
        .unwrap()
    };
    let rules = ZoneRules::new(
        offset(-3),
        offset(-3),
        Vec::new(),
        Vec::new(),
        vec![
            rule(Month::February, offset(-2), offset(-3)),
            rule(Month::November, offset(-3), offset(-2)),
        ],
    )
    .unwrap();
    let provider = InMemoryProvider::default().with_zone("Test/Midnight", rules);
    let zone = ZoneId::of_with_provider("Test/Midnight", &provider).unwrap();

    let date = crate::LocalDate::of(2010, 11, 1).unwrap();
    let start = date.at_start_of_day(&zone).unwrap();
    assert_eq!(start.to_local_date_time(), dt(2010, 11, 1, 1, 0));
    assert_eq!(start.offset(), offset(-2));
}
