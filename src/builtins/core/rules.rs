//! This module implements the rules that define how a zone's offset varies.
//!
//! [`ZoneRules`] holds an ordered table of historic transitions plus a set of
//! recurring [`ZoneOffsetTransitionRule`]s for the years after the table
//! ends. Any local date-time classifies as exactly one of:
//!
//! - normal: exactly one valid offset;
//! - gap: no valid offset, clocks sprang forward over it;
//! - overlap: two valid offsets, clocks fell back over it.

use alloc::{vec, vec::Vec};
use core::fmt;

use crate::{
    adjusters,
    builtins::core::{Duration, Instant, LocalDate, LocalDateTime, LocalTime, ZoneOffset},
    iso::{self, DayOfWeek, Month},
    temporal::Temporal,
    utils, TemporalError, TemporalResult, TemporalUnwrap, SECONDS_PER_DAY,
};

/// The epoch-day bounds of [`LocalDate`].
const MIN_EPOCH_DAY: i64 = -365_243_219_162;
const MAX_EPOCH_DAY: i64 = 365_241_780_471;

// ==== ZoneOffsetTransition ====

/// A transition between two offsets caused by a discontinuity in the local
/// time-line.
///
/// The transition is described by the instant it occurs at and the local
/// date-time it occurs at in the offset before the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneOffsetTransition {
    epoch_second: i64,
    transition: LocalDateTime,
    before: ZoneOffset,
    after: ZoneOffset,
}

impl ZoneOffsetTransition {
    /// Creates a transition at the local date-time `transition`, expressed in
    /// the offset before the transition.
    pub fn of(
        transition: LocalDateTime,
        offset_before: ZoneOffset,
        offset_after: ZoneOffset,
    ) -> TemporalResult<Self> {
        if offset_before == offset_after {
            return Err(TemporalError::general("Offsets must not be equal"));
        }
        if transition.nano() != 0 {
            return Err(TemporalError::general("Nano-of-second must be zero"));
        }
        Ok(Self {
            epoch_second: transition.to_epoch_second(offset_before),
            transition,
            before: offset_before,
            after: offset_after,
        })
    }

    /// Creates a transition from the epoch second it occurs at.
    pub(crate) fn from_epoch_second(
        epoch_second: i64,
        offset_before: ZoneOffset,
        offset_after: ZoneOffset,
    ) -> TemporalResult<Self> {
        let transition = LocalDateTime::of_epoch_second(epoch_second, 0, offset_before)?;
        Ok(Self {
            epoch_second,
            transition,
            before: offset_before,
            after: offset_after,
        })
    }

    /// Returns the instant of the transition.
    pub fn instant(&self) -> TemporalResult<Instant> {
        Instant::of_epoch_second(self.epoch_second)
    }

    /// Returns the epoch second of the transition.
    #[inline]
    #[must_use]
    pub const fn to_epoch_second(&self) -> i64 {
        self.epoch_second
    }

    /// Returns the local date-time of the transition in the offset before it.
    #[inline]
    #[must_use]
    pub const fn date_time_before(&self) -> LocalDateTime {
        self.transition
    }

    /// Returns the local date-time of the transition in the offset after it.
    pub fn date_time_after(&self) -> TemporalResult<LocalDateTime> {
        self.transition.plus_seconds(self.duration_seconds())
    }

    #[inline]
    #[must_use]
    pub const fn offset_before(&self) -> ZoneOffset {
        self.before
    }

    #[inline]
    #[must_use]
    pub const fn offset_after(&self) -> ZoneOffset {
        self.after
    }

    /// Returns the length of the transition, positive for a gap and negative
    /// for an overlap.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::of_seconds(self.duration_seconds())
    }

    #[inline]
    const fn duration_seconds(&self) -> i64 {
        self.after.total_seconds() as i64 - self.before.total_seconds() as i64
    }

    /// Returns whether local times are skipped by this transition.
    #[inline]
    #[must_use]
    pub const fn is_gap(&self) -> bool {
        self.after.total_seconds() > self.before.total_seconds()
    }

    /// Returns whether local times are repeated by this transition.
    #[inline]
    #[must_use]
    pub const fn is_overlap(&self) -> bool {
        self.after.total_seconds() < self.before.total_seconds()
    }

    /// Returns whether `offset` is valid during this transition.
    ///
    /// No offset is valid in a gap. Both offsets are valid in an overlap.
    #[must_use]
    pub fn is_valid_offset(&self, offset: ZoneOffset) -> bool {
        !self.is_gap() && (self.before == offset || self.after == offset)
    }

    /// Returns the offsets valid during this transition, earlier offset first.
    #[must_use]
    pub fn valid_offsets(&self) -> Vec<ZoneOffset> {
        if self.is_gap() {
            return Vec::new();
        }
        vec![self.before, self.after]
    }
}

impl PartialOrd for ZoneOffsetTransition {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZoneOffsetTransition {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.epoch_second
            .cmp(&other.epoch_second)
            .then(self.before.cmp(&other.before))
            .then(self.after.cmp(&other.after))
    }
}

impl fmt::Display for ZoneOffsetTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_gap() { "Gap" } else { "Overlap" };
        write!(
            f,
            "Transition[{kind} at {}{} to {}]",
            self.transition, self.before, self.after
        )
    }
}

// ==== ZoneOffsetTransitionRule ====

/// How the local time of a [`ZoneOffsetTransitionRule`] is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeDefinition {
    /// The time is in UTC.
    Utc,
    /// The time is the wall-clock time before the transition.
    Wall,
    /// The time is in the standard offset in force before the transition.
    Standard,
}

impl TimeDefinition {
    /// Converts `local`, read according to this definition, into the
    /// wall-clock time before the transition.
    pub fn create_date_time(
        &self,
        local: LocalDateTime,
        standard_offset: ZoneOffset,
        wall_offset: ZoneOffset,
    ) -> TemporalResult<LocalDateTime> {
        let wall = i64::from(wall_offset.total_seconds());
        match self {
            Self::Utc => local.plus_seconds(wall),
            Self::Standard => local.plus_seconds(wall - i64::from(standard_offset.total_seconds())),
            Self::Wall => Ok(local),
        }
    }
}

/// A rule for a transition that recurs every year, such as "last Sunday of
/// March at 01:00 UTC".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneOffsetTransitionRule {
    month: Month,
    day_of_month_indicator: i8,
    day_of_week: Option<DayOfWeek>,
    time: LocalTime,
    day_adjustment: i8,
    time_definition: TimeDefinition,
    standard_offset: ZoneOffset,
    offset_before: ZoneOffset,
    offset_after: ZoneOffset,
}

impl ZoneOffsetTransitionRule {
    /// Creates a rule.
    ///
    /// `day_of_month_indicator` is the day-of-month the transition happens
    /// on, or, when negative, the day counted back from the end of the month
    /// with `-1` as the last day. With a `day_of_week`, the transition moves
    /// to the first matching weekday on or after the indicated day, or on or
    /// before it when the indicator is negative.
    ///
    /// `day_adjustment` adds whole days to the resolved date, so midnight
    /// with an adjustment of one is the end of the day, `24:00`.
    #[allow(clippy::too_many_arguments)]
    pub fn of(
        month: Month,
        day_of_month_indicator: i8,
        day_of_week: Option<DayOfWeek>,
        time: LocalTime,
        day_adjustment: i8,
        time_definition: TimeDefinition,
        standard_offset: ZoneOffset,
        offset_before: ZoneOffset,
        offset_after: ZoneOffset,
    ) -> TemporalResult<Self> {
        if !(-28..=31).contains(&day_of_month_indicator) || day_of_month_indicator == 0 {
            return Err(TemporalError::range().with_message(
                "Day of month indicator must be between -28 and 31 inclusive excluding zero",
            ));
        }
        if !(-7..=7).contains(&day_adjustment) {
            return Err(TemporalError::range()
                .with_message("Day adjustment must be between -7 and 7 inclusive"));
        }
        Ok(Self {
            month,
            day_of_month_indicator,
            day_of_week,
            time,
            day_adjustment,
            time_definition,
            standard_offset,
            offset_before,
            offset_after,
        })
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[inline]
    #[must_use]
    pub const fn day_of_month_indicator(&self) -> i8 {
        self.day_of_month_indicator
    }

    #[inline]
    #[must_use]
    pub const fn day_of_week(&self) -> Option<DayOfWeek> {
        self.day_of_week
    }

    #[inline]
    #[must_use]
    pub const fn local_time(&self) -> LocalTime {
        self.time
    }

    #[inline]
    #[must_use]
    pub const fn day_adjustment(&self) -> i8 {
        self.day_adjustment
    }

    /// Returns whether the transition happens at `24:00`.
    #[inline]
    #[must_use]
    pub fn is_midnight_end_of_day(&self) -> bool {
        self.day_adjustment == 1 && self.time == LocalTime::MIDNIGHT
    }

    #[inline]
    #[must_use]
    pub const fn time_definition(&self) -> TimeDefinition {
        self.time_definition
    }

    #[inline]
    #[must_use]
    pub const fn standard_offset(&self) -> ZoneOffset {
        self.standard_offset
    }

    #[inline]
    #[must_use]
    pub const fn offset_before(&self) -> ZoneOffset {
        self.offset_before
    }

    #[inline]
    #[must_use]
    pub const fn offset_after(&self) -> ZoneOffset {
        self.offset_after
    }

    /// Creates the transition this rule describes in `year`.
    pub fn create_transition(&self, year: i32) -> TemporalResult<ZoneOffsetTransition> {
        let date = if self.day_of_month_indicator < 0 {
            let length = self.month.length(iso::is_leap_year(i64::from(year)));
            let day = i32::from(length) + 1 + i32::from(self.day_of_month_indicator);
            let date = LocalDate::of_month(year, self.month, day)?;
            match self.day_of_week {
                Some(dow) => date.with_adjuster(&adjusters::previous_or_same(dow))?,
                None => date,
            }
        } else {
            let date =
                LocalDate::of_month(year, self.month, i32::from(self.day_of_month_indicator))?;
            match self.day_of_week {
                Some(dow) => date.with_adjuster(&adjusters::next_or_same(dow))?,
                None => date,
            }
        };
        let date = date.plus_days(i64::from(self.day_adjustment))?;
        let local = self.time_definition.create_date_time(
            LocalDateTime::of(date, self.time),
            self.standard_offset,
            self.offset_before,
        )?;
        ZoneOffsetTransition::of(local, self.offset_before, self.offset_after)
    }
}

// ==== ZoneRules ====

/// Information about the offsets valid at a local date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetInfo {
    /// A single offset is valid.
    Normal(ZoneOffset),
    /// The local date-time is within a gap or an overlap.
    Transition(ZoneOffsetTransition),
}

/// The classification of a local date-time against a zone's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalResolution {
    /// Exactly one offset is valid.
    Normal(ZoneOffset),
    /// No offset is valid, clocks skipped over the local date-time.
    Gap(ZoneOffsetTransition),
    /// Two offsets are valid, the local date-time occurs twice.
    Overlap(ZoneOffsetTransition),
}

/// The rules defining how the offset of a zone varies.
///
/// The rules are an immutable transition table and are safe to share between
/// threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRules {
    /// Epoch seconds of changes to the standard offset.
    standard_transitions: Vec<i64>,
    /// Standard offsets, one more than `standard_transitions`.
    standard_offsets: Vec<ZoneOffset>,
    /// Epoch seconds of changes to the wall offset.
    savings_instant_transitions: Vec<i64>,
    /// Local date-times of each wall offset transition, two per transition.
    ///
    /// A gap stores `[before, after]`, an overlap `[after, before]`, so the
    /// pair is always ascending.
    savings_local_transitions: Vec<LocalDateTime>,
    /// Wall offsets, one more than `savings_instant_transitions`.
    wall_offsets: Vec<ZoneOffset>,
    last_rules: Vec<ZoneOffsetTransitionRule>,
}

// ==== Private API ====

impl ZoneRules {
    fn find_year(epoch_second: i64, offset: ZoneOffset) -> i32 {
        let local_second = epoch_second.saturating_add(i64::from(offset.total_seconds()));
        let epoch_day =
            utils::floor_div(local_second, SECONDS_PER_DAY).clamp(MIN_EPOCH_DAY, MAX_EPOCH_DAY);
        iso::ymd_from_epoch_day(epoch_day).0 as i32
    }

    fn find_transition_array(&self, year: i32) -> TemporalResult<Vec<ZoneOffsetTransition>> {
        self.last_rules
            .iter()
            .map(|rule| rule.create_transition(year))
            .collect()
    }

    #[inline]
    fn last_wall_offset(&self) -> ZoneOffset {
        self.wall_offsets.last().copied().unwrap_or_default()
    }

    /// Creates the historic transition at `index`.
    fn historic_transition(&self, index: usize) -> TemporalResult<ZoneOffsetTransition> {
        let epoch_second = self.savings_instant_transitions.get(index).temporal_unwrap()?;
        let before = self.wall_offsets.get(index).temporal_unwrap()?;
        let after = self.wall_offsets.get(index + 1).temporal_unwrap()?;
        ZoneOffsetTransition::from_epoch_second(*epoch_second, *before, *after)
    }

    /// Whether `epoch_second` is past the historic table and covered by the
    /// recurring rules.
    #[inline]
    fn uses_last_rules(&self, epoch_second: i64) -> bool {
        !self.last_rules.is_empty()
            && self
                .savings_instant_transitions
                .last()
                .map_or(true, |last| epoch_second > *last)
    }

    fn find_offset_info(local: &LocalDateTime, trans: &ZoneOffsetTransition) -> TemporalResult<OffsetInfo> {
        let before = trans.date_time_before();
        let after = trans.date_time_after()?;
        let info = if trans.is_gap() {
            if *local < before {
                OffsetInfo::Normal(trans.offset_before())
            } else if *local < after {
                OffsetInfo::Transition(*trans)
            } else {
                OffsetInfo::Normal(trans.offset_after())
            }
        } else if *local >= before {
            OffsetInfo::Normal(trans.offset_after())
        } else if *local < after {
            OffsetInfo::Normal(trans.offset_before())
        } else {
            OffsetInfo::Transition(*trans)
        };
        Ok(info)
    }
}

// ==== Public API ====

impl ZoneRules {
    /// Creates rules in which `offset` always applies.
    #[must_use]
    pub fn of(offset: ZoneOffset) -> Self {
        Self {
            standard_transitions: Vec::new(),
            standard_offsets: vec![offset],
            savings_instant_transitions: Vec::new(),
            savings_local_transitions: Vec::new(),
            wall_offsets: vec![offset],
            last_rules: Vec::new(),
        }
    }

    /// Creates rules from historic transitions and recurring rules.
    ///
    /// - `base_standard_offset` and `base_wall_offset` apply before the first
    ///   transition.
    /// - `standard_offset_transitions` are changes to the standard offset.
    /// - `transitions` are changes to the wall offset.
    /// - `last_rules` recur every year after the last transition.
    ///
    /// Both transition lists must be in ascending order.
    pub fn new(
        base_standard_offset: ZoneOffset,
        base_wall_offset: ZoneOffset,
        standard_offset_transitions: Vec<ZoneOffsetTransition>,
        transitions: Vec<ZoneOffsetTransition>,
        last_rules: Vec<ZoneOffsetTransitionRule>,
    ) -> TemporalResult<Self> {
        let ascending = |list: &[ZoneOffsetTransition]| {
            list.windows(2)
                .all(|pair| pair[0].to_epoch_second() < pair[1].to_epoch_second())
        };
        if !ascending(&standard_offset_transitions) || !ascending(&transitions) {
            return Err(TemporalError::general("Transitions must be in ascending order"));
        }

        let mut standard_offsets = Vec::with_capacity(standard_offset_transitions.len() + 1);
        standard_offsets.push(base_standard_offset);
        standard_offsets.extend(standard_offset_transitions.iter().map(|t| t.offset_after()));
        let standard_transitions = standard_offset_transitions
            .iter()
            .map(ZoneOffsetTransition::to_epoch_second)
            .collect();

        let mut wall_offsets = Vec::with_capacity(transitions.len() + 1);
        wall_offsets.push(base_wall_offset);
        let mut savings_local_transitions = Vec::with_capacity(transitions.len() * 2);
        for transition in &transitions {
            let before = transition.date_time_before();
            let after = transition.date_time_after()?;
            if transition.is_gap() {
                savings_local_transitions.extend([before, after]);
            } else {
                savings_local_transitions.extend([after, before]);
            }
            wall_offsets.push(transition.offset_after());
        }
        let savings_instant_transitions = transitions
            .iter()
            .map(ZoneOffsetTransition::to_epoch_second)
            .collect();

        Ok(Self {
            standard_transitions,
            standard_offsets,
            savings_instant_transitions,
            savings_local_transitions,
            wall_offsets,
            last_rules,
        })
    }

    /// Returns whether the offset never changes.
    #[must_use]
    pub fn is_fixed_offset(&self) -> bool {
        self.savings_instant_transitions.is_empty() && self.last_rules.is_empty()
    }

    /// Returns the offset in force at `instant`.
    pub fn offset(&self, instant: &Instant) -> TemporalResult<ZoneOffset> {
        self.offset_at_epoch_second(instant.epoch_second())
    }

    /// Returns the offset in force at `epoch_second`.
    pub(crate) fn offset_at_epoch_second(&self, epoch_second: i64) -> TemporalResult<ZoneOffset> {
        if self.is_fixed_offset() {
            return Ok(self.wall_offsets[0]);
        }
        if self.uses_last_rules(epoch_second) {
            let year = Self::find_year(epoch_second, self.last_wall_offset());
            let transitions = self.find_transition_array(year)?;
            let mut offset = self.last_wall_offset();
            for transition in &transitions {
                if epoch_second < transition.to_epoch_second() {
                    return Ok(transition.offset_before());
                }
                offset = transition.offset_after();
            }
            return Ok(offset);
        }
        let index = self
            .savings_instant_transitions
            .partition_point(|t| *t <= epoch_second);
        Ok(self.wall_offsets[index])
    }

    /// Returns the offset information for a local date-time.
    ///
    /// This is either the single valid offset or the gap or overlap
    /// transition the local date-time falls in.
    pub fn offset_info(&self, local: &LocalDateTime) -> TemporalResult<OffsetInfo> {
        if self.is_fixed_offset() {
            return Ok(OffsetInfo::Normal(self.wall_offsets[0]));
        }
        let past_table = self
            .savings_local_transitions
            .last()
            .map_or(true, |last| local > last);
        if !self.last_rules.is_empty() && past_table {
            let transitions = self.find_transition_array(local.year())?;
            let mut info = OffsetInfo::Normal(self.last_wall_offset());
            for transition in &transitions {
                info = Self::find_offset_info(local, transition)?;
                match info {
                    OffsetInfo::Transition(_) => return Ok(info),
                    OffsetInfo::Normal(offset) if offset == transition.offset_before() => {
                        return Ok(info)
                    }
                    OffsetInfo::Normal(_) => {}
                }
            }
            return Ok(info);
        }

        // Local transitions are ascending pairs, so the number of entries at
        // or before `local` identifies the pair.
        let count = self
            .savings_local_transitions
            .partition_point(|t| t <= local);
        if count == 0 {
            return Ok(OffsetInfo::Normal(self.wall_offsets[0]));
        }
        let index = count - 1;
        if index % 2 == 1 {
            return Ok(OffsetInfo::Normal(self.wall_offsets[index / 2 + 1]));
        }
        let local_before = self.savings_local_transitions[index];
        let local_after = self.savings_local_transitions[index + 1];
        let offset_before = self.wall_offsets[index / 2];
        let offset_after = self.wall_offsets[index / 2 + 1];
        let transition_local = if offset_after > offset_before {
            local_before
        } else {
            local_after
        };
        Ok(OffsetInfo::Transition(ZoneOffsetTransition::of(
            transition_local,
            offset_before,
            offset_after,
        )?))
    }

    /// Classifies a local date-time as normal, in a gap or in an overlap.
    pub fn classify(&self, local: &LocalDateTime) -> TemporalResult<LocalResolution> {
        let resolution = match self.offset_info(local)? {
            OffsetInfo::Normal(offset) => LocalResolution::Normal(offset),
            OffsetInfo::Transition(trans) if trans.is_gap() => LocalResolution::Gap(trans),
            OffsetInfo::Transition(trans) => LocalResolution::Overlap(trans),
        };
        Ok(resolution)
    }

    /// Returns the offsets valid at a local date-time: none in a gap, two in
    /// an overlap and one otherwise.
    pub fn valid_offsets(&self, local: &LocalDateTime) -> TemporalResult<Vec<ZoneOffset>> {
        match self.offset_info(local)? {
            OffsetInfo::Normal(offset) => Ok(vec![offset]),
            OffsetInfo::Transition(trans) => Ok(trans.valid_offsets()),
        }
    }

    /// Returns the transition a local date-time falls in, if it is in a gap
    /// or an overlap.
    pub fn transition(&self, local: &LocalDateTime) -> TemporalResult<Option<ZoneOffsetTransition>> {
        match self.offset_info(local)? {
            OffsetInfo::Normal(_) => Ok(None),
            OffsetInfo::Transition(trans) => Ok(Some(trans)),
        }
    }

    /// Returns whether `offset` is valid at a local date-time.
    pub fn is_valid_offset(&self, local: &LocalDateTime, offset: ZoneOffset) -> TemporalResult<bool> {
        match self.offset_info(local)? {
            OffsetInfo::Normal(valid) => Ok(valid == offset),
            OffsetInfo::Transition(trans) => Ok(trans.is_valid_offset(offset)),
        }
    }

    /// Returns the standard offset, the offset without daylight saving, at `instant`.
    #[must_use]
    pub fn standard_offset(&self, instant: &Instant) -> ZoneOffset {
        let epoch_second = instant.epoch_second();
        let index = self
            .standard_transitions
            .partition_point(|t| *t <= epoch_second);
        self.standard_offsets[index]
    }

    /// Returns the amount of daylight saving in force at `instant`.
    pub fn daylight_savings(&self, instant: &Instant) -> TemporalResult<Duration> {
        let standard = self.standard_offset(instant);
        let actual = self.offset(instant)?;
        Ok(Duration::of_seconds(
            i64::from(actual.total_seconds()) - i64::from(standard.total_seconds()),
        ))
    }

    /// Returns whether daylight saving is in force at `instant`.
    pub fn is_daylight_savings(&self, instant: &Instant) -> TemporalResult<bool> {
        Ok(self.standard_offset(instant) != self.offset(instant)?)
    }

    /// Returns the first transition strictly after `instant`.
    pub fn next_transition(&self, instant: &Instant) -> TemporalResult<Option<ZoneOffsetTransition>> {
        if self.is_fixed_offset() {
            return Ok(None);
        }
        let mut epoch_second = instant.epoch_second();
        if instant.nano() > 0 && epoch_second < i64::MAX {
            epoch_second += 1;
        }
        let past_table = self
            .savings_instant_transitions
            .last()
            .map_or(true, |last| epoch_second >= *last);
        if past_table {
            if self.last_rules.is_empty() {
                return Ok(None);
            }
            let year = Self::find_year(epoch_second, self.last_wall_offset());
            let transitions = self.find_transition_array(year)?;
            if let Some(next) = transitions
                .iter()
                .find(|t| epoch_second < t.to_epoch_second())
            {
                return Ok(Some(*next));
            }
            if i64::from(year) < crate::fields::MAX_YEAR {
                return Ok(self.find_transition_array(year + 1)?.first().copied());
            }
            return Ok(None);
        }
        let index = self
            .savings_instant_transitions
            .partition_point(|t| *t <= epoch_second);
        self.historic_transition(index).map(Some)
    }

    /// Returns the last transition at or before `instant`.
    pub fn previous_transition(
        &self,
        instant: &Instant,
    ) -> TemporalResult<Option<ZoneOffsetTransition>> {
        if self.is_fixed_offset() {
            return Ok(None);
        }
        let mut epoch_second = instant.epoch_second();
        if instant.nano() > 0 && epoch_second < i64::MAX {
            epoch_second += 1;
        }
        if self.uses_last_rules(epoch_second) {
            let last_offset = self.last_wall_offset();
            let year = Self::find_year(epoch_second, last_offset);
            let transitions = self.find_transition_array(year)?;
            if let Some(previous) = transitions
                .iter()
                .rev()
                .find(|t| epoch_second > t.to_epoch_second())
            {
                return Ok(Some(*previous));
            }
            let last_historic_year = self
                .savings_instant_transitions
                .last()
                .map(|last| Self::find_year(*last, last_offset));
            let previous_year = year - 1;
            if last_historic_year.map_or(i64::from(previous_year) >= crate::fields::MIN_YEAR, |y| {
                previous_year > y
            }) {
                return Ok(self.find_transition_array(previous_year)?.last().copied());
            }
        }
        let index = self
            .savings_instant_transitions
            .partition_point(|t| *t < epoch_second);
        if index == 0 {
            return Ok(None);
        }
        self.historic_transition(index - 1).map(Some)
    }

    /// Returns the complete list of historic transitions.
    pub fn transitions(&self) -> TemporalResult<Vec<ZoneOffsetTransition>> {
        (0..self.savings_instant_transitions.len())
            .map(|index| self.historic_transition(index))
            .collect()
    }

    /// Returns the rules for transitions after the historic table.
    #[must_use]
    pub fn transition_rules(&self) -> &[ZoneOffsetTransitionRule] {
        &self.last_rules
    }
}

impl fmt::Display for ZoneRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let standard = self.standard_offsets.last().copied().unwrap_or_default();
        write!(f, "ZoneRules[currentStandardOffset={standard}]")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        LocalResolution, OffsetInfo, TimeDefinition, ZoneOffsetTransition,
        ZoneOffsetTransitionRule, ZoneRules,
    };
    use crate::{
        DayOfWeek, Duration, Instant, LocalDateTime, LocalTime, Month, ZoneOffset,
    };
    use alloc::{string::ToString, vec, vec::Vec};

    fn offset(hours: i32) -> ZoneOffset {
        ZoneOffset::of_hours(hours).unwrap()
    }

    fn dt(y: i32, mo: i32, d: i32, h: i32, mi: i32) -> LocalDateTime {
        LocalDateTime::try_new(y, mo, d, h, mi, 0, 0).unwrap()
    }

    /// Central European rules: summer time from the last Sunday of March to
    /// the last Sunday of October, switching at 01:00 UTC. The 1976
    /// transitions form the historic table.
    fn central_europe() -> ZoneRules {
        let spring = ZoneOffsetTransitionRule::of(
            Month::March,
            25,
            Some(DayOfWeek::Sunday),
            LocalTime::of(1, 0).unwrap(),
            0,
            TimeDefinition::Utc,
            offset(1),
            offset(1),
            offset(2),
        )
        .unwrap();
        let autumn = ZoneOffsetTransitionRule::of(
            Month::October,
            -1,
            Some(DayOfWeek::Sunday),
            LocalTime::of(1, 0).unwrap(),
            0,
            TimeDefinition::Utc,
            offset(1),
            offset(2),
            offset(1),
        )
        .unwrap();
        let historic = vec![
            ZoneOffsetTransition::of(dt(1976, 3, 28, 2, 0), offset(1), offset(2)).unwrap(),
            ZoneOffsetTransition::of(dt(1976, 10, 31, 3, 0), offset(2), offset(1)).unwrap(),
        ];
        ZoneRules::new(offset(1), offset(1), Vec::new(), historic, vec![spring, autumn]).unwrap()
    }

    #[test]
    fn fixed_rules() {
        let rules = ZoneRules::of(offset(3));
        assert!(rules.is_fixed_offset());
        assert_eq!(rules.offset(&Instant::EPOCH), Ok(offset(3)));
        assert_eq!(
            rules.classify(&dt(2008, 3, 30, 2, 30)),
            Ok(LocalResolution::Normal(offset(3)))
        );
        assert_eq!(rules.next_transition(&Instant::EPOCH), Ok(None));
        assert_eq!(rules.transitions(), Ok(Vec::new()));
    }

    #[test]
    fn rule_creates_transitions() {
        let rules = central_europe();
        let spring = rules.transition_rules()[0].create_transition(2008).unwrap();
        assert_eq!(spring.date_time_before(), dt(2008, 3, 30, 2, 0));
        assert_eq!(spring.date_time_after(), Ok(dt(2008, 3, 30, 3, 0)));
        assert!(spring.is_gap());
        assert_eq!(spring.duration(), Duration::of_seconds(3_600));

        let autumn = rules.transition_rules()[1].create_transition(2008).unwrap();
        assert_eq!(autumn.date_time_before(), dt(2008, 10, 26, 3, 0));
        assert!(autumn.is_overlap());
        assert_eq!(autumn.valid_offsets(), vec![offset(2), offset(1)]);
        assert_eq!(
            autumn.to_string(),
            "Transition[Overlap at 2008-10-26T03:00+02:00 to +01:00]"
        );
    }

    #[test]
    fn classification_from_rules() {
        let rules = central_europe();
        assert_eq!(
            rules.classify(&dt(2008, 1, 1, 0, 0)),
            Ok(LocalResolution::Normal(offset(1)))
        );
        assert_eq!(
            rules.classify(&dt(2008, 7, 1, 0, 0)),
            Ok(LocalResolution::Normal(offset(2)))
        );
        let LocalResolution::Gap(gap) = rules.classify(&dt(2008, 3, 30, 2, 30)).unwrap() else {
            panic!("expected a gap");
        };
        assert_eq!(gap.offset_before(), offset(1));
        assert_eq!(gap.offset_after(), offset(2));
        assert_eq!(rules.valid_offsets(&dt(2008, 3, 30, 2, 30)), Ok(Vec::new()));
        assert_eq!(
            rules.classify(&dt(2008, 3, 30, 3, 0)),
            Ok(LocalResolution::Normal(offset(2)))
        );

        let LocalResolution::Overlap(overlap) = rules.classify(&dt(2008, 10, 26, 2, 30)).unwrap()
        else {
            panic!("expected an overlap");
        };
        assert_eq!(overlap.offset_before(), offset(2));
        assert_eq!(
            rules.valid_offsets(&dt(2008, 10, 26, 2, 30)),
            Ok(vec![offset(2), offset(1)])
        );
        assert_eq!(
            rules.classify(&dt(2008, 10, 26, 3, 0)),
            Ok(LocalResolution::Normal(offset(1)))
        );
        assert_eq!(rules.is_valid_offset(&dt(2008, 10, 26, 2, 0), offset(1)), Ok(true));
    }

    #[test]
    fn classification_from_table() {
        let rules = central_europe();
        assert!(matches!(
            rules.offset_info(&dt(1976, 3, 28, 2, 30)),
            Ok(OffsetInfo::Transition(t)) if t.is_gap()
        ));
        assert_eq!(
            rules.offset_info(&dt(1976, 3, 28, 3, 0)),
            Ok(OffsetInfo::Normal(offset(2)))
        );
        assert!(matches!(
            rules.offset_info(&dt(1976, 10, 31, 2, 30)),
            Ok(OffsetInfo::Transition(t)) if t.is_overlap()
        ));
        assert_eq!(
            rules.offset_info(&dt(1976, 10, 31, 3, 0)),
            Ok(OffsetInfo::Normal(offset(1)))
        );
        assert_eq!(
            rules.offset_info(&dt(1950, 1, 1, 0, 0)),
            Ok(OffsetInfo::Normal(offset(1)))
        );
    }

    #[test]
    fn offsets_for_instants() {
        let rules = central_europe();
        let gap = dt(2008, 3, 30, 1, 0).to_epoch_second(ZoneOffset::UTC);
        let before = Instant::of_epoch_second(gap - 1).unwrap();
        let at = Instant::of_epoch_second(gap).unwrap();
        assert_eq!(rules.offset(&before), Ok(offset(1)));
        assert_eq!(rules.offset(&at), Ok(offset(2)));
        assert_eq!(rules.standard_offset(&at), offset(1));
        assert_eq!(rules.is_daylight_savings(&at), Ok(true));
        assert_eq!(rules.daylight_savings(&at), Ok(Duration::of_seconds(3_600)));
        assert_eq!(rules.offset(&Instant::EPOCH), Ok(offset(1)));
        assert_eq!(rules.offset(&Instant::MAX).map(|o| o.total_seconds() > 0), Ok(true));
    }

    #[test]
    fn next_and_previous_transitions() {
        let rules = central_europe();
        let epoch_next = rules.next_transition(&Instant::EPOCH).unwrap().unwrap();
        assert_eq!(epoch_next.date_time_before(), dt(1976, 3, 28, 2, 0));
        assert_eq!(rules.previous_transition(&Instant::EPOCH), Ok(None));

        let mid_2008 = dt(2008, 7, 1, 0, 0).to_epoch_second(ZoneOffset::UTC);
        let instant = Instant::of_epoch_second(mid_2008).unwrap();
        let next = rules.next_transition(&instant).unwrap().unwrap();
        assert_eq!(next.date_time_before(), dt(2008, 10, 26, 3, 0));
        let previous = rules.previous_transition(&instant).unwrap().unwrap();
        assert_eq!(previous.date_time_before(), dt(2008, 3, 30, 2, 0));

        let after = rules.next_transition(&next.instant().unwrap()).unwrap().unwrap();
        assert_eq!(after.date_time_before(), dt(2009, 3, 29, 2, 0));
        let at = rules.previous_transition(&next.instant().unwrap()).unwrap().unwrap();
        assert_eq!(at, previous);

        let end_of_table = rules.transitions().unwrap()[1];
        let early_1977 = dt(1977, 1, 1, 0, 0).to_epoch_second(ZoneOffset::UTC);
        let previous = rules
            .previous_transition(&Instant::of_epoch_second(early_1977).unwrap())
            .unwrap();
        assert_eq!(previous, Some(end_of_table));
    }

    #[test]
    fn invalid_construction() {
        assert!(ZoneOffsetTransition::of(dt(2008, 1, 1, 0, 0), offset(1), offset(1)).is_err());
        assert!(ZoneOffsetTransitionRule::of(
            Month::March,
            0,
            None,
            LocalTime::MIDNIGHT,
            0,
            TimeDefinition::Wall,
            offset(1),
            offset(1),
            offset(2),
        )
        .is_err());
        let later = ZoneOffsetTransition::of(dt(2008, 1, 1, 0, 0), offset(1), offset(2)).unwrap();
        let earlier = ZoneOffsetTransition::of(dt(2007, 1, 1, 0, 0), offset(2), offset(1)).unwrap();
        assert!(
            ZoneRules::new(offset(1), offset(1), Vec::new(), vec![later, earlier], Vec::new())
                .is_err()
        );
    }
}
