//! A `ZoneRulesProvider` backed by the IANA time zone database.
//!
//! Zone data is read in the TZif format ([RFC 8536][rfc8536]) with the
//! [`tzif`][tzif-crate] crate and compiled into [`ZoneRules`]:
//!
//! - Each data-block transition that changes the UTC offset becomes a
//!   transition of the wall offset.
//! - The standard offset in force at each transition is derived from the most
//!   recent local time type that is not daylight saving time. A change of it
//!   becomes a standard offset transition.
//! - The POSIX TZ string footer becomes the recurring rules used after the
//!   last transition of the data block.
//!
//! By default the copy of the database bundled by `jiff-tzdb` is used. A
//! provider created with [`TzdbProvider::from_directory`] reads TZif files
//! from a zoneinfo directory such as `/usr/share/zoneinfo` instead.
//!
//! Compiled rules are cached. The cache is swapped as a whole on every
//! insertion, so readers never observe a partially updated table.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-crate]: https://docs.rs/tzif/latest/tzif/

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use alloc::{
    format,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};

use combine::Parser;
use rustc_hash::FxHashMap;
use tzif::data::{
    posix::{PosixTzString, TransitionDay},
    tzif::{DataBlock, LocalTimeTypeRecord, TzifData},
};

use crate::{
    builtins::core::rules::{TimeDefinition, ZoneOffsetTransition, ZoneOffsetTransitionRule},
    iso::{DayOfWeek, Month},
    provider::{unknown_zone, ZoneRulesProvider},
    utils, Instant, LocalTime, TemporalError, TemporalResult, ZoneOffset, ZoneRules,
    SECONDS_PER_DAY,
};

type RulesCache = FxHashMap<String, Arc<ZoneRules>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TzdbSource {
    Bundled,
    Directory(PathBuf),
}

/// A provider of IANA time zone rules.
///
/// ```rust
/// use tempora_rs::{tzdb::TzdbProvider, LocalDateTime, ZoneId, ZonedDateTime};
///
/// let provider = TzdbProvider::default();
/// let zone = ZoneId::of_with_provider("Europe/London", &provider).unwrap();
/// let local = LocalDateTime::try_new(2024, 7, 1, 12, 0, 0, 0).unwrap();
/// let zoned = ZonedDateTime::of(local, zone).unwrap();
/// assert_eq!(zoned.to_string(), "2024-07-01T12:00+01:00[Europe/London]");
/// ```
#[derive(Debug)]
pub struct TzdbProvider {
    source: TzdbSource,
    cache: RwLock<Arc<RulesCache>>,
}

impl Default for TzdbProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TzdbProvider {
    /// Creates a provider for the bundled database.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(TzdbSource::Bundled)
    }

    /// Creates a provider reading TZif files below `path`.
    ///
    /// A zone id is a path relative to `path`, so `Europe/Paris` is read from
    /// `path/Europe/Paris`.
    #[must_use]
    pub fn from_directory<P: AsRef<Path>>(path: P) -> Self {
        Self::with_source(TzdbSource::Directory(path.as_ref().to_path_buf()))
    }

    fn with_source(source: TzdbSource) -> Self {
        Self {
            source,
            cache: RwLock::new(Arc::default()),
        }
    }

    /// Drops every cached zone.
    pub fn clear_cache(&self) -> TemporalResult<()> {
        *self.cache.write().map_err(|_| poisoned())? = Arc::default();
        Ok(())
    }

    /// Returns the ids of the zones compiled so far.
    pub fn cached_zone_ids(&self) -> TemporalResult<Vec<String>> {
        let mut ids: Vec<String> = self.snapshot()?.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn snapshot(&self) -> TemporalResult<Arc<RulesCache>> {
        self.cache
            .read()
            .map(|cache| Arc::clone(&cache))
            .map_err(|_| poisoned())
    }

    fn insert(&self, id: &str, rules: Arc<ZoneRules>) -> TemporalResult<()> {
        let mut cache = self.cache.write().map_err(|_| poisoned())?;
        let mut next = RulesCache::clone(&cache);
        next.insert(id.to_string(), rules);
        *cache = Arc::new(next);
        Ok(())
    }

    fn load(&self, id: &str) -> TemporalResult<ZoneRules> {
        let data = match &self.source {
            TzdbSource::Bundled => {
                let (_, bytes) = jiff_tzdb::get(id).ok_or_else(|| unknown_zone(id))?;
                parse_tzif(bytes)?
            }
            TzdbSource::Directory(root) => {
                if id.split('/').any(|part| part == ".." || part.is_empty()) {
                    return Err(unknown_zone(id));
                }
                let path = root.join(id);
                if !path.is_file() {
                    return Err(unknown_zone(id));
                }
                tzif::parse_tzif_file(&path).map_err(|e| {
                    TemporalError::zone().with_message(format!("Invalid TZif file for {id}: {e}"))
                })?
            }
        };
        #[cfg(feature = "log")]
        log::debug!("compiling zone rules for {id}");
        compile(&data)
    }
}

impl ZoneRulesProvider for TzdbProvider {
    fn rules_for(&self, id: &str) -> TemporalResult<Arc<ZoneRules>> {
        if let Some(rules) = self.snapshot()?.get(id) {
            return Ok(Arc::clone(rules));
        }
        let rules = Arc::new(self.load(id)?);
        self.insert(id, Arc::clone(&rules))?;
        Ok(rules)
    }

    fn available_zone_ids(&self) -> Vec<String> {
        let mut ids = match &self.source {
            TzdbSource::Bundled => jiff_tzdb::available().map(ToString::to_string).collect(),
            TzdbSource::Directory(root) => {
                let mut ids = Vec::new();
                collect_zone_files(root, root, &mut ids);
                ids
            }
        };
        ids.sort_unstable();
        ids
    }
}

#[inline]
fn poisoned() -> TemporalError {
    TemporalError::general("The zone rules cache was poisoned")
}

/// Collects the relative paths of every TZif file below `dir`.
fn collect_zone_files(root: &Path, dir: &Path, ids: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_zone_files(root, &path, ids);
            continue;
        }
        let is_tzif = fs::read(&path).is_ok_and(|bytes| bytes.starts_with(b"TZif"));
        if !is_tzif {
            continue;
        }
        if let Some(id) = path.strip_prefix(root).ok().and_then(Path::to_str) {
            ids.push(id.replace(std::path::MAIN_SEPARATOR, "/"));
        }
    }
}

// ==== TZif compilation ====

fn parse_tzif(bytes: &[u8]) -> TemporalResult<TzifData> {
    let Ok((data, _)) = tzif::parse::tzif::tzif().parse(bytes) else {
        return Err(TemporalError::zone().with_message("Illformed TZif data."));
    };
    Ok(data)
}

/// Compiles raw TZif bytes into zone rules.
pub fn compile_tzif(bytes: &[u8]) -> TemporalResult<ZoneRules> {
    compile(&parse_tzif(bytes)?)
}

fn offset_of(seconds: i64) -> TemporalResult<ZoneOffset> {
    ZoneOffset::of_total_seconds(utils::to_i32(seconds)?)
}

fn compile(data: &TzifData) -> TemporalResult<ZoneRules> {
    let block = data.data_block2.as_ref().unwrap_or(&data.data_block1);
    crate::temporal_assert!(
        block.transition_times.len() == block.transition_types.len(),
        "TZif block has {} transition times but {} transition types",
        block.transition_times.len(),
        block.transition_types.len()
    );
    let records = &block.local_time_type_records;
    let first = records
        .first()
        .ok_or_else(|| TemporalError::zone().with_message("TZif data has no local time types"))?;

    let mut wall = offset_of(first.utoff.0)?;
    let mut standard = initial_standard_offset(records)?;
    let mut base_wall = wall;
    let mut base_standard = standard;
    let mut transitions = Vec::new();
    let mut standard_transitions = Vec::new();

    let min = Instant::MIN.epoch_second();
    let max = Instant::MAX.epoch_second();
    for (time, &index) in block.transition_times.iter().zip(&block.transition_types) {
        let record = local_record(block, index)?;
        let wall_after = offset_of(record.utoff.0)?;
        let standard_after = if record.is_dst { standard } else { wall_after };

        if time.0 < min {
            // Transitions before the supported range only change the base.
            base_wall = wall_after;
            base_standard = standard_after;
            wall = wall_after;
            standard = standard_after;
            continue;
        }
        if time.0 > max {
            #[cfg(feature = "log")]
            log::warn!("skipping TZif transition at {} outside the supported range", time.0);
            break;
        }
        if standard_after != standard {
            standard_transitions.push(ZoneOffsetTransition::from_epoch_second(
                time.0,
                standard,
                standard_after,
            )?);
            standard = standard_after;
        }
        if wall_after != wall {
            transitions.push(ZoneOffsetTransition::from_epoch_second(time.0, wall, wall_after)?);
            wall = wall_after;
        }
    }

    let last_rules = match &data.footer {
        Some(footer) => footer_rules(footer)?,
        None => Vec::new(),
    };

    ZoneRules::new(
        base_standard,
        base_wall,
        standard_transitions,
        transitions,
        last_rules,
    )
}

fn local_record(block: &DataBlock, index: usize) -> TemporalResult<&LocalTimeTypeRecord> {
    block
        .local_time_type_records
        .get(index)
        .ok_or_else(|| TemporalError::zone().with_message("TZif transition type out of range"))
}

/// The standard offset before the first transition: the first local time
/// type that is not daylight saving time.
fn initial_standard_offset(records: &[LocalTimeTypeRecord]) -> TemporalResult<ZoneOffset> {
    let record = records
        .iter()
        .find(|record| !record.is_dst)
        .or_else(|| records.first())
        .ok_or_else(|| TemporalError::zone().with_message("TZif data has no local time types"))?;
    offset_of(record.utoff.0)
}

/// Converts the POSIX TZ string footer into a start rule and an end rule,
/// ordered by month.
fn footer_rules(footer: &PosixTzString) -> TemporalResult<Vec<ZoneOffsetTransitionRule>> {
    // POSIX offsets count the seconds to add to local time to reach UTC.
    let standard = offset_of(-footer.std_info.offset.0)?;
    let Some(dst) = &footer.dst_info else {
        return Ok(Vec::new());
    };
    let daylight = offset_of(-dst.variant_info.offset.0)?;
    if daylight == standard {
        return Ok(Vec::new());
    }
    let start = posix_rule(
        &dst.start_date.day,
        dst.start_date.time.0,
        standard,
        standard,
        daylight,
    )?;
    let end = posix_rule(
        &dst.end_date.day,
        dst.end_date.time.0,
        standard,
        daylight,
        standard,
    )?;
    let mut rules = alloc::vec![start, end];
    rules.sort_by_key(|rule| (rule.month(), rule.day_of_month_indicator()));
    Ok(rules)
}

/// POSIX times are wall-clock times of the offset before the transition and
/// may lie outside `00:00..24:00`, which becomes a day adjustment.
fn posix_rule(
    day: &TransitionDay,
    time: i64,
    standard: ZoneOffset,
    before: ZoneOffset,
    after: ZoneOffset,
) -> TemporalResult<ZoneOffsetTransitionRule> {
    let day_adjustment = i8::try_from(utils::floor_div(time, SECONDS_PER_DAY))
        .map_err(|_| TemporalError::zone().with_message("POSIX transition time out of range"))?;
    let local_time = LocalTime::of_second_of_day(utils::floor_mod(time, SECONDS_PER_DAY))?;

    let (month, day_of_month, day_of_week) = match *day {
        TransitionDay::Mwd(month, week, weekday) => {
            let month = Month::of(i64::from(month))?;
            // POSIX numbers weekdays from Sunday as zero.
            let day_of_week = DayOfWeek::of(if weekday == 0 { 7 } else { i64::from(weekday) })?;
            let day_of_month = if week >= 5 {
                -1
            } else {
                1 + (week.max(1) as i8 - 1) * 7
            };
            (month, day_of_month, Some(day_of_week))
        }
        TransitionDay::NoLeap(day_of_year) => {
            let (month, day) = common_year_date(day_of_year)?;
            (month, day, None)
        }
        TransitionDay::WithLeap(zero_based) => {
            #[cfg(feature = "log")]
            log::warn!(
                "approximating zero-based POSIX day {zero_based} with its date in a common year"
            );
            let (month, day) = common_year_date(zero_based.saturating_add(1).min(365))?;
            (month, day, None)
        }
    };

    ZoneOffsetTransitionRule::of(
        month,
        day_of_month,
        day_of_week,
        local_time,
        day_adjustment,
        TimeDefinition::Wall,
        standard,
        before,
        after,
    )
}

/// The month and day of a one-based day of a year without February 29.
fn common_year_date(day_of_year: u16) -> TemporalResult<(Month, i8)> {
    if !(1..=365).contains(&day_of_year) {
        return Err(TemporalError::zone().with_message("POSIX Julian day out of range"));
    }
    let mut remaining = day_of_year;
    let mut month = Month::January;
    loop {
        let length = u16::from(month.length(false));
        if remaining <= length {
            return Ok((month, remaining as i8));
        }
        remaining -= length;
        month = month.plus(1);
    }
}
