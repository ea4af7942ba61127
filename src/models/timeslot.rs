//! Timeslot model.
//!
//! A timeslot is an opaque, totally ordered period. It always carries a
//! chronological rank (`order`, lower = earlier) and may additionally carry a
//! concrete start instant, a duration and a display label.
//!
//! # Ordering contract
//!
//! `Ord` follows the inverted sign convention of the scheduling engine:
//! `a.cmp(&b)` is [`Ordering::Less`] when `a` is chronologically **later**
//! than `b`. Consequently "descending" sorts (`b.cmp(a)`) list the earliest
//! timeslot first. Ties on rank are broken by the start instant with the
//! same convention (later start = `Less`); a timeslot with a start instant
//! precedes one without.
//!
//! Identity is the rank plus the start instant (which also decides whether
//! the timeslot is definite). Duration and label are descriptive only, so
//! two events may describe the same period differently and still share it.
//!
//! Use [`Timeslot::is_before`] / [`Timeslot::is_after`] when the intent is
//! plain chronology.

use chrono::{NaiveDateTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// A schedulable period of time.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    /// Chronological rank; lower is earlier.
    pub order: u32,
    /// Concrete start instant, when known.
    pub start: Option<NaiveDateTime>,
    /// Length of the period, when known.
    pub duration: Option<Duration>,
    /// Display label (e.g. a weekday name).
    pub label: Option<String>,
}

impl Timeslot {
    /// Creates a timeslot that only knows its chronological rank.
    pub fn undefined(order: u32) -> Self {
        Self {
            order,
            start: None,
            duration: None,
            label: None,
        }
    }

    /// Creates a timeslot with a concrete start instant and duration.
    pub fn definite(order: u32, start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            order,
            start: Some(start),
            duration: Some(duration),
            label: None,
        }
    }

    /// Creates a timeslot labelled with a day of the week.
    pub fn day_of_week(order: u32, weekday: Weekday) -> Self {
        Self::undefined(order).with_label(weekday_name(weekday))
    }

    /// Creates `count` consecutive day-of-week timeslots starting on Monday.
    ///
    /// Ranks are `0..count`; labels wrap around after Sunday.
    pub fn week(count: usize) -> Vec<Self> {
        let mut day = Weekday::Mon;
        let mut slots = Vec::with_capacity(count);
        for order in 0..count {
            slots.push(Self::day_of_week(order as u32, day));
            day = day.succ();
        }
        slots
    }

    /// Creates `count` consecutive definite timeslots of equal length.
    ///
    /// The sequence stops early when the next start instant is not
    /// representable, so it may hold fewer than `count` timeslots.
    pub fn sequence(first_start: NaiveDateTime, length: Duration, count: usize) -> Vec<Self> {
        let step = TimeDelta::from_std(length).ok();
        let mut next = Some(first_start);
        let mut slots = Vec::with_capacity(count);
        for order in 0..count {
            let Some(start) = next else { break };
            slots.push(Self::definite(order as u32, start, length));
            next = step.and_then(|step| start.checked_add_signed(step));
        }
        slots
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the timeslot has a concrete start instant.
    #[inline]
    pub fn is_definite(&self) -> bool {
        self.start.is_some()
    }

    /// End instant (start + duration), if both are known.
    pub fn end(&self) -> Option<NaiveDateTime> {
        let start = self.start?;
        let duration = TimeDelta::from_std(self.duration?).ok()?;
        start.checked_add_signed(duration)
    }

    /// Whether `self` is chronologically earlier than `other`.
    #[inline]
    pub fn is_before(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Whether `self` is chronologically later than `other`.
    #[inline]
    pub fn is_after(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// Whether `self` lies chronologically between `a` and `b`, both inclusive.
    ///
    /// The bounds may be given in either order.
    pub fn within(&self, a: &Self, b: &Self) -> bool {
        let (first, last) = if a.is_after(b) { (b, a) } else { (a, b) };
        !self.is_before(first) && !self.is_after(last)
    }
}

impl Ord for Timeslot {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .order
            .cmp(&self.order)
            .then_with(|| match (&self.start, &other.start) {
                (Some(a), Some(b)) => b.cmp(a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialEq for Timeslot {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.start == other.start
    }
}

impl Hash for Timeslot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order.hash(state);
        self.start.hash(state);
    }
}

impl PartialOrd for Timeslot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.label, &self.start) {
            (Some(label), _) => f.write_str(label),
            (None, Some(start)) => write!(f, "{}", start.format("%Y-%m-%d %H:%M")),
            (None, None) => write!(f, "#{}", self.order),
        }
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
