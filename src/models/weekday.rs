//! Weekdays and weekday sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week, Monday first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    #[serde(rename = "Mo")]
    Monday,
    #[serde(rename = "Tu")]
    Tuesday,
    #[serde(rename = "We")]
    Wednesday,
    #[serde(rename = "Th")]
    Thursday,
    #[serde(rename = "Fr")]
    Friday,
    #[serde(rename = "Sa")]
    Saturday,
    #[serde(rename = "Su")]
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based index, Monday = 0.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weekday for a zero-based index (taken modulo 7).
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    /// The following day.
    pub fn succ(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Two-letter token (`Mo`, `Tu`, ...).
    pub fn token(self) -> &'static str {
        match self {
            Weekday::Monday => "Mo",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "We",
            Weekday::Thursday => "Th",
            Weekday::Friday => "Fr",
            Weekday::Saturday => "Sa",
            Weekday::Sunday => "Su",
        }
    }

    /// Parses a two-letter token. Case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.token() == token)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::from_index(day.num_days_from_monday() as usize)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A set of weekdays stored as a 7-bit mask.
///
/// Iteration always yields days Monday first, regardless of insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    const MASK: u8 = 0b0111_1111;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every day of the week.
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Creates a set from a list of days.
    pub fn of(days: &[Weekday]) -> Self {
        days.iter().copied().collect()
    }

    /// Days from `first` to `last` inclusive, wrapping past Sunday.
    pub fn range(first: Weekday, last: Weekday) -> Self {
        let mut set = Self::empty();
        let mut day = first;
        loop {
            set.insert(day);
            if day == last {
                return set;
            }
            day = day.succ();
        }
    }

    /// Adds a day. Returns `false` if it was already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        let had = self.contains(day);
        self.0 |= Self::bit(day);
        !had
    }

    /// Removes a day. Returns `false` if it was absent.
    pub fn remove(&mut self, day: Weekday) -> bool {
        let had = self.contains(day);
        self.0 &= !Self::bit(day);
        had
    }

    /// Whether the day is in the set.
    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Number of days in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no days.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether the set holds all seven days.
    pub fn is_full(&self) -> bool {
        self.0 == Self::MASK
    }

    pub fn union(&self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Days of the week not in this set.
    pub fn complement(&self) -> Self {
        Self(!self.0 & Self::MASK)
    }

    /// Iterates days Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|day| self.contains(*day))
    }

    #[inline]
    fn bit(day: Weekday) -> u8 {
        1 << day.index()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for WeekdaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekdaySet> for Vec<Weekday> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().collect()
    }
}
