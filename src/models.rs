use crate::errors::ChecklistError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed participants.
///
/// The wire keys are `male` and `female`; anything else is rejected at the
/// boundary by [`Person::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Person {
    A,
    B,
}

impl Person {
    pub const ALL: [Person; 2] = [Person::A, Person::B];

    pub const fn key(self) -> &'static str {
        match self {
            Person::A => "male",
            Person::B => "female",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Person::A => "Mann",
            Person::B => "Frau",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ChecklistError> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|person| person.key() == trimmed)
            .ok_or_else(|| ChecklistError::UnknownPerson(trimmed.to_string()))
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The fixed, ordered exercise set shared by both persons on every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Exercise {
    Squats,
    Situps,
    Pushups,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [Exercise::Squats, Exercise::Situps, Exercise::Pushups];

    pub const fn key(self) -> &'static str {
        match self {
            Exercise::Squats => "squats",
            Exercise::Situps => "situps",
            Exercise::Pushups => "pushups",
        }
    }

    // situps keeps its storage key but is shown as crunches
    pub const fn label(self) -> &'static str {
        match self {
            Exercise::Squats => "Squats",
            Exercise::Situps => "Crunches",
            Exercise::Pushups => "Push Ups",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ChecklistError> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|exercise| exercise.key() == trimmed)
            .ok_or_else(|| ChecklistError::UnknownExercise(trimmed.to_string()))
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A 1-based day number. Zero is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Day(u32);

impl Day {
    pub const FIRST: Day = Day(1);

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Result<Day, ChecklistError> {
        self.0
            .checked_add(1)
            .map(Day)
            .ok_or(ChecklistError::DayOverflow(self.0))
    }
}

impl TryFrom<u32> for Day {
    type Error = ChecklistError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ChecklistError::InvalidDay(value));
        }
        Ok(Day(value))
    }
}

impl From<Day> for u32 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion flags of one person, one per exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExerciseFlags {
    squats: bool,
    situps: bool,
    pushups: bool,
}

impl ExerciseFlags {
    pub const fn get(&self, exercise: Exercise) -> bool {
        match exercise {
            Exercise::Squats => self.squats,
            Exercise::Situps => self.situps,
            Exercise::Pushups => self.pushups,
        }
    }

    fn flag_mut(&mut self, exercise: Exercise) -> &mut bool {
        match exercise {
            Exercise::Squats => &mut self.squats,
            Exercise::Situps => &mut self.situps,
            Exercise::Pushups => &mut self.pushups,
        }
    }
}

/// The current day and its full checklist.
///
/// Every (person, exercise) pair has exactly one flag. This is also the
/// persisted layout, so decoding rejects missing or extra keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayState {
    day: Day,
    male: ExerciseFlags,
    female: ExerciseFlags,
}

impl Default for DayState {
    fn default() -> Self {
        Self::fresh(Day::FIRST)
    }
}

impl DayState {
    /// A day with nothing checked off.
    pub fn fresh(day: Day) -> Self {
        Self {
            day,
            male: ExerciseFlags::default(),
            female: ExerciseFlags::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_flags(day: Day, done: impl Fn(Person, Exercise) -> bool) -> Self {
        let mut state = Self::fresh(day);
        for person in Person::ALL {
            for exercise in Exercise::ALL {
                *state.flags_mut(person).flag_mut(exercise) = done(person, exercise);
            }
        }
        state
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    pub const fn flags(&self, person: Person) -> &ExerciseFlags {
        match person {
            Person::A => &self.male,
            Person::B => &self.female,
        }
    }

    pub const fn is_done(&self, person: Person, exercise: Exercise) -> bool {
        self.flags(person).get(exercise)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Person, Exercise, bool)> + '_ {
        Person::ALL.into_iter().flat_map(move |person| {
            Exercise::ALL
                .into_iter()
                .map(move |exercise| (person, exercise, self.is_done(person, exercise)))
        })
    }

    /// Flips one flag and returns its new value.
    pub(crate) fn flip(&mut self, person: Person, exercise: Exercise) -> bool {
        let flag = self.flags_mut(person).flag_mut(exercise);
        *flag = !*flag;
        *flag
    }

    fn flags_mut(&mut self, person: Person) -> &mut ExerciseFlags {
        match person {
            Person::A => &mut self.male,
            Person::B => &mut self.female,
        }
    }
}

/// Who has finished their exercises for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Nobody,
    #[serde(rename = "male_only")]
    OnlyA,
    #[serde(rename = "female_only")]
    OnlyB,
    Both,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub person: String,
    pub exercise: String,
}

/// The state as served to clients: the persisted fields plus values derived
/// from them on every request.
#[derive(Debug, Serialize)]
pub struct StateView {
    #[serde(flatten)]
    pub state: DayState,
    pub date: String,
    pub can_advance: bool,
    pub status: ProgressStatus,
}

#[derive(Debug, Serialize)]
pub struct ExerciseInfo {
    pub key: &'static str,
    pub label: &'static str,
}

impl From<Exercise> for ExerciseInfo {
    fn from(exercise: Exercise) -> Self {
        Self {
            key: exercise.key(),
            label: exercise.label(),
        }
    }
}
