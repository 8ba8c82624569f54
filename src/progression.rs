//! Gating rules for moving from one day to the next.
//!
//! Everything here is a pure function of a [`DayState`]; the store consults
//! it before mutating anything.

use crate::errors::ChecklistError;
use crate::models::{DayState, Exercise, Person, ProgressStatus};

/// True when `person` has checked off every exercise.
pub fn person_done(state: &DayState, person: Person) -> bool {
    Exercise::ALL
        .into_iter()
        .all(|exercise| state.is_done(person, exercise))
}

/// True iff every (person, exercise) flag is set.
pub fn can_advance(state: &DayState) -> bool {
    Person::ALL
        .into_iter()
        .all(|person| person_done(state, person))
}

pub fn status(state: &DayState) -> ProgressStatus {
    match (person_done(state, Person::A), person_done(state, Person::B)) {
        (true, true) => ProgressStatus::Both,
        (true, false) => ProgressStatus::OnlyA,
        (false, true) => ProgressStatus::OnlyB,
        (false, false) => ProgressStatus::Nobody,
    }
}

/// The state that follows a completed day: day + 1, nothing checked.
pub fn next_day(state: &DayState) -> Result<DayState, ChecklistError> {
    if !can_advance(state) {
        return Err(ChecklistError::IncompleteChecklist {
            day: state.day().get(),
        });
    }
    Ok(DayState::fresh(state.day().next()?))
}
