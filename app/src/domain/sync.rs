//! Lock helpers shared by the controllers.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock controller state, recovering the data if a previous holder panicked.
///
/// Controller state is only ever mutated in short, non-async critical
/// sections that leave it consistent, so a poisoned lock still holds usable
/// state.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
