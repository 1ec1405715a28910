// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallstr::SmallString;
use smallvec::SmallVec;
use std::sync::{Arc, MutexGuard, PoisonError};

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Flag shared between the foreground loop and a background task.
pub type SafeBool = Arc<StdMutex<bool>>;

pub const INLINE_VEC_SIZE: usize = 8;
pub type InlineVec<T> = SmallVec<[T; INLINE_VEC_SIZE]>;

/// Query buffers and short labels rarely go past this many bytes.
pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;

/// Lock a [`StdMutex`], recovering the guard if another thread panicked while holding
/// it. Every value guarded in this crate stays consistent across a panic (flags, byte
/// buffers, writers), so the poison flag carries no information here.
pub fn lock_ignore_poison<T: ?Sized>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_ignore_poison_recovers_value() {
        let flag: SafeBool = Arc::new(StdMutex::new(false));
        let flag_clone = flag.clone();
        let _unused = std::thread::spawn(move || {
            let _guard = flag_clone.lock().unwrap();
            panic!("poison the mutex");
        })
        .join();

        assert!(flag.is_poisoned());
        *lock_ignore_poison(&flag) = true;
        assert!(*lock_ignore_poison(&flag));
    }
}
