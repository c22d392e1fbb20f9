//! Per-course/term critical sections.
//!
//! The whole read-check-act cycle for one (dept, number, topic, year,
//! term) key must be mutually exclusive: without it, two concurrent
//! first requests could both be told "you are first", or a section
//! could be double-created.

use coursebot_proto::CourseId;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed async locks, one per course/term key ever touched.
///
/// The table only ever grows; keys are few (one per course/term users
/// actually ask about) and tiny.
pub(super) struct SectionLocks {
    inner: DashMap<String, Arc<Mutex<()>>>,
}

impl SectionLocks {
    pub(super) fn new() -> Self {
        SectionLocks {
            inner: DashMap::new(),
        }
    }

    /// Acquire the critical section for this course/term key.
    ///
    /// The guard is owned so it can be held across the catalog awaits.
    pub(super) async fn acquire(&self, course: &CourseId) -> OwnedMutexGuard<()> {
        let key = lock_key(course);
        let lock = self
            .inner
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

fn lock_key(course: &CourseId) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        course.dept.to_lowercase(),
        course.number,
        course.topic.as_deref().unwrap_or("").to_lowercase(),
        course.semester.year,
        course.semester.term.ordinal(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebot_proto::{Semester, Term};

    fn course(token: &str) -> CourseId {
        CourseId::parse(token, Semester::new(Term::Fall, 2026)).unwrap()
    }

    #[tokio::test]
    async fn test_same_key_excludes() {
        use std::time::Duration;
        use tokio::time::timeout;

        let locks = SectionLocks::new();
        let guard = locks.acquire(&course("ae1000")).await;

        // Same key (different input casing): must not be acquirable.
        let contended = timeout(Duration::from_millis(50), locks.acquire(&course("AE1000"))).await;
        assert!(contended.is_err(), "same-key lock acquired while held");

        drop(guard);
        let acquired = timeout(Duration::from_millis(50), locks.acquire(&course("ae1000"))).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn test_distinct_keys_independent() {
        let locks = SectionLocks::new();
        let _guard = locks.acquire(&course("ae1000")).await;

        // Different term, different topic: independent critical sections.
        let other = locks.acquire(&course("ae1000-sp27")).await;
        drop(other);
        let other = locks.acquire(&course("ae1000-non")).await;
        drop(other);
    }
}
