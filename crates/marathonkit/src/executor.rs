//! Execution engine - issues a batch of independent requests with bounded
//! parallelism and waits for all of them.

use crate::error::{Error, Result};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Run `operation` once per item and wait for every call to finish.
///
/// At most `jobs` calls run at the same time. A failing call does not stop
/// its siblings; once the batch has drained, the first failure to complete is
/// returned. On success, returns the number of items processed.
pub fn execute_batch<T, F>(items: &[T], jobs: usize, operation: F) -> Result<usize>
where
    T: Sync,
    F: Fn(&T) -> Result<()> + Sync,
{
    if items.is_empty() {
        return Ok(0);
    }

    let outcomes = if jobs <= 1 || items.len() == 1 {
        items.iter().map(&operation).collect()
    } else {
        execute_parallel(items, jobs, &operation)?
    };

    first_failure(outcomes).map(|()| items.len())
}

/// Execute items in parallel using rayon, collecting outcomes in completion
/// order.
fn execute_parallel<T, F>(items: &[T], jobs: usize, operation: &F) -> Result<Vec<Result<()>>>
where
    T: Sync,
    F: Fn(&T) -> Result<()> + Sync,
{
    let outcomes: Mutex<Vec<Result<()>>> = Mutex::new(Vec::with_capacity(items.len()));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.min(items.len()))
        .build()
        .map_err(|e| Error::Other(format!("Failed to create thread pool: {}", e)))?;

    pool.install(|| {
        items.par_iter().for_each(|item| {
            let outcome = operation(item);
            outcomes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(outcome);
        });
    });

    Ok(outcomes.into_inner().unwrap_or_else(PoisonError::into_inner))
}

fn first_failure(outcomes: Vec<Result<()>>) -> Result<()> {
    outcomes.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_execute_empty_batch() {
        let count = execute_batch(&[] as &[u32], 4, |_| Ok(())).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_execute_all_items() {
        let calls = AtomicUsize::new(0);
        let items: Vec<u32> = (0..20).collect();
        let count = execute_batch(&items, 4, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

        assert_eq!(count, 20);
        assert_eq!(calls.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_execute_sequential() {
        let calls = AtomicUsize::new(0);
        let count = execute_batch(&["a", "b", "c"], 1, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

        assert_eq!(count, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_failure_does_not_stop_siblings() {
        let calls = AtomicUsize::new(0);
        let items: Vec<u32> = (0..10).collect();
        let err = execute_batch(&items, 4, |item| {
            calls.fetch_add(1, Ordering::SeqCst);
            if *item == 3 {
                Err(Error::Other("item 3 failed".into()))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "item 3 failed");
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_first_completed_failure_wins() {
        let items = ["slow", "fast"];
        let err = execute_batch(&items, 2, |item| {
            if *item == "slow" {
                thread::sleep(Duration::from_millis(300));
            }
            Err(Error::Other(format!("{item} failed")))
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "fast failed");
    }

    #[test]
    fn test_sequential_failure_runs_remaining() {
        let calls = AtomicUsize::new(0);
        let err = execute_batch(&[1, 2, 3], 1, |item| {
            calls.fetch_add(1, Ordering::SeqCst);
            if *item == 1 {
                Err(Error::Other("first".into()))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "first");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
