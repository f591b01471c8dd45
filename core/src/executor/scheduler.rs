use std::future::Future;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

/// Run every job with at most `limit` in flight, returning one output per job.
///
/// A job's thunk is only invoked once it holds a permit, and the permit is
/// released when the job's future settles. Admission follows submission order;
/// the returned vector is in completion order. Everything is polled on the
/// calling task, so jobs need not be `Send` or `'static`.
///
/// A `limit` of `0` is treated as `1`.
pub async fn run_bounded<F, Fut, R>(jobs: Vec<F>, limit: usize) -> Vec<R>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = R>,
{
    if jobs.is_empty() {
        return Vec::new();
    }

    let limit = if limit == 0 {
        tracing::warn!("concurrency limit of 0 requested, using 1");
        1
    } else {
        limit
    };

    let total = jobs.len();
    let sem = Arc::new(Semaphore::new(limit));
    let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

    for job in jobs {
        let sem = sem.clone();
        futs.push(async move {
            // The semaphore is never closed, so acquisition cannot fail; the
            // permit (or error) is held until the job settles either way.
            let _permit = sem.acquire_owned().await;
            job().await
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(res) = futs.next().await {
        results.push(res);
    }

    tracing::debug!(total, limit, "bounded run drained");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    #[tokio::test]
    async fn empty_input_returns_empty() {
        let jobs: Vec<fn() -> std::future::Ready<u32>> = Vec::new();
        assert!(run_bounded(jobs, 5).await.is_empty());
    }

    #[tokio::test]
    async fn one_output_per_job_even_on_failure() {
        let jobs: Vec<_> = (0..10)
            .map(|i| move || async move { if i % 3 == 0 { Err(i) } else { Ok(i) } })
            .collect();

        let mut results = run_bounded(jobs, 3).await;
        assert_eq!(results.len(), 10);
        results.sort_by_key(|r| match r {
            Ok(i) | Err(i) => *i,
        });
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 4);
    }

    #[tokio::test]
    async fn never_exceeds_limit() {
        let active = Rc::new(Cell::new(0usize));
        let peak = Rc::new(Cell::new(0usize));

        let jobs: Vec<_> = (0..12u64)
            .map(|i| {
                let active = active.clone();
                let peak = peak.clone();
                move || async move {
                    active.set(active.get() + 1);
                    peak.set(peak.get().max(active.get()));
                    tokio::time::sleep(Duration::from_millis(2 + i % 4)).await;
                    active.set(active.get() - 1);
                    i
                }
            })
            .collect();

        let results = run_bounded(jobs, 3).await;
        assert_eq!(results.len(), 12);
        assert_eq!(peak.get(), 3);
        assert_eq!(active.get(), 0);
    }

    #[tokio::test]
    async fn admission_is_fifo() {
        let started = Rc::new(RefCell::new(Vec::new()));

        let jobs: Vec<_> = (0..6usize)
            .map(|i| {
                let started = started.clone();
                move || {
                    started.borrow_mut().push(i);
                    async move {
                        tokio::time::sleep(Duration::from_millis(1)).await;
                    }
                }
            })
            .collect();

        run_bounded(jobs, 2).await;
        assert_eq!(*started.borrow(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn zero_limit_runs_serially() {
        let active = Rc::new(Cell::new(0usize));
        let peak = Rc::new(Cell::new(0usize));

        let jobs: Vec<_> = (0..4)
            .map(|_| {
                let active = active.clone();
                let peak = peak.clone();
                move || async move {
                    active.set(active.get() + 1);
                    peak.set(peak.get().max(active.get()));
                    tokio::task::yield_now().await;
                    active.set(active.get() - 1);
                }
            })
            .collect();

        assert_eq!(run_bounded(jobs, 0).await.len(), 4);
        assert_eq!(peak.get(), 1);
    }
}
