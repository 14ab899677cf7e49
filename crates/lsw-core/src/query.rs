//! Query-service contract and bounded result polling.
//!
//! The remote service runs queries as jobs: submit returns a job handle, and
//! results are fetched page by page until the service stops reporting the job
//! as partial. The trait keeps the transport out of the core so tests can
//! drive the run loop with an in-memory service.

use tracing::{debug, warn};

use lsw_common::{Error, Result};
use lsw_export::Record;

use crate::window::Window;

/// Default number of polls allowed per job before giving up.
pub const DEFAULT_MAX_POLLS: usize = 50;

/// Parameters for one analytical query job, covering one window.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub repo: String,
    pub query: String,
    pub window: Window,
    pub size: u32,
    pub fields: String,
}

/// Opaque handle to a submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(pub String);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of results. `partial` means more pages remain.
#[derive(Debug, Clone, Default)]
pub struct PollPage {
    pub hits: Vec<Record>,
    pub partial: bool,
}

/// The external query collaborator. Retry, auth, and transport semantics
/// live behind this seam.
pub trait QueryService {
    fn submit(&self, request: &QueryRequest) -> Result<JobId>;
    fn poll(&self, job: &JobId) -> Result<PollPage>;
}

/// Accumulate all pages of a job, polling at most `max_polls` times.
///
/// A poll error abandons the job and returns whatever hits were already
/// accumulated, possibly none; the service offers no way to resume a broken
/// job mid-page. Exhausting the budget while the job is still partial is a
/// distinct error so callers can tell a stuck service from a failed one.
pub fn drain_job(service: &dyn QueryService, job: &JobId, max_polls: usize) -> Result<Vec<Record>> {
    let mut hits = Vec::new();

    for poll in 0..max_polls {
        let page = match service.poll(job) {
            Ok(page) => page,
            Err(err) => {
                warn!(%job, %err, accumulated = hits.len(), "poll failed, keeping partial hits");
                return Ok(hits);
            }
        };

        debug!(%job, poll, page_hits = page.hits.len(), partial = page.partial, "polled job");
        hits.extend(page.hits);
        if !page.partial {
            return Ok(hits);
        }
    }

    Err(Error::PollBudgetExceeded {
        job_id: job.0.clone(),
        polls: max_polls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted service: each poll pops the next page or error.
    struct Scripted {
        pages: RefCell<Vec<Result<PollPage>>>,
    }

    impl Scripted {
        fn new(pages: Vec<Result<PollPage>>) -> Self {
            Self {
                pages: RefCell::new(pages),
            }
        }
    }

    impl QueryService for Scripted {
        fn submit(&self, _request: &QueryRequest) -> Result<JobId> {
            Ok(JobId("job-1".into()))
        }

        fn poll(&self, _job: &JobId) -> Result<PollPage> {
            self.pages.borrow_mut().remove(0)
        }
    }

    fn page(count: usize, partial: bool) -> Result<PollPage> {
        let hits = (0..count)
            .map(|i| {
                serde_json::from_value(serde_json::json!({ "n": i }))
                    .expect("object literal is a map")
            })
            .collect();
        Ok(PollPage { hits, partial })
    }

    #[test]
    fn drains_until_not_partial() {
        let service = Scripted::new(vec![page(2, true), page(3, true), page(1, false)]);
        let hits = drain_job(&service, &JobId("job-1".into()), 10).unwrap();
        assert_eq!(hits.len(), 6);
    }

    #[test]
    fn poll_error_returns_accumulated_hits() {
        let service = Scripted::new(vec![
            page(2, true),
            Err(Error::Poll {
                job_id: "job-1".into(),
                reason: "connection reset".into(),
            }),
        ]);
        let hits = drain_job(&service, &JobId("job-1".into()), 10).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn immediate_error_returns_empty() {
        let service = Scripted::new(vec![Err(Error::Poll {
            job_id: "job-1".into(),
            reason: "boom".into(),
        })]);
        let hits = drain_job(&service, &JobId("job-1".into()), 10).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn budget_exhaustion_is_distinct_error() {
        let service = Scripted::new(vec![page(1, true), page(1, true), page(1, true)]);
        let err = drain_job(&service, &JobId("job-1".into()), 3).unwrap_err();
        assert!(matches!(
            err,
            Error::PollBudgetExceeded { polls: 3, .. }
        ));
    }

    #[test]
    fn zero_budget_never_polls() {
        let service = Scripted::new(vec![]);
        let err = drain_job(&service, &JobId("job-1".into()), 0).unwrap_err();
        assert!(matches!(err, Error::PollBudgetExceeded { polls: 0, .. }));
    }
}
