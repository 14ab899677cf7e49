//! HTTP implementation of the query-service contract.
//!
//! Talks to the hosted log-search service over a small JSON API:
//! `POST {endpoint}/v1/repos/{repo}/jobs` submits a job, and
//! `GET {endpoint}/v1/jobs/{id}` fetches one page of results. Credentials
//! from the config are forwarded opaquely as headers. No retries, no
//! backoff: a failed call fails its window.

use serde::{Deserialize, Serialize};

use lsw_common::{Error, Result};
use lsw_config::SearchConfig;
use lsw_export::Record;

use crate::query::{JobId, PollPage, QueryRequest, QueryService};

/// ureq-backed query service client.
pub struct HttpQueryService {
    agent: ureq::Agent,
    endpoint: String,
    access_key: String,
    secret_key: String,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    query: &'a str,
    start: i64,
    end: i64,
    size: u32,
    fields: &'a str,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Deserialize)]
struct PollResponse {
    #[serde(default)]
    partial_success: bool,
    #[serde(default)]
    hits: Vec<Record>,
}

impl HttpQueryService {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_key: config.ak.clone(),
            secret_key: config.sk.clone(),
        }
    }

    fn authed(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("X-Access-Key", &self.access_key)
            .set("X-Secret-Key", &self.secret_key)
    }
}

impl QueryService for HttpQueryService {
    fn submit(&self, request: &QueryRequest) -> Result<JobId> {
        let url = format!("{}/v1/repos/{}/jobs", self.endpoint, request.repo);
        let body = SubmitBody {
            query: &request.query,
            start: request.window.start,
            end: request.window.end,
            size: request.size,
            fields: &request.fields,
        };

        let response = self
            .authed(self.agent.post(&url))
            .send_json(&body)
            .map_err(|e| Error::Submit {
                start: request.window.start,
                end: request.window.end,
                reason: e.to_string(),
            })?;

        let submitted: SubmitResponse = response
            .into_json()
            .map_err(|e| Error::MalformedResponse(format!("submit response: {e}")))?;
        Ok(JobId(submitted.id))
    }

    fn poll(&self, job: &JobId) -> Result<PollPage> {
        let url = format!("{}/v1/jobs/{}", self.endpoint, job.0);

        let response = self
            .authed(self.agent.get(&url))
            .call()
            .map_err(|e| Error::Poll {
                job_id: job.0.clone(),
                reason: e.to_string(),
            })?;

        let page: PollResponse = response
            .into_json()
            .map_err(|e| Error::MalformedResponse(format!("poll response: {e}")))?;
        Ok(PollPage {
            hits: page.hits,
            partial: page.partial_success,
        })
    }
}
