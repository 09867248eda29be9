//! Typed access to the sandbox API.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, instrument};

use triage_core::model::{
    FileUploadResult, Sample, SampleEvents, SampleList, SampleStatus, SearchPage, SearchResultEntry,
    StaticReport, TriageOverview, TriageReport,
};
use triage_core::search::{ScanPolicy, SearchWindow, WindowedSearch};
use triage_core::types::{ApiUrl, Environment, SearchQuery};
use triage_core::{Result, SearchSource, json};

use crate::client::HttpClient;
use crate::endpoints::{self, ListParams, SearchParams, Subset, UploadRequest};
use crate::key::ApiKey;

/// A client for one sandbox deployment.
///
/// Every getter issues one request and decodes the body into a record;
/// fields the service leaves out hold their defaults.
#[derive(Debug, Clone)]
pub struct TriageApi {
    client: HttpClient,
}

impl TriageApi {
    /// Connect to a hosted environment.
    pub fn new(environment: Environment, key: ApiKey) -> Result<Self> {
        Self::with_url(environment.api_url(), key)
    }

    /// Connect to an explicit base URL.
    pub fn with_url(base: ApiUrl, key: ApiKey) -> Result<Self> {
        Ok(Self::from_client(HttpClient::new(base, key)?))
    }

    pub fn from_client(client: HttpClient) -> Self {
        Self { client }
    }

    /// Returns the base URL in use.
    pub fn url(&self) -> &ApiUrl {
        self.client.base()
    }

    /// Fetch one raw page of search results.
    pub async fn search_page_raw(
        &self,
        query: &str,
        offset: Option<&str>,
        limit: u32,
    ) -> Result<Vec<u8>> {
        let params = SearchParams {
            query,
            offset,
            limit: triage_core::search::clamp_limit(limit),
        };
        self.client.get_with(endpoints::SEARCH, &params).await
    }

    /// Fetch and decode one page of search results.
    pub async fn search_page(
        &self,
        query: &SearchQuery,
        offset: Option<&str>,
        limit: u32,
    ) -> Result<SearchPage> {
        let body = self.search_page_raw(query.as_str(), offset, limit).await?;
        json::parse_slice(&body)
    }

    /// Collect every result completed inside `window`.
    pub async fn search_window(
        &self,
        query: &SearchQuery,
        window: &SearchWindow,
        limit: u32,
        policy: ScanPolicy,
    ) -> Result<Vec<SearchResultEntry>> {
        WindowedSearch::new(self)
            .limit(limit)
            .policy(policy)
            .run(query, window)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_sample(&self, sample_id: &str) -> Result<Sample> {
        let body = self.client.get(&endpoints::sample(sample_id)?).await?;
        json::parse_slice(&body)
    }

    /// List the latest samples, either your own or public ones.
    ///
    /// Only the first page is returned; its `next` token is kept on the
    /// [`SampleList`].
    #[instrument(skip(self))]
    pub async fn list_samples(&self, subset: Subset) -> Result<SampleList> {
        let body = self
            .client
            .get_with(endpoints::SAMPLES, &ListParams { subset })
            .await?;
        let list: SampleList = json::parse_slice(&body)?;
        debug!(count = list.samples.len(), "Listed samples");
        Ok(list)
    }

    #[instrument(skip(self))]
    pub async fn sample_status(&self, sample_id: &str) -> Result<SampleStatus> {
        let body = self.client.get(&endpoints::sample_status(sample_id)?).await?;
        json::parse_slice(&body)
    }

    /// Status updates for a sample and its tasks.
    ///
    /// The service answers with one JSON document per line; each line
    /// becomes one [`SampleEvents`].
    #[instrument(skip(self))]
    pub async fn sample_events(&self, sample_id: &str) -> Result<Vec<SampleEvents>> {
        let body = self.client.get(&endpoints::sample_events(sample_id)?).await?;
        body.split(|b| *b == b'\n')
            .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
            .map(json::parse_slice)
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn get_static_report(&self, sample_id: &str) -> Result<StaticReport> {
        let body = self.client.get(&endpoints::static_report(sample_id)?).await?;
        json::parse_slice(&body)
    }

    #[instrument(skip(self))]
    pub async fn get_triage_report(&self, sample_id: &str, task_id: &str) -> Result<TriageReport> {
        let body = self
            .client
            .get(&endpoints::triage_report(sample_id, task_id)?)
            .await?;
        json::parse_slice(&body)
    }

    #[instrument(skip(self))]
    pub async fn get_overview(&self, sample_id: &str) -> Result<TriageOverview> {
        let body = self.client.get(&endpoints::overview(sample_id)?).await?;
        json::parse_slice(&body)
    }

    /// The kernel monitor log of a task, as newline-delimited JSON text.
    #[instrument(skip(self))]
    pub async fn kernel_monitor_log(&self, sample_id: &str, task_id: &str) -> Result<String> {
        let body = self
            .client
            .get(&endpoints::kernel_monitor_log(sample_id, task_id)?)
            .await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// The submitted file.
    #[instrument(skip(self))]
    pub async fn download_sample(&self, sample_id: &str) -> Result<Vec<u8>> {
        self.client.get(&endpoints::sample_file(sample_id)?).await
    }

    #[instrument(skip(self))]
    pub async fn download_pcap(&self, sample_id: &str, task_id: &str) -> Result<Vec<u8>> {
        self.client.get(&endpoints::pcap(sample_id, task_id)?).await
    }

    #[instrument(skip(self))]
    pub async fn download_pcapng(&self, sample_id: &str, task_id: &str) -> Result<Vec<u8>> {
        self.client.get(&endpoints::pcapng(sample_id, task_id)?).await
    }

    /// Submit a file for analysis.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn upload_sample(&self, path: &Path) -> Result<FileUploadResult> {
        let contents = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample".to_string());
        info!(%filename, bytes = contents.len(), "Uploading sample");

        let settings = serde_json::to_string(&UploadRequest::default())?;
        let form = Form::new()
            .part("file", Part::bytes(contents).file_name(filename))
            .text("_json", settings);

        let body = self.client.post_multipart(endpoints::SAMPLES, form).await?;
        json::parse_slice(&body)
    }
}

#[async_trait]
impl SearchSource for TriageApi {
    async fn fetch_page(&self, query: &str, offset: Option<&str>, limit: u32) -> Result<Vec<u8>> {
        self.search_page_raw(query, offset, limit).await
    }
}
