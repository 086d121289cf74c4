//! Header download.
//!
//! - reqwest blocking client for HTTP
//! - one request at a time, in list order
//! - a failed file is reported and skipped, never retried

use anyhow::Context;
use log::{debug, warn};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ScaffoldError;
use crate::writer::FileSink;

/// Upstream location of the sokol headers.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/floooh/sokol/refs/heads/master/";

/// Headers fetched by default, in download order.
pub const DEFAULT_HEADERS: [&str; 8] = [
    "sokol_app.h",
    "sokol_gfx.h",
    "sokol_audio.h",
    "sokol_time.h",
    "sokol_args.h",
    "sokol_fetch.h",
    "sokol_log.h",
    "sokol_glue.h",
];

/// What to download and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileSpec {
    pub base_url: String,
    pub dir: PathBuf,
    pub files: Vec<String>,
}

impl Default for RemoteFileSpec {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dir: PathBuf::from(crate::paths::project::HEADER_DIR),
            files: DEFAULT_HEADERS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl RemoteFileSpec {
    /// `(filename, url)` pairs in download order.
    pub fn entries(&self) -> Vec<(&str, String)> {
        self.files
            .iter()
            .map(|f| (f.as_str(), format!("{}{}", self.base_url, f)))
            .collect()
    }
}

/// A response whose body has not been read yet.
pub struct RemoteResponse {
    pub status: u16,
    /// Status line text, e.g. `404 Not Found`.
    pub status_text: String,
    pub body: Box<dyn Read>,
}

impl RemoteResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP GET capability.
pub trait HttpGet {
    /// Returns `Err` only when no response was received at all.
    fn get(&self, url: &str) -> anyhow::Result<RemoteResponse>;
}

/// [`HttpGet`] backed by `reqwest::blocking`.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Build a client. With `timeout = None` requests may block forever.
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sokolgen/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpGet for ReqwestClient {
    fn get(&self, url: &str) -> anyhow::Result<RemoteResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to GET {}", url))?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);
        Ok(RemoteResponse {
            status: status.as_u16(),
            status_text: status.to_string(),
            body: Box::new(response),
        })
    }
}

/// Result of fetching one file.
#[derive(Debug)]
pub struct FetchOutcome {
    pub file: String,
    pub url: String,
    pub result: Result<u64, ScaffoldError>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file outcomes of a fetch run, in list order.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|o| o.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(FetchOutcome::is_ok)
    }

    /// First failure, used for the process exit status.
    pub fn first_error(&self) -> Option<&ScaffoldError> {
        self.outcomes.iter().find_map(|o| o.result.as_ref().err())
    }

    /// JSON-friendly view of the report.
    pub fn summary(&self) -> Vec<FetchSummary<'_>> {
        self.outcomes
            .iter()
            .map(|o| FetchSummary {
                file: &o.file,
                url: &o.url,
                bytes: o.result.as_ref().ok().copied(),
                error: o.result.as_ref().err().map(|e| e.to_string()),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct FetchSummary<'a> {
    pub file: &'a str,
    pub url: &'a str,
    pub bytes: Option<u64>,
    pub error: Option<String>,
}

/// Downloads a [`RemoteFileSpec`] through an [`HttpGet`] into a [`FileSink`].
pub struct Fetcher<'a> {
    http: &'a dyn HttpGet,
    spec: &'a RemoteFileSpec,
}

impl<'a> Fetcher<'a> {
    pub fn new(http: &'a dyn HttpGet, spec: &'a RemoteFileSpec) -> Self {
        Self { http, spec }
    }

    /// Make sure the header directory exists. An existing directory is fine.
    pub fn ensure_dir(&self, sink: &dyn FileSink) -> Result<(), ScaffoldError> {
        match sink.create_dir(&self.spec.dir) {
            Ok(()) => {
                debug!("created {}", self.spec.dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(ScaffoldError::Directory {
                path: sink.display_path(&self.spec.dir),
                source,
            }),
        }
    }

    /// Fetch every file, calling `on_outcome` as each one finishes.
    ///
    /// Returns `Err` only when the directory cannot be created; per-file
    /// failures are collected in the report.
    pub fn fetch_all_with(
        &self,
        sink: &dyn FileSink,
        mut on_outcome: impl FnMut(&FetchOutcome),
    ) -> Result<FetchReport, ScaffoldError> {
        self.ensure_dir(sink)?;

        let mut report = FetchReport::default();
        for (file, url) in self.spec.entries() {
            let dest = self.spec.dir.join(file);
            let result = self.fetch_one(sink, &url, &dest);
            if let Err(e) = &result {
                warn!("{file}: {e}");
            }
            let outcome = FetchOutcome {
                file: file.to_string(),
                url,
                result,
            };
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }
        Ok(report)
    }

    pub fn fetch_all(&self, sink: &dyn FileSink) -> Result<FetchReport, ScaffoldError> {
        self.fetch_all_with(sink, |_| {})
    }

    /// GET `url` and stream the body to `dest`. The file is only created once
    /// the status is known to be OK.
    fn fetch_one(&self, sink: &dyn FileSink, url: &str, dest: &Path) -> Result<u64, ScaffoldError> {
        let mut response = self.http.get(url).map_err(|e| ScaffoldError::Request {
            url: url.to_string(),
            message: format!("{e:#}"),
        })?;

        if !response.is_ok() {
            return Err(ScaffoldError::RemoteStatus {
                url: url.to_string(),
                status: response.status_text,
            });
        }

        let mut out = sink
            .create(dest)
            .map_err(|e| ScaffoldError::file_system(sink.display_path(dest), e))?;
        let bytes = io::copy(&mut response.body, &mut out)
            .and_then(|n| out.flush().map(|_| n))
            .map_err(|e| ScaffoldError::file_system(sink.display_path(dest), e))?;

        debug!("wrote {} ({} bytes)", dest.display(), bytes);
        Ok(bytes)
    }
}
