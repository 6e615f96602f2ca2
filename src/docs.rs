use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Timeout for one `rubocop --show-docs-url` invocation in seconds
const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Resolves a cop name to its documentation URL.
///
/// An empty string means no documentation is available. Implementations must
/// degrade to the empty string on failure rather than fail the run.
#[async_trait]
pub trait DocsLookup: Send + Sync {
    async fn docs_url(&self, cop: &str) -> String;
}

/// Production lookup that shells out to `rubocop --show-docs-url`
pub struct RubocopDocs;

#[async_trait]
impl DocsLookup for RubocopDocs {
    async fn docs_url(&self, cop: &str) -> String {
        match show_docs_url(cop, LOOKUP_TIMEOUT_SECS).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Docs lookup failed for '{}': {}", cop, e);
                String::new()
            }
        }
    }
}

async fn show_docs_url(cop: &str, timeout_secs: u64) -> Result<String, String> {
    let mut child = Command::new("rubocop")
        .args(["--show-docs-url", cop])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("failed to spawn rubocop: {}", e))?;

    let timeout = tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs));
    tokio::pin!(timeout);

    tokio::select! {
        result = child.wait() => {
            let status = result.map_err(|e| format!("failed to wait for rubocop: {}", e))?;
            if !status.success() {
                return Err(format!("rubocop exited with {}", status));
            }
            let mut stdout = String::new();
            if let Some(mut out) = child.stdout.take() {
                let _ = out.read_to_string(&mut stdout).await;
            }
            Ok(stdout.trim().to_string())
        }
        _ = &mut timeout => {
            let _ = child.kill().await;
            Err(format!("timed out after {} seconds", timeout_secs))
        }
    }
}

/// Lookup that never resolves documentation (used by `--no-docs`)
pub struct NoDocs;

#[async_trait]
impl DocsLookup for NoDocs {
    async fn docs_url(&self, _cop: &str) -> String {
        String::new()
    }
}

/// Memoizes lookups per cop name for the duration of one run, so repeated
/// suppressions of the same cop cost a single rubocop invocation.
pub struct CachedDocs<'a> {
    inner: &'a dyn DocsLookup,
    memo: Mutex<HashMap<String, String>>,
}

impl<'a> CachedDocs<'a> {
    pub fn new(inner: &'a dyn DocsLookup) -> Self {
        Self {
            inner,
            memo: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DocsLookup for CachedDocs<'_> {
    async fn docs_url(&self, cop: &str) -> String {
        if let Some(url) = self.memo.lock().await.get(cop) {
            debug!("Docs cache hit for '{}'", cop);
            return url.clone();
        }
        let url = self.inner.docs_url(cop).await;
        self.memo.lock().await.insert(cop.to_string(), url.clone());
        url
    }
}

/// Markdown display form for a cop: linked when documentation exists,
/// otherwise the bare name
pub async fn display_rule(docs: &dyn DocsLookup, cop: &str) -> String {
    let url = docs.docs_url(cop).await;
    if url.is_empty() {
        cop.to_string()
    } else {
        format!("[{}]({})", cop, url)
    }
}
