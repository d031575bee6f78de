use crate::report::{ReportConfig, Reporter};
use crate::sounds::SoundLibrary;

use anyhow::{bail, Context, Result};
use indicatif::HumanBytes;
use reqwest::blocking::Client;

pub const RAW_LIBRARY_URL: &str =
    "https://raw.githubusercontent.com/Tosencen/XMSLEEP/main/sounds_remote.json";
pub const CDN_LIBRARY_URL: &str =
    "https://cdn.jsdelivr.net/gh/Tosencen/XMSLEEP@main/sounds_remote.json";
pub const AUDIO_URLS: [&str; 2] = [
    "https://raw.githubusercontent.com/Tosencen/XMSLEEP/main/audio/things/ear-cleaning-1.mp3",
    "https://raw.githubusercontent.com/Tosencen/XMSLEEP/main/audio/things/ear-cleaning-2.mp3",
];

/// The fix under verification re-published the ear-cleaning sounds whose
/// remote URLs had a stray newline baked in.
pub const FIX_TARGET_ID: &str = "ear-cleaning";
pub const EXPECTED_MATCHES: usize = 2;

pub const RAW_CHECK: &str = "raw library";
pub const AUDIO_CHECK: &str = "audio assets";
pub const CDN_CHECK: &str = "cdn mirror";

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub passed: bool,
    /// A warning rather than a hard failure (CDN still propagating).
    pub advisory: bool,
    pub notes: Vec<String>,
}

impl CheckResult {
    fn pass(notes: Vec<String>) -> Self {
        Self {
            passed: true,
            advisory: false,
            notes,
        }
    }

    fn fail(notes: Vec<String>) -> Self {
        Self {
            passed: false,
            advisory: false,
            notes,
        }
    }

    fn warn(notes: Vec<String>) -> Self {
        Self {
            passed: false,
            advisory: true,
            notes,
        }
    }

    pub fn verdict(&self) -> &'static str {
        if self.passed {
            "pass"
        } else if self.advisory {
            "warn"
        } else {
            "fail"
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub raw: CheckResult,
    pub audio: CheckResult,
    pub cdn: CheckResult,
}

impl VerifyReport {
    /// The CDN check is advisory only; the verdict rests on the first two.
    pub fn fix_confirmed(&self) -> bool {
        self.raw.passed && self.audio.passed
    }
}

pub fn run_checks(config: ReportConfig) -> Result<VerifyReport> {
    let client = Client::builder()
        .build()
        .context("failed to build HTTP client")?;
    let mut reporter = Reporter::new(config);

    let raw = run_one(&mut reporter, RAW_CHECK, || check_raw_library(&client));
    let audio = run_one(&mut reporter, AUDIO_CHECK, || check_audio_assets(&client));
    let cdn = run_one(&mut reporter, CDN_CHECK, || check_cdn_library(&client));

    Ok(VerifyReport { raw, audio, cdn })
}

fn run_one(
    reporter: &mut Reporter,
    label: &'static str,
    check: impl FnOnce() -> CheckResult,
) -> CheckResult {
    reporter.begin(label);
    let result = check();
    for note in &result.notes {
        reporter.note(note);
    }
    reporter.finish(label, result.verdict());
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LibraryVerdict {
    /// Exactly the expected matches, every remote URL intact.
    Clean(Vec<String>),
    WrongCount(usize),
    MissingUrl(String),
    NewlineInUrl(String),
}

fn evaluate_library(body: &[u8]) -> Result<LibraryVerdict> {
    let library: SoundLibrary =
        serde_json::from_slice(body).context("malformed sound library JSON")?;
    let matches = library.matching(FIX_TARGET_ID);
    if matches.len() != EXPECTED_MATCHES {
        return Ok(LibraryVerdict::WrongCount(matches.len()));
    }
    for entry in &matches {
        match &entry.remote_url {
            None => return Ok(LibraryVerdict::MissingUrl(entry.id.clone())),
            Some(url) if url.contains('\n') => {
                return Ok(LibraryVerdict::NewlineInUrl(entry.id.clone()))
            }
            Some(_) => {}
        }
    }
    Ok(LibraryVerdict::Clean(
        matches.iter().map(|e| e.id.clone()).collect(),
    ))
}

fn check_raw_library(client: &Client) -> CheckResult {
    raw_result(fetch_body(client, RAW_LIBRARY_URL).and_then(|body| evaluate_library(&body)))
}

fn raw_result(outcome: Result<LibraryVerdict>) -> CheckResult {
    match outcome {
        Err(err) => CheckResult::fail(vec![format!("raw library check failed: {:#}", err)]),
        Ok(LibraryVerdict::WrongCount(n)) => CheckResult::fail(vec![format!(
            "expected {} {} sounds, found {}",
            EXPECTED_MATCHES, FIX_TARGET_ID, n
        )]),
        Ok(LibraryVerdict::MissingUrl(id)) => {
            CheckResult::fail(vec![format!("{}: entry has no remoteUrl", id)])
        }
        Ok(LibraryVerdict::NewlineInUrl(id)) => {
            CheckResult::fail(vec![format!("{}: remoteUrl contains a newline", id)])
        }
        Ok(LibraryVerdict::Clean(ids)) => CheckResult::pass(
            ids.iter()
                .map(|id| format!("{}: URL intact", id))
                .collect(),
        ),
    }
}

fn check_audio_assets(client: &Client) -> CheckResult {
    probe_audio_urls(&AUDIO_URLS, |url| head_snapshot(client, url))
}

#[derive(Debug, Clone)]
struct HeadSnapshot {
    status: u16,
    content_length: Option<u64>,
}

/// HEAD each URL in order; the first non-200 (or transport error) fails the
/// check without probing the rest.
fn probe_audio_urls<F>(urls: &[&str], mut probe: F) -> CheckResult
where
    F: FnMut(&str) -> Result<HeadSnapshot>,
{
    let mut notes = vec![];
    for url in urls {
        match probe(url) {
            Err(err) => {
                notes.push(format!("{}: {:#}", url, err));
                return CheckResult::fail(notes);
            }
            Ok(snap) if snap.status == 200 => {
                let size = snap
                    .content_length
                    .map(|n| HumanBytes(n).to_string())
                    .unwrap_or_else(|| "unknown size".to_string());
                notes.push(format!("{}: reachable ({})", url, size));
            }
            Ok(snap) => {
                notes.push(format!("{}: HTTP {}", url, snap.status));
                return CheckResult::fail(notes);
            }
        }
    }
    CheckResult::pass(notes)
}

fn check_cdn_library(client: &Client) -> CheckResult {
    cdn_result(fetch_body(client, CDN_LIBRARY_URL).and_then(|body| evaluate_library(&body)))
}

fn cdn_result(outcome: Result<LibraryVerdict>) -> CheckResult {
    match outcome {
        Err(err) => CheckResult::fail(vec![format!("CDN check failed: {:#}", err)]),
        // A stale mirror is expected for a while after the fix lands.
        Ok(LibraryVerdict::WrongCount(n)) => CheckResult::warn(vec![format!(
            "CDN not refreshed yet: {} {} sounds visible, expected {}",
            n, FIX_TARGET_ID, EXPECTED_MATCHES
        )]),
        Ok(LibraryVerdict::MissingUrl(id)) => {
            CheckResult::fail(vec![format!("{}: CDN entry has no remoteUrl", id)])
        }
        Ok(LibraryVerdict::NewlineInUrl(id)) => {
            CheckResult::fail(vec![format!("{}: CDN remoteUrl still has a newline", id)])
        }
        Ok(LibraryVerdict::Clean(ids)) => CheckResult::pass(
            ids.iter()
                .map(|id| format!("{}: CDN URL intact", id))
                .collect(),
        ),
    }
}

fn fetch_body(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("GET {} failed", url))?;
    let status = response.status();
    if !status.is_success() {
        bail!("GET {} returned HTTP {}", url, status);
    }
    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read body of {}", url))?;
    Ok(bytes.to_vec())
}

fn head_snapshot(client: &Client, url: &str) -> Result<HeadSnapshot> {
    let response = client
        .head(url)
        .send()
        .with_context(|| format!("HEAD {} failed", url))?;
    Ok(HeadSnapshot {
        status: response.status().as_u16(),
        content_length: response.content_length(),
    })
}
