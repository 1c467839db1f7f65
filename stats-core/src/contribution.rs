//! Checks run on the contribution form before anything is uploaded.
//!
//! A contribution is either a zipped upload or a link to the resource.
//! The form also tracks whether its "please wait" overlay is open so the
//! page can keep the user from leaving while a submission is in flight.

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Largest accepted upload (100 MB).
pub const MAX_UPLOAD_BYTES: u64 = 104_857_600;

/// Largest archive accepted by the processing form (30 MB).
pub const MAX_PROCESSING_BYTES: u64 = 31_457_280;

/// Extension every uploaded archive must carry.
pub const ZIP_EXTENSION: &str = ".zip";

/// Errors reported to the contributor instead of submitting the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContributionError {
    #[error("Please select a contribution mode!")]
    MissingMode,

    #[error(
        "The file you are trying to upload is larger than the maximum upload file size (100mb)."
    )]
    FileTooLarge { size: u64 },

    #[error(
        "The file you are trying to upload does not have a .zip extension. \
         Please make sure that you properly compress your data into a valid .zip file before uploading."
    )]
    NotZip { file_name: String },

    #[error("Please enter a valid URL!")]
    InvalidUrl { url: String },

    #[error("The file you are trying to upload is larger than the maximum upload file size (30 MB)!")]
    ProcessingFileTooLarge { size: u64 },

    #[error("Please select a zip archive or a repository resource to process!")]
    NothingToProcess,
}

/// The radio button chosen on the contribution form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionMode {
    UploadZip,
    Url,
}

impl ContributionMode {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "uploadzip" => Some(ContributionMode::UploadZip),
            "url" => Some(ContributionMode::Url),
            _ => None,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            ContributionMode::UploadZip => "uploadzip",
            ContributionMode::Url => "url",
        }
    }
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Path or name as reported by the file input
    pub path: String,
    pub size: u64,
}

impl UploadFile {
    /// Base name of the path, whichever separator the browser used.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.path)
    }
}

/// What the form is about to send, once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Upload { file_name: String },
    Link { url: String },
}

impl Submission {
    /// Status line shown while the submission is in flight.
    pub fn status_message(&self) -> String {
        match self {
            Submission::Upload { file_name } => {
                format!("Uploading file: \"{}\".\nPlease wait...", file_name)
            }
            Submission::Link { .. } => "Submitting your contribution: \nPlease wait...".to_string(),
        }
    }
}

/// `{status, message}` answer of the contribution endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
}

impl UploadResponse {
    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }
}

// Digit classes are spelled out: `\d` would also match non-ASCII digits.
const UCS: &str = r"\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}";
const PCT_ENCODED: &str = r"%[0-9a-f]{2}";
const SUB_DELIMS: &str = r"[!$&'()*+,;=]";
const PRIVATE_USE: &str = r"[\x{E000}-\x{F8FF}]";
const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])";

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    let unreserved = format!(r"[a-z0-9\-._~{UCS}]");
    let alnum = format!(r"[a-z0-9{UCS}]");
    let alpha = format!(r"[a-z{UCS}]");
    let pchar = format!(r"(?:{unreserved}|{PCT_ENCODED}|{SUB_DELIMS}|:|@)");

    let userinfo = format!(r"(?:(?:{unreserved}|{PCT_ENCODED}|{SUB_DELIMS}|:)*@)?");
    let ipv4 = format!(r"{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}");
    let label = format!(r"(?:{alnum}{unreserved}*{alnum}|{alnum})");
    let tld = format!(r"(?:{alpha}{unreserved}*{alpha}|{alpha})");
    let domain = format!(r"(?:{label}\.)+{tld}\.?");
    let path = format!(r"(?:/(?:{pchar}+(?:/{pchar}*)*)?)?");
    let query = format!(r"(?:\?(?:{pchar}|{PRIVATE_USE}|/|\?)*)?");
    let fragment = format!(r"(?:#(?:{pchar}|/|\?)*)?");

    Regex::new(&format!(
        r"(?i)^(?:https?|ftp)://{userinfo}(?:{ipv4}|{domain})(?::[0-9]*)?{path}{query}{fragment}$"
    ))
    .expect("contribution URL pattern is valid")
});

/// Whether `url` is an http(s) or ftp link to a named or dotted IPv4 host.
pub fn validate_url(url: &str) -> bool {
    URL_REGEX.is_match(url)
}

/// Size and extension checks for an archive upload.
pub fn validate_file(file: &UploadFile) -> Result<(), ContributionError> {
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ContributionError::FileTooLarge { size: file.size });
    }
    let file_name = file.file_name();
    if !file_name.ends_with(ZIP_EXTENSION) {
        return Err(ContributionError::NotZip {
            file_name: file_name.to_string(),
        });
    }
    Ok(())
}

/// What the processing form sends: an archive, or a resource already in
/// the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingInput {
    Resource { id: String },
    Upload(UploadFile),
}

impl ProcessingInput {
    /// Read the form fields. A resource id wins over an attached archive.
    pub fn from_fields(resource_id: Option<&str>, file: Option<UploadFile>) -> Option<Self> {
        match (resource_id, file) {
            (Some(id), _) => Some(ProcessingInput::Resource { id: id.to_string() }),
            (None, Some(file)) => Some(ProcessingInput::Upload(file)),
            (None, None) => None,
        }
    }
}

/// Check the processing form ahead of sending.
///
/// Only uploaded archives are size-checked; repository resources are
/// already on the server.
pub fn validate_processing(input: Option<&ProcessingInput>) -> Result<(), ContributionError> {
    match input.ok_or(ContributionError::NothingToProcess)? {
        ProcessingInput::Resource { id } => {
            debug!("Processing repository resource {}", id);
            Ok(())
        }
        ProcessingInput::Upload(file) if file.size > MAX_PROCESSING_BYTES => {
            Err(ContributionError::ProcessingFileTooLarge { size: file.size })
        }
        ProcessingInput::Upload(_) => Ok(()),
    }
}

/// State of the contribution form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionForm {
    pub mode: Option<ContributionMode>,
    overlay_open: bool,
}

impl ContributionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn set_mode(&mut self, value: &str) {
        self.mode = ContributionMode::from_value(value);
    }

    /// Validate the form ahead of sending. On success the overlay opens.
    ///
    /// An attached file over the upload limit is refused whatever the mode.
    pub fn before_send(
        &mut self,
        file: Option<&UploadFile>,
        url: Option<&str>,
    ) -> Result<Submission, ContributionError> {
        if let Some(file) = file.filter(|file| file.size > MAX_UPLOAD_BYTES) {
            return Err(ContributionError::FileTooLarge { size: file.size });
        }
        let submission = match self.mode.ok_or(ContributionError::MissingMode)? {
            ContributionMode::UploadZip => {
                let file = file.ok_or_else(|| ContributionError::NotZip {
                    file_name: String::new(),
                })?;
                validate_file(file)?;
                Submission::Upload {
                    file_name: file.file_name().to_string(),
                }
            }
            ContributionMode::Url => {
                let url = url.unwrap_or_default().trim();
                if !validate_url(url) {
                    return Err(ContributionError::InvalidUrl {
                        url: url.to_string(),
                    });
                }
                Submission::Link {
                    url: url.to_string(),
                }
            }
        };
        self.overlay_open = true;
        Ok(submission)
    }

    /// The transport failed: close the overlay so the form is usable again.
    pub fn fail(&mut self) {
        warn!("Contribution submission failed");
        self.overlay_open = false;
    }

    /// The server answered. The overlay stays open to show its status.
    pub fn complete(&mut self, response: &UploadResponse) -> bool {
        info!("Contribution finished with status '{}'", response.status);
        !response.is_failed()
    }

    /// The contributor acknowledged the status message.
    pub fn dismiss(&mut self) {
        self.overlay_open = false;
    }
}
