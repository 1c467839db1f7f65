//! Check a contribution the way the contribution form does before upload.

use anyhow::Context;
use stats_core::contribution::{
    validate_processing, ContributionForm, ContributionMode, ProcessingInput, UploadFile,
};

fn local_file(path: &str) -> anyhow::Result<UploadFile> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("Cannot read {}", path))?
        .len();
    Ok(UploadFile {
        path: path.to_string(),
        size,
    })
}

/// Validate a zip archive at `file` or a resource `url`.
///
/// Returns the status line the form would show while submitting.
pub fn run_check(file: Option<&str>, url: Option<&str>) -> anyhow::Result<String> {
    let mut form = ContributionForm::new();
    let upload = match file {
        Some(path) => {
            form.mode = Some(ContributionMode::UploadZip);
            Some(local_file(path)?)
        }
        None => {
            form.mode = url.map(|_| ContributionMode::Url);
            None
        }
    };

    let submission = form.before_send(upload.as_ref(), url)?;
    Ok(submission.status_message())
}

/// Check a processing request: an archive at `file`, or a repository
/// resource by id.
pub fn run_processing_check(file: Option<&str>, resource_id: Option<&str>) -> anyhow::Result<String> {
    let upload = match (resource_id, file) {
        (None, Some(path)) => Some(local_file(path)?),
        _ => None,
    };
    let input = ProcessingInput::from_fields(resource_id, upload);
    validate_processing(input.as_ref())?;
    Ok(match input {
        Some(ProcessingInput::Resource { id }) => format!("Resource {} can be processed", id),
        _ => "Archive can be processed".to_string(),
    })
}
