//! Slack webhook delivery
//!
//! Posts the contents of a spooled report file to a Slack incoming
//! webhook as a single markdown attachment, then removes the file. The
//! file is left in place when the request fails, so the caller can retry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

/// Errors from webhook delivery
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// Reading or unlinking the spooled file failed
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The webhook request itself failed
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl SlackError {
    fn io(path: &Path, source: io::Error) -> Self {
        SlackError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Serialize)]
struct Payload {
    attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize)]
struct Attachment {
    text: String,
    mrkdwn_in: Vec<String>,
}

impl Payload {
    fn for_contents(contents: &str) -> Self {
        Payload {
            attachments: vec![Attachment {
                text: format!("*```{contents}```*"),
                mrkdwn_in: vec!["text".to_string()],
            }],
        }
    }
}

/// A configured Slack incoming-webhook endpoint
pub struct SlackWebhook {
    url: String,
    client: reqwest::blocking::Client,
}

impl SlackWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        SlackWebhook {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Posts the contents of `tmp_file` as a markdown attachment and
    /// unlinks the file once the request completes. Returns the HTTP
    /// status code.
    pub fn post_file(&self, tmp_file: &Path) -> Result<u16, SlackError> {
        let contents =
            fs::read_to_string(tmp_file).map_err(|e| SlackError::io(tmp_file, e))?;
        let payload = Payload::for_contents(&contents);

        let response = self.client.post(&self.url).json(&payload).send()?;
        let status = response.status().as_u16();
        debug!("posted {} to webhook, status {status}", tmp_file.display());

        fs::remove_file(tmp_file).map_err(|e| SlackError::io(tmp_file, e))?;
        Ok(status)
    }
}
