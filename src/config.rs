//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.shop-review.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `SHOP_REVIEW_API_BASE_URL`,
//!    `SHOP_REVIEW_TOKEN`, or legacy `SHOP_API_TOKEN`
//! 4. **Command-line arguments** – `--api-base-url`/`-a`, `--token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_base_url = "https://shop.example.com/api"
//! token = "secret"
//! user_id = "64f1c0ffee"
//! order_file = "order.json"
//! media_pick_failure = "surface"
//! request_timeout_secs = 30
//! log_file = "shop-review.log"
//! ```

use std::env;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::{ApiEndpoint, ApiSettings, ApiToken, ReviewError, endpoint::DEFAULT_TIMEOUT_SECS};
use crate::media::MediaKind;
use crate::review::{MediaPickFailurePolicy, Rating, Session, WorkflowOptions};

/// Legacy environment variable consulted when no token is configured.
pub const LEGACY_TOKEN_ENV: &str = "SHOP_API_TOKEN";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use shop_review::ShopReviewConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = ShopReviewConfig::load().expect("failed to load configuration");
/// let base = config.require_api_base().expect("API base URL required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SHOP_REVIEW",
    discovery(
        dotfile_name = ".shop-review.toml",
        config_file_name = "shop-review.toml",
        app_name = "shop-review"
    )
)]
pub struct ShopReviewConfig {
    /// Base URL of the shop API (`.../api`).
    ///
    /// Can be provided via:
    /// - CLI: `--api-base-url <URL>` or `-a <URL>`
    /// - Environment: `SHOP_REVIEW_API_BASE_URL`
    /// - Config file: `api_base_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_base_url: Option<String>,

    /// Bearer token sent with API requests.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `SHOP_REVIEW_TOKEN` or `SHOP_API_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Identifier of the signed-in user writing the review.
    #[ortho_config(cli_short = 'u')]
    pub user_id: Option<String>,

    /// JSON file holding the navigation parameter (`productData`).
    #[ortho_config(cli_short = 'o')]
    pub order_file: Option<String>,

    /// Picker failure handling: `ignore` (default) or `surface`.
    #[ortho_config()]
    pub media_pick_failure: Option<String>,

    /// HTTP request timeout in seconds. Defaults to 20.
    #[ortho_config()]
    pub request_timeout_secs: u64,

    /// File receiving tracing output. Logging is disabled when unset.
    #[ortho_config()]
    pub log_file: Option<String>,

    /// Submits without starting the interactive screen.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so only the CLI flag and config file apply.
    #[ortho_config(cli_short = 'S')]
    pub submit_now: bool,

    /// Star rating for `--submit-now` (1-5).
    ///
    /// Can be provided via `--rating <N>` or `-R <N>`.
    #[ortho_config(cli_short = 'R')]
    pub rating: Option<u8>,

    /// Comment for `--submit-now`.
    #[ortho_config(cli_short = 'c')]
    pub comment: Option<String>,

    /// Attachments for `--submit-now` as `photo:PATH` or `video:PATH`.
    #[ortho_config()]
    pub attach: Vec<String>,
}

impl Default for ShopReviewConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            token: None,
            user_id: None,
            order_file: None,
            media_pick_failure: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
            submit_now: false,
            rating: None,
            comment: None,
            attach: Vec::new(),
        }
    }
}

/// A `--attach` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentArg {
    /// Picker kind to attach as.
    pub kind: MediaKind,
    /// Local file path.
    pub path: Utf8PathBuf,
}

impl ShopReviewConfig {
    /// Resolves the token from configuration or the legacy `SHOP_API_TOKEN`
    /// environment variable.
    ///
    /// The token is optional: `None` means requests are sent anonymously.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when the resolved token is blank.
    pub fn resolve_token(&self) -> Result<Option<ApiToken>, ReviewError> {
        self.token
            .clone()
            .or_else(|| env::var(LEGACY_TOKEN_ENV).ok())
            .map(ApiToken::new)
            .transpose()
    }

    /// Returns the parsed API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when no URL is configured, or
    /// [`ReviewError::InvalidUrl`] when it does not parse.
    pub fn require_api_base(&self) -> Result<ApiEndpoint, ReviewError> {
        let raw = self
            .api_base_url
            .as_deref()
            .ok_or_else(|| missing("API base URL is required (use --api-base-url or -a)"))?;
        ApiEndpoint::parse(raw)
    }

    /// Returns the session for the configured user.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingUser`] when no user id is configured.
    pub fn require_session(&self) -> Result<Session, ReviewError> {
        Session::new(self.user_id.as_deref().unwrap_or_default())
    }

    /// Returns the navigation parameter file path.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when no file is configured.
    pub fn require_order_file(&self) -> Result<&Utf8Path, ReviewError> {
        self.order_file
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(Utf8Path::new)
            .ok_or_else(|| missing("order file is required (use --order-file or -o)"))
    }

    /// Returns the configured picker failure policy.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] for values other than `ignore`
    /// and `surface`.
    pub fn media_pick_failure_policy(&self) -> Result<MediaPickFailurePolicy, ReviewError> {
        match self.media_pick_failure.as_deref() {
            None => Ok(MediaPickFailurePolicy::default()),
            Some(value) => MediaPickFailurePolicy::parse(value).ok_or_else(|| {
                ReviewError::Configuration {
                    message: format!(
                        "media_pick_failure must be 'ignore' or 'surface', got '{value}'"
                    ),
                }
            }),
        }
    }

    /// Workflow options derived from configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::media_pick_failure_policy`].
    pub fn workflow_options(&self) -> Result<WorkflowOptions, ReviewError> {
        Ok(WorkflowOptions {
            media_pick_failure: self.media_pick_failure_policy()?,
        })
    }

    /// Request timeout; zero falls back to the default.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    /// HTTP settings for both API gateways.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::require_api_base`] and [`Self::resolve_token`]
    /// failures.
    pub fn api_settings(&self) -> Result<ApiSettings, ReviewError> {
        Ok(ApiSettings::new(self.require_api_base()?)
            .with_token(self.resolve_token()?)
            .with_timeout(self.request_timeout()))
    }

    /// Log file path, if logging is enabled.
    #[must_use]
    pub fn log_path(&self) -> Option<&Utf8Path> {
        self.log_file
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(Utf8Path::new)
    }

    /// Rating for headless submission; defaults to one star.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] for values outside 1..=5.
    pub fn headless_rating(&self) -> Result<Rating, ReviewError> {
        let Some(value) = self.rating else {
            return Ok(Rating::default());
        };
        Rating::new(value).map_err(|error| ReviewError::Configuration {
            message: error.to_string(),
        })
    }

    /// Parses every `--attach` entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] for entries that are not
    /// `photo:PATH` or `video:PATH`.
    pub fn attachments(&self) -> Result<Vec<AttachmentArg>, ReviewError> {
        self.attach
            .iter()
            .map(|entry| parse_attachment(entry))
            .collect()
    }
}

fn parse_attachment(entry: &str) -> Result<AttachmentArg, ReviewError> {
    let invalid = || ReviewError::Configuration {
        message: format!("attachment '{entry}' must look like photo:PATH or video:PATH"),
    };
    let (label, path) = entry.split_once(':').ok_or_else(invalid)?;
    let kind = MediaKind::parse(label).ok_or_else(invalid)?;
    if path.trim().is_empty() {
        return Err(invalid());
    }
    Ok(AttachmentArg {
        kind,
        path: Utf8PathBuf::from(path),
    })
}

fn missing(message: &str) -> ReviewError {
    ReviewError::Configuration {
        message: message.to_owned(),
    }
}
