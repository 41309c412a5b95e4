//! Media Config

use clap::Args;
use zeroize::Zeroizing;

use reelbite_app::media::ImageKitConfig;

/// ImageKit settings.
#[derive(Debug, Args)]
pub struct MediaConfig {
    /// ImageKit private API key
    #[arg(long, env = "IMAGEKIT_PRIVATE_KEY", hide_env_values = true)]
    pub imagekit_private_key: String,

    /// ImageKit upload endpoint
    #[arg(
        long,
        env = "IMAGEKIT_UPLOAD_URL",
        default_value = "https://upload.imagekit.io/api"
    )]
    pub imagekit_upload_url: String,

    /// ImageKit management API endpoint
    #[arg(long, env = "IMAGEKIT_API_URL", default_value = "https://api.imagekit.io")]
    pub imagekit_api_url: String,
}

impl MediaConfig {
    #[must_use]
    pub fn imagekit(&self) -> ImageKitConfig {
        ImageKitConfig {
            upload_url: self.imagekit_upload_url.trim_end_matches('/').to_string(),
            api_url: self.imagekit_api_url.trim_end_matches('/').to_string(),
            private_key: Zeroizing::new(self.imagekit_private_key.clone()),
        }
    }
}
