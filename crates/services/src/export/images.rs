use std::collections::HashMap;

use async_trait::async_trait;
use printpdf::image_crate::{self, DynamicImage};
use reqwest::Client;
use thiserror::Error;

use quiz_core::model::{Question, QuestionId, QuestionKind};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageFetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("image request returned {0}")]
    Status(u16),
    #[error("image could not be decoded: {0}")]
    Decode(String),
}

/// Where question images are downloaded from.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ImageFetchError` if the bytes cannot be retrieved.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError>;
}

/// Fetches images over HTTP(S).
#[derive(Clone, Default)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ImageFetchError::Status(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Download and decode every image question's picture. Failures are logged
/// and the image is left out.
pub async fn load_images<'a, I>(source: &dyn ImageSource, questions: I) -> HashMap<QuestionId, DynamicImage>
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut loaded = HashMap::new();
    for question in questions {
        if question.kind() != QuestionKind::Image {
            continue;
        }
        let Some(url) = question.image_url() else {
            continue;
        };
        let decoded = match source.fetch(url).await {
            Ok(bytes) => image_crate::load_from_memory(&bytes)
                .map_err(|e| ImageFetchError::Decode(e.to_string())),
            Err(err) => Err(err),
        };
        match decoded {
            Ok(image) => {
                loaded.insert(question.id(), image);
            }
            Err(err) => log::warn!("dropping image for question {}: {err}", question.id()),
        }
    }
    loaded
}
