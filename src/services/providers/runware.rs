/// Runware text-to-image provider
///
/// Requests are a JSON array of tasks; one `imageInference` task is sent per
/// call and the first result's `imageURL` is returned.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::providers::{GeneratedImage, ImageGenerator, ImageOptions},
};

#[derive(Clone)]
pub struct RunwareImageGenerator {
    http_client: HttpClient,
    api_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageInferenceTask<'a> {
    task_type: &'static str,
    #[serde(rename = "taskUUID")]
    task_uuid: Uuid,
    positive_prompt: &'a str,
    width: u32,
    height: u32,
    model: &'a str,
    output_format: &'a str,
    number_results: u32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<ApiImage>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    #[serde(rename = "imageURL")]
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

impl RunwareImageGenerator {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }
}

fn build_task<'a>(prompt: &'a str, options: &'a ImageOptions) -> ImageInferenceTask<'a> {
    ImageInferenceTask {
        task_type: "imageInference",
        task_uuid: Uuid::new_v4(),
        positive_prompt: prompt,
        width: options.width,
        height: options.height,
        model: &options.model,
        output_format: &options.output_format,
        number_results: 1,
    }
}

fn image_from_response(response: ApiResponse) -> AppResult<GeneratedImage> {
    if let Some(error) = response.errors.into_iter().next() {
        return Err(AppError::ImageGeneration(
            error
                .message
                .unwrap_or_else(|| "Image provider reported an error".to_string()),
        ));
    }

    response
        .data
        .into_iter()
        .find_map(|image| image.image_url)
        .map(|url| GeneratedImage { url })
        .ok_or_else(|| AppError::ImageGeneration("Image provider returned no image".to_string()))
}

#[async_trait::async_trait]
impl ImageGenerator for RunwareImageGenerator {
    async fn generate_image(
        &self,
        api_key: &str,
        prompt: &str,
        options: &ImageOptions,
    ) -> AppResult<GeneratedImage> {
        let task = build_task(prompt, options);
        let task_id = task.task_uuid;

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&[task])
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body: Option<ApiResponse> = response.json().await.ok();
            let detail = body
                .and_then(|b| b.errors.into_iter().find_map(|e| e.message))
                .unwrap_or_else(|| format!("status {}", status));
            tracing::warn!(task_id = %task_id, status = %status, "Image generation rejected");
            return Err(AppError::ImageGeneration(detail));
        }

        let body: ApiResponse = response.json().await?;
        let image = image_from_response(body)?;

        tracing::info!(task_id = %task_id, "Image generated");
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "runware"
    }
}
