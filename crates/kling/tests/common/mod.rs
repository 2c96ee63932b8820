//! Scripted in-memory stand-in for the Kling service.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use image::Rgb;
use tryon_core::types::RgbImage;
use tryon_kling::api::{KlingApiError, TryOnApi};
use tryon_kling::messages::{ResultImage, TaskId, TaskInfo, TaskResult, TryOnRequest};
use tryon_kling::poller::PollPolicy;
use tryon_kling::KlingClient;

pub const TASK_ID: &str = "task-0001";
pub const RESULT_URL: &str = "https://cdn.example.test/result.png";

/// One scripted answer to a status query.
pub enum Reply {
    Pending,
    Succeed,
    Failed(&'static str),
    Timeout,
    HttpError(u16),
}

pub struct FakeApi {
    submit_error: Mutex<Option<KlingApiError>>,
    replies: Mutex<VecDeque<Reply>>,
    download_status: Option<u16>,
    pub result: RgbImage,
    pub submitted: Mutex<Vec<TryOnRequest>>,
    pub queries: Mutex<u32>,
    pub downloads: Mutex<u32>,
}

impl FakeApi {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            submit_error: Mutex::new(None),
            replies: Mutex::new(replies.into_iter().collect()),
            download_status: None,
            result: sample_image(Rgb([0, 200, 0])),
            submitted: Mutex::new(Vec::new()),
            queries: Mutex::new(0),
            downloads: Mutex::new(0),
        }
    }

    /// `n` pending replies followed by success.
    pub fn pending_then_succeed(n: usize) -> Self {
        Self::new(
            std::iter::repeat_with(|| Reply::Pending)
                .take(n)
                .chain(std::iter::once(Reply::Succeed)),
        )
    }

    pub fn failing_submit(error: KlingApiError) -> Self {
        let api = Self::new([]);
        *api.submit_error.lock().unwrap() = Some(error);
        api
    }

    pub fn with_download_status(mut self, status: u16) -> Self {
        self.download_status = Some(status);
        self
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn query_count(&self) -> u32 {
        *self.queries.lock().unwrap()
    }

    pub fn download_count(&self) -> u32 {
        *self.downloads.lock().unwrap()
    }

    pub fn last_request(&self) -> TryOnRequest {
        self.submitted
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a request should have been submitted")
    }
}

fn task_info(status: &str, msg: Option<&str>, url: Option<&str>) -> TaskInfo {
    TaskInfo {
        task_id: TaskId(TASK_ID.into()),
        task_status: status.into(),
        task_status_msg: msg.map(str::to_string),
        task_result: url.map(|u| TaskResult {
            images: vec![ResultImage {
                index: Some(0),
                url: u.to_string(),
            }],
        }),
    }
}

#[async_trait]
impl TryOnApi for FakeApi {
    async fn submit(&self, request: &TryOnRequest) -> Result<TaskId, KlingApiError> {
        if let Some(e) = self.submit_error.lock().unwrap().take() {
            return Err(e);
        }
        self.submitted.lock().unwrap().push(request.clone());
        Ok(TaskId(TASK_ID.into()))
    }

    async fn query(&self, task_id: &TaskId) -> Result<TaskInfo, KlingApiError> {
        assert_eq!(task_id.0, TASK_ID, "queried an unknown task");
        *self.queries.lock().unwrap() += 1;

        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Pending);
        match reply {
            Reply::Pending => Ok(task_info("processing", None, None)),
            Reply::Succeed => Ok(task_info("succeed", None, Some(RESULT_URL))),
            Reply::Failed(msg) => Ok(task_info("failed", Some(msg), None)),
            Reply::Timeout => Err(KlingApiError::Timeout),
            Reply::HttpError(status) => Err(KlingApiError::ApiError {
                status,
                body: "upstream error".into(),
            }),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, KlingApiError> {
        assert_eq!(url, RESULT_URL);
        *self.downloads.lock().unwrap() += 1;

        if let Some(status) = self.download_status {
            return Err(KlingApiError::ApiError {
                status,
                body: "gone".into(),
            });
        }

        let mut png = Vec::new();
        self.result
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("png encode should succeed");
        Ok(png)
    }
}

pub fn sample_image(color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(24, 32, color)
}

pub fn client(api: FakeApi) -> KlingClient<FakeApi> {
    KlingClient::with_api(api).with_policy(PollPolicy::default())
}
