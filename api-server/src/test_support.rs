//! Shared helpers for route tests

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tg_core::channel::{ChannelKind, MessageChannel, OutboxChannel, OutboxEntry};
use tg_core::object::{DirObjectStore, ObjectStore};
use tg_core::task::{FileTaskStore, Task, TaskRepository};
use tg_core::{Error, Result, TaskGateway};

use crate::routes;
use crate::state::AppState;

const BOUNDARY: &str = "gateway-test-boundary";

/// Accepts the bucket but rejects every write
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    fn name(&self) -> &str {
        "failing-bucket"
    }

    async fn ensure(&self) -> Result<()> {
        Ok(())
    }

    async fn put(&self, _key: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<()> {
        Err(Error::ObjectStore("put rejected".to_string()))
    }
}

/// Provisions fine, then rejects every delivery
pub struct FailingChannel(pub ChannelKind);

#[async_trait]
impl MessageChannel for FailingChannel {
    fn kind(&self) -> ChannelKind {
        self.0
    }

    fn name(&self) -> &str {
        "failing-channel"
    }

    async fn ensure(&self) -> Result<String> {
        Ok(format!("failing://{}", self.0))
    }

    async fn deliver(&self, _address: &str, _body: &str) -> Result<()> {
        Err(Error::channel(self.0, "delivery rejected"))
    }
}

/// Creates the table, then rejects every read and write
pub struct FailingTaskRepository;

#[async_trait]
impl TaskRepository for FailingTaskRepository {
    fn name(&self) -> &str {
        "failing-table"
    }

    async fn ensure(&self) -> Result<()> {
        Ok(())
    }

    async fn put(&self, _task: &Task) -> Result<()> {
        Err(Error::Table("put rejected".to_string()))
    }

    async fn scan(&self) -> Result<Vec<Task>> {
        Err(Error::Table("scan rejected".to_string()))
    }
}

#[derive(Default)]
pub struct HarnessBuilder {
    objects: Option<Arc<dyn ObjectStore>>,
    tasks: Option<Arc<dyn TaskRepository>>,
    queue: Option<Arc<dyn MessageChannel>>,
}

impl HarnessBuilder {
    pub fn objects(mut self, objects: Arc<dyn ObjectStore>) -> Self {
        self.objects = Some(objects);
        self
    }

    pub fn tasks(mut self, tasks: Arc<dyn TaskRepository>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    pub fn queue(mut self, queue: Arc<dyn MessageChannel>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub async fn build(self) -> Harness {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();

        let table_path = dir.join("tasks.json");
        let tasks = Arc::new(FileTaskStore::new(&table_path).await.unwrap());
        let queue = Arc::new(OutboxChannel::new(ChannelKind::Queue, dir.join("queue.jsonl")));
        let topic = Arc::new(OutboxChannel::new(ChannelKind::Topic, dir.join("topic.jsonl")));
        let objects_dir = dir.join("objects");

        let objects = self.objects.unwrap_or_else(|| {
            Arc::new(DirObjectStore::new(&objects_dir)) as Arc<dyn ObjectStore>
        });
        let gateway = TaskGateway::new(
            objects,
            self.tasks
                .unwrap_or_else(|| tasks.clone() as Arc<dyn TaskRepository>),
            self.queue
                .unwrap_or_else(|| queue.clone() as Arc<dyn MessageChannel>),
            topic.clone(),
        );

        Harness {
            state: AppState::new(gateway),
            tasks,
            table_path,
            queue,
            topic,
            objects_dir,
            _temp: temp,
        }
    }
}

/// Router state over local stores in a temp dir, with handles to inspect them
pub struct Harness {
    pub state: AppState,
    tasks: Arc<FileTaskStore>,
    table_path: PathBuf,
    queue: Arc<OutboxChannel>,
    topic: Arc<OutboxChannel>,
    objects_dir: PathBuf,
    _temp: TempDir,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    pub async fn local() -> Self {
        Self::builder().build().await
    }

    /// Run provisioning and publish the result, as startup does
    pub async fn ready(self) -> Self {
        let provisioned = self.state.gateway().initialize().await;
        self.state.mark_ready(provisioned);
        self
    }

    pub fn app(&self) -> Router {
        routes::app(self.state.clone())
    }

    /// Put a directory where the local table file lives so writes fail
    pub fn block_table(&self) {
        if self.table_path.exists() {
            std::fs::remove_file(&self.table_path).unwrap();
        }
        std::fs::create_dir(&self.table_path).unwrap();
    }

    pub fn object(&self, key: &str) -> Vec<u8> {
        std::fs::read(self.objects_dir.join(key)).unwrap()
    }

    pub async fn stored_tasks(&self) -> Vec<Task> {
        self.tasks.scan().await.unwrap()
    }

    /// Entries in the local queue outbox; empty if it was never provisioned
    pub async fn queued(&self) -> Vec<OutboxEntry> {
        self.queue.entries().await.unwrap_or_default()
    }

    pub async fn published(&self) -> Vec<OutboxEntry> {
        self.topic.entries().await.unwrap_or_default()
    }
}

pub fn multipart_request(
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
