//! Task gateway service
//!
//! Wires the object store, task table, queue and topic together for the three
//! operations the HTTP surface exposes: upload, create task, list tasks.

use std::path::Path;
use std::sync::Arc;

use crate::channel::{ChannelKind, MessageChannel, OutboxChannel};
use crate::object::{DirObjectStore, ObjectStore, Upload, IMAGE_CONTENT_TYPE};
use crate::provision::{provision, Provisioned};
use crate::task::{FileTaskStore, Task, TaskDraft, TaskRepository};
use crate::{Error, Result};

/// A best-effort notification run after the task record is stored
struct PostAction<'a> {
    channel: &'a dyn MessageChannel,
    address: Option<&'a str>,
}

impl PostAction<'_> {
    async fn run(&self, body: &str) -> Result<()> {
        let address = self
            .address
            .ok_or(Error::NotProvisioned(self.channel.kind()))?;
        self.channel.deliver(address, body).await
    }
}

#[derive(Clone)]
pub struct TaskGateway {
    objects: Arc<dyn ObjectStore>,
    tasks: Arc<dyn TaskRepository>,
    queue: Arc<dyn MessageChannel>,
    topic: Arc<dyn MessageChannel>,
}

impl TaskGateway {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        tasks: Arc<dyn TaskRepository>,
        queue: Arc<dyn MessageChannel>,
        topic: Arc<dyn MessageChannel>,
    ) -> Self {
        Self {
            objects,
            tasks,
            queue,
            topic,
        }
    }

    /// Gateway backed entirely by files under `data_dir`
    pub async fn local(data_dir: &Path) -> Result<Self> {
        let tasks = FileTaskStore::new(data_dir.join("tasks.json")).await?;
        Ok(Self::new(
            Arc::new(DirObjectStore::new(data_dir.join("objects"))),
            Arc::new(tasks),
            Arc::new(OutboxChannel::new(
                ChannelKind::Queue,
                data_dir.join("queue.jsonl"),
            )),
            Arc::new(OutboxChannel::new(
                ChannelKind::Topic,
                data_dir.join("topic.jsonl"),
            )),
        ))
    }

    /// Ensure bucket, table, queue and topic exist
    pub async fn initialize(&self) -> Provisioned {
        provision(
            self.objects.as_ref(),
            self.tasks.as_ref(),
            self.queue.as_ref(),
            self.topic.as_ref(),
        )
        .await
    }

    /// Store an uploaded file and return the key it was written under
    pub async fn upload(&self, upload: Upload) -> Result<String> {
        let key = upload.storage_key();
        self.objects
            .put(&key, upload.bytes, IMAGE_CONTENT_TYPE)
            .await?;
        tracing::info!(bucket = %self.objects.name(), %key, "Upload stored");
        Ok(key)
    }

    /// Create a task: store the file, write the record, then notify
    ///
    /// A failed file write or record write aborts before anything later runs.
    /// Queue and topic failures are logged and do not fail the call.
    pub async fn create_task(
        &self,
        provisioned: &Provisioned,
        draft: TaskDraft,
        file: Option<Upload>,
    ) -> Result<Task> {
        let mut task = Task::new(draft);
        if let Some(upload) = file {
            let key = self.upload(upload).await?;
            task = task.with_image_url(key);
        }

        if let Err(e) = self.tasks.put(&task).await {
            tracing::error!(id = %task.id, "Failed to save task: {}", e);
            return Err(match e {
                Error::Table(_) => e,
                other => Error::Table(other.to_string()),
            });
        }
        tracing::info!(id = %task.id, "Task saved");

        let body = serde_json::to_string(&task)?;
        let post_actions = [
            PostAction {
                channel: self.queue.as_ref(),
                address: provisioned.queue_address.as_deref(),
            },
            PostAction {
                channel: self.topic.as_ref(),
                address: provisioned.topic_address.as_deref(),
            },
        ];
        for action in &post_actions {
            let kind = action.channel.kind();
            match action.run(&body).await {
                Ok(()) => tracing::info!(id = %task.id, %kind, "Task notification sent"),
                Err(e) => {
                    tracing::error!(id = %task.id, %kind, "Failed to send task notification: {}", e)
                }
            }
        }

        Ok(task)
    }

    /// Every stored task, in table order
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.tasks.scan().await
    }
}
