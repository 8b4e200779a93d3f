// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with flat-file implementation.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasktrack_common::Task;
use tokio::fs as tokio_fs;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::AppError;

/// A persisted user record. The password hash never leaves this layer
/// except for sign-in verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user about to be persisted. The store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a new user. Fails with `Conflict` when the username or email
    /// is already taken; this check is the authoritative uniqueness guard.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    /// Look up a user by email (case-sensitive exact match)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Combined duplicate lookup used by sign-up's fast path
    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>;

    /// Persist a task under its owner
    async fn insert_task(&self, task: &Task) -> Result<(), AppError>;

    /// All tasks owned by a user
    async fn tasks_for_user(&self, user: Uuid) -> Result<Vec<Task>, AppError>;

    /// Update a task's title if it exists and is owned by `user`
    async fn update_task(
        &self,
        id: Uuid,
        user: Uuid,
        title: Option<String>,
    ) -> Result<Option<Task>, AppError>;

    /// Delete a task if it exists and is owned by `user`. Returns whether
    /// anything was deleted.
    async fn delete_task(&self, id: Uuid, user: Uuid) -> Result<bool, AppError>;
}

/// Index from unique fields to user identifiers, persisted alongside the
/// user records.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UserIndex {
    by_username: HashMap<String, Uuid>,
    by_email: HashMap<String, Uuid>,
}

/// Flat-file implementation of the Storage trait.
///
/// Layout: `users/<id>.json` per user, `users/index.json` for the unique
/// field index, `tasks/<user-id>.json` per owner. Keeping tasks keyed by
/// owner makes every read and write owner-scoped by construction.
#[derive(Clone)]
pub struct FlatFileStorage {
    root: PathBuf,
    // held in write mode across check-and-insert; the uniqueness guard
    index: Arc<RwLock<UserIndex>>,
    // serializes read-modify-write cycles on the per-owner task files
    task_lock: Arc<Mutex<()>>,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(root.join("users"))?;
        std::fs::create_dir_all(root.join("tasks"))?;

        let index_path = root.join("users").join("index.json");
        let index = if index_path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&index_path)?)?
        } else {
            UserIndex::default()
        };

        Ok(Self {
            root,
            index: Arc::new(RwLock::new(index)),
            task_lock: Arc::new(Mutex::new(())),
        })
    }

    fn user_path(&self, id: Uuid) -> PathBuf {
        self.root.join("users").join(format!("{id}.json"))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("users").join("index.json")
    }

    fn tasks_path(&self, user: Uuid) -> PathBuf {
        self.root.join("tasks").join(format!("{user}.json"))
    }

    async fn load_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let path = self.user_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = tokio_fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn load_tasks(&self, user: Uuid) -> Result<Vec<Task>, AppError> {
        let path = self.tasks_path(user);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = tokio_fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn store_tasks(&self, user: Uuid, tasks: &[Task]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(tasks)?;
        tokio_fs::write(self.tasks_path(user), json).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FlatFileStorage {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        // The write lock spans the check and the insert so two concurrent
        // sign-ups cannot both claim the same username or email.
        let mut index = self.index.write().await;

        if index.by_username.contains_key(&user.username)
            || index.by_email.contains_key(&user.email)
        {
            return Err(AppError::Conflict);
        }

        let record = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&record)?;
        tokio_fs::write(self.user_path(record.id), json).await?;

        index.by_username.insert(record.username.clone(), record.id);
        index.by_email.insert(record.email.clone(), record.id);

        let index_json = serde_json::to_string_pretty(&*index)?;
        tokio_fs::write(self.index_path(), index_json).await?;

        Ok(record)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let id = { self.index.read().await.by_email.get(email).copied() };

        match id {
            Some(id) => self.load_user(id).await,
            None => Ok(None),
        }
    }

    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let id = {
            let index = self.index.read().await;
            index
                .by_username
                .get(username)
                .copied()
                .or_else(|| index.by_email.get(email).copied())
        };

        match id {
            Some(id) => self.load_user(id).await,
            None => Ok(None),
        }
    }

    async fn insert_task(&self, task: &Task) -> Result<(), AppError> {
        let _guard = self.task_lock.lock().await;

        let mut tasks = self.load_tasks(task.user).await?;
        tasks.push(task.clone());
        self.store_tasks(task.user, &tasks).await
    }

    async fn tasks_for_user(&self, user: Uuid) -> Result<Vec<Task>, AppError> {
        self.load_tasks(user).await
    }

    async fn update_task(
        &self,
        id: Uuid,
        user: Uuid,
        title: Option<String>,
    ) -> Result<Option<Task>, AppError> {
        let _guard = self.task_lock.lock().await;

        let mut tasks = self.load_tasks(user).await?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(title) = title {
            task.title = title;
        }
        let updated = task.clone();

        self.store_tasks(user, &tasks).await?;
        Ok(Some(updated))
    }

    async fn delete_task(&self, id: Uuid, user: Uuid) -> Result<bool, AppError> {
        let _guard = self.task_lock.lock().await;

        let mut tasks = self.load_tasks(user).await?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        if tasks.len() == before {
            return Ok(false);
        }

        self.store_tasks(user, &tasks).await?;
        Ok(true)
    }
}
