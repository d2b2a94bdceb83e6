#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use snap_auth::{AuthError, Credentials, IdentityProvider, SessionStore};
use snap_client::{Confirm, ConfirmPrompt, PostFeed};
use snap_core::{Draft, Identity, Post, PostId};
use snap_gateway::{
    DirectFileReader, GatewayError, HealthStatus, PostGateway, UploadPayload, UploadPipeline,
};
use tokio::sync::Notify;

#[derive(Default)]
pub struct Calls {
    pub list: AtomicUsize,
    pub create: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        [&self.list, &self.create, &self.update, &self.delete]
            .iter()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    pub fn mutations(&self) -> usize {
        self.create.load(Ordering::SeqCst)
            + self.update.load(Ordering::SeqCst)
            + self.delete.load(Ordering::SeqCst)
    }
}

/// In-memory posts service. Newest first, like the real one.
#[derive(Default)]
pub struct FakeGateway {
    pub posts: Mutex<Vec<Post>>,
    pub calls: Calls,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_list: AtomicBool,
    /// When set, `update` waits for a notification before answering.
    pub hold_update: Mutex<Option<Arc<Notify>>>,
    /// Each `list` call takes the next hold, if any, and waits on it after
    /// reading the server state.
    pub hold_list: Mutex<VecDeque<Arc<Notify>>>,
    next_id: AtomicI64,
}

pub fn post(id: i64, title: &str, owner: &str) -> Post {
    Post {
        id: PostId(id),
        title: title.into(),
        image_url: format!("http://img.test/{id}.jpg"),
        owner_uid: owner.into(),
        created_at: None,
    }
}

impl FakeGateway {
    pub fn with_posts(posts: Vec<Post>) -> Arc<Self> {
        let max = posts.iter().map(|p| p.id.0).max().unwrap_or(0);
        let gw = Self::default();
        gw.next_id.store(max, Ordering::SeqCst);
        *gw.posts.lock() = posts;
        Arc::new(gw)
    }

    pub fn server_titles(&self) -> Vec<String> {
        self.posts.lock().iter().map(|p| p.title.clone()).collect()
    }

    fn boom() -> GatewayError {
        GatewayError::Server {
            status: 500,
            message: "boom".into(),
        }
    }

    fn not_found() -> GatewayError {
        GatewayError::Server {
            status: 404,
            message: "Post not found".into(),
        }
    }
}

#[async_trait]
impl PostGateway for FakeGateway {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::boom());
        }
        let snapshot = self.posts.lock().clone();
        let hold = self.hold_list.lock().pop_front();
        if let Some(hold) = hold {
            hold.notified().await;
        }
        Ok(snapshot)
    }

    async fn get(&self, id: PostId) -> Result<Post, GatewayError> {
        self.posts
            .lock()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create(&self, payload: UploadPayload) -> Result<Post, GatewayError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Post {
            id: PostId(id),
            title: payload.title,
            image_url: format!("http://img.test/{}", payload.file.file_name),
            owner_uid: payload.user_uid,
            created_at: None,
        };
        self.posts.lock().insert(0, created.clone());
        Ok(created)
    }

    async fn update(&self, id: PostId, title: &str) -> Result<Post, GatewayError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        let hold = self.hold_update.lock().clone();
        if let Some(hold) = hold {
            hold.notified().await;
        }
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::boom());
        }
        let mut posts = self.posts.lock();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;
        post.title = title.to_string();
        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> Result<(), GatewayError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::boom());
        }
        self.posts.lock().retain(|p| p.id != id);
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        Ok(HealthStatus {
            status: "ok".into(),
        })
    }
}

/// Identity provider whose uids are the email local part.
#[derive(Default)]
pub struct FakeProvider {
    pub restored: Option<Identity>,
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn restore(&self) -> Result<Option<Identity>, AuthError> {
        Ok(self.restored.clone())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let uid = credentials.email().split('@').next().unwrap_or_default();
        Ok(Identity::new(uid, Some(credentials.email().to_string())))
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        self.sign_in(credentials).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

pub async fn session_for(uid: Option<&str>) -> SessionStore {
    let provider = FakeProvider {
        restored: uid.map(|uid| Identity::new(uid, Some(format!("{uid}@example.com")))),
    };
    let store = SessionStore::new(Arc::new(provider));
    store.initialize(Duration::from_secs(1)).await;
    store
}

pub fn creds(uid: &str) -> Credentials {
    Credentials::new(&format!("{uid}@example.com"), "secret1").unwrap()
}

pub fn feed(gateway: &Arc<FakeGateway>, session: &SessionStore) -> PostFeed {
    let pipeline = UploadPipeline::new(Arc::new(DirectFileReader), 1024 * 1024);
    PostFeed::new(gateway.clone(), pipeline, session.reader())
}

pub fn image_draft(dir: &Path, title: &str) -> Draft {
    let path = dir.join("snap.jpg");
    std::fs::write(&path, b"jpeg-bytes").unwrap();
    Draft::new(title, Some(path.display().to_string()))
}

/// Confirmation dialog with a fixed answer.
#[derive(Default)]
pub struct Answer {
    pub accept: bool,
    pub prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl Answer {
    pub fn yes() -> Self {
        Self {
            accept: true,
            ..Self::default()
        }
    }

    pub fn no() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Confirm for Answer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.lock().push(prompt.clone());
        self.accept
    }
}
