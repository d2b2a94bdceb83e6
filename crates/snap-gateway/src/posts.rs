//! Posts endpoints.

use async_trait::async_trait;
use reqwest::multipart::Form;
use snap_core::{Post, PostId};

use crate::client::{HealthStatus, HttpPostGateway, PostGateway};
use crate::error::GatewayError;
use crate::http::{check_response, decode_json};
use crate::upload::UploadPayload;

#[async_trait]
impl PostGateway for HttpPostGateway {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        let resp = self.http.get(self.url("/posts/")).send().await?;
        let posts: Vec<Post> = decode_json(resp).await?;
        tracing::debug!(count = posts.len(), "listed posts");
        Ok(posts)
    }

    async fn get(&self, id: PostId) -> Result<Post, GatewayError> {
        let resp = self.http.get(self.url(&format!("/posts/{id}"))).send().await?;
        decode_json(resp).await
    }

    async fn create(&self, payload: UploadPayload) -> Result<Post, GatewayError> {
        let form = payload.into_form()?;
        let resp = self
            .http
            .post(self.url("/posts/"))
            .multipart(form)
            .send()
            .await?;
        let post: Post = decode_json(resp).await?;
        tracing::info!(post_id = %post.id, "created post");
        Ok(post)
    }

    async fn update(&self, id: PostId, title: &str) -> Result<Post, GatewayError> {
        let form = Form::new().text("title", title.to_string());
        let resp = self
            .http
            .put(self.url(&format!("/posts/{id}")))
            .multipart(form)
            .send()
            .await?;
        decode_json(resp).await
    }

    async fn delete(&self, id: PostId) -> Result<(), GatewayError> {
        let resp = self
            .http
            .delete(self.url(&format!("/posts/{id}")))
            .send()
            .await?;
        // 200 carries a `{"message": ...}` body, 204 none; neither is needed.
        check_response(resp).await?;
        tracing::info!(post_id = %id, "deleted post");
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let resp = self.http.get(self.url("/")).send().await?;
        decode_json(resp).await
    }
}
