use crate::config::ClientConfig;
use crate::errors::AppError;
use crate::machine::ItemRef;
use crate::models::{
    Ack, ApprovalKey, ApprovalList, ChecklistSnapshot, ChildToday, ChildrenOverview, CurrentUser,
    Decision, DecisionBody, History, InviteCode, NewExtra, NewTask, Submission, TaskKeyBody,
    TaskList, ToggleTask, WeeklyReport,
};
use reqwest::{
    Client, RequestBuilder, Url,
    header::AUTHORIZATION,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use std::{path::Path, time::Instant};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    authorization: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AppError::transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            authorization: config.authorization(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.http.get(self.url(path));
        self.send("GET", path, request).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.http.post(self.url(path));
        self.send("POST", path, request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.send("POST", path, request).await
    }

    pub async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        proof: ProofFile,
    ) -> Result<T, AppError> {
        let part = Part::bytes(proof.bytes)
            .file_name(proof.file_name)
            .mime_str(&proof.content_type)
            .map_err(AppError::transport)?;
        let request = self
            .http
            .post(self.url(path))
            .multipart(Form::new().part("file", part));
        self.send("POST", path, request).await
    }

    /// Where a proof photo/video can be fetched from.
    pub fn media_url(&self, media_ref: &str) -> Option<String> {
        if media_ref.is_empty() {
            return None;
        }
        if media_ref.starts_with("uploads/") {
            return Some(format!("{}/{}", self.base_url, media_ref));
        }

        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["api", "media", media_ref]);
        Some(url.to_string())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let started = Instant::now();
        let response = request
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(|err| {
                warn!(method, path, "request failed: {err}");
                AppError::transport(err)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(AppError::transport)?;
        debug!(
            method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api response"
        );

        if !status.is_success() {
            let err = AppError::from_response(status, &body);
            warn!(method, path, status = status.as_u16(), "api error: {err}");
            return Err(err);
        }

        serde_json::from_slice(&body).map_err(AppError::decode)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ApiClient {
    pub async fn me(&self) -> Result<CurrentUser, AppError> {
        self.get("/api/me").await
    }

    pub async fn checklist(&self) -> Result<ChecklistSnapshot, AppError> {
        self.get("/api/checklist").await
    }

    pub async fn complete(&self, item: &ItemRef, proof: ProofFile) -> Result<Submission, AppError> {
        self.post_file(&item.complete_path(), proof).await
    }

    pub async fn uncomplete(&self, item: &ItemRef) -> Result<Ack, AppError> {
        self.post(&item.uncomplete_path()).await
    }

    pub async fn approvals(&self) -> Result<ApprovalList, AppError> {
        self.get("/api/approvals").await
    }

    pub async fn decide(&self, key: ApprovalKey, decision: Decision) -> Result<Ack, AppError> {
        let path = format!("/api/approvals/{}/{}", key.id, decision.as_str());
        self.post_json(&path, &DecisionBody { kind: key.kind }).await
    }

    pub async fn children(&self) -> Result<ChildrenOverview, AppError> {
        self.get("/api/children").await
    }

    pub async fn child_today(&self, child_id: i64) -> Result<ChildToday, AppError> {
        self.get(&format!("/api/today/{child_id}")).await
    }

    pub async fn report(&self, child_id: i64) -> Result<WeeklyReport, AppError> {
        self.get(&format!("/api/report/{child_id}")).await
    }

    pub async fn history(&self, child_id: i64) -> Result<History, AppError> {
        self.get(&format!("/api/history/{child_id}")).await
    }

    pub async fn tasks(&self, child_id: i64) -> Result<TaskList, AppError> {
        self.get(&format!("/api/tasks/{child_id}")).await
    }

    pub async fn toggle_task(&self, child_id: i64, key: &str, enabled: bool) -> Result<Ack, AppError> {
        let body = ToggleTask {
            task_key: key,
            enabled,
        };
        self.post_json(&format!("/api/tasks/{child_id}/toggle"), &body)
            .await
    }

    pub async fn add_task(&self, child_id: i64, label: &str) -> Result<Ack, AppError> {
        self.post_json(&format!("/api/tasks/{child_id}/add"), &NewTask { label })
            .await
    }

    pub async fn delete_task(&self, child_id: i64, key: &str) -> Result<Ack, AppError> {
        self.post_json(
            &format!("/api/tasks/{child_id}/delete"),
            &TaskKeyBody { task_key: key },
        )
        .await
    }

    pub async fn reset_tasks(&self, child_id: i64) -> Result<Ack, AppError> {
        self.post(&format!("/api/tasks/{child_id}/reset")).await
    }

    pub async fn create_extra(&self, child_id: i64, title: &str, points: u32) -> Result<Ack, AppError> {
        let body = NewExtra {
            child_id,
            title,
            points,
        };
        self.post_json("/api/extras", &body).await
    }

    pub async fn invite(&self) -> Result<InviteCode, AppError> {
        self.get("/api/invite").await
    }

    pub async fn reset_family(&self) -> Result<Ack, AppError> {
        self.post("/api/family/reset").await
    }
}

#[derive(Debug, Clone)]
pub struct ProofFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ProofFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "proof".to_string());
        Ok(Self::new(file_name, content_type_for(path), bytes))
    }

    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "heic" => "image/heic",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig::new(base, "token")).unwrap()
    }

    #[test]
    fn uploads_are_served_from_base_path() {
        let api = client("http://host/alanbot");
        assert_eq!(
            api.media_url("uploads/2026-01-05/a.jpg").as_deref(),
            Some("http://host/alanbot/uploads/2026-01-05/a.jpg")
        );
    }

    #[test]
    fn remote_media_goes_through_proxy_encoded() {
        let api = client("http://host");
        assert_eq!(
            api.media_url("AgAC/x y").as_deref(),
            Some("http://host/api/media/AgAC%2Fx%20y")
        );
        assert_eq!(api.media_url(""), None);
    }

    #[test]
    fn proof_content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("a/b/clip.MOV")), "video/quicktime");
        assert_eq!(content_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("notes")), "application/octet-stream");
        assert!(ProofFile::new("c.mp4", "video/mp4", vec![]).is_video());
    }
}
