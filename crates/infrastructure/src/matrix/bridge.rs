use std::time::Duration;

use application::{BridgeError, FederationBridge};
use async_trait::async_trait;
use config::MatrixConfig;
use domain::{AvatarFile, AvatarMetadata, ContentUrl, ExternalId};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Matrix 桥接配置
#[derive(Debug, Clone)]
pub struct MatrixBridgeConfig {
    pub homeserver_url: String,
    pub access_token: String,
    pub request_timeout: Duration,
    /// 输入状态在 homeserver 上的保持时长
    pub typing_timeout: Duration,
}

impl From<&MatrixConfig> for MatrixBridgeConfig {
    fn from(config: &MatrixConfig) -> Self {
        Self {
            homeserver_url: config.homeserver_url.clone(),
            access_token: config.access_token.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
            typing_timeout: Duration::from_millis(config.typing_timeout_ms),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    content_uri: Option<String>,
}

#[derive(Debug, Serialize)]
struct AvatarUrlBody<'a> {
    avatar_url: &'a str,
}

#[derive(Debug, Serialize)]
struct TypingBody {
    typing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

/// 基于 Matrix client-server API 的联邦桥接
pub struct MatrixBridge {
    client: Client,
    base_url: Url,
    access_token: String,
    typing_timeout_ms: u64,
}

impl MatrixBridge {
    pub fn new(config: MatrixBridgeConfig) -> Result<Self, BridgeError> {
        let base_url = Url::parse(&config.homeserver_url).map_err(|e| {
            BridgeError::unavailable(format!(
                "invalid homeserver url {}: {e}",
                config.homeserver_url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BridgeError::unavailable(format!(
                "homeserver url {} cannot be used as a base",
                config.homeserver_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BridgeError::unavailable(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token,
            typing_timeout_ms: u64::try_from(config.typing_timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// 拼接 API 路径；`user_id` 用于应用服务代表该用户发起请求
    fn endpoint(&self, segments: &[&str], user_id: Option<&ExternalId>) -> Result<Url, BridgeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BridgeError::unavailable("homeserver url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        if let Some(user_id) = user_id {
            url.query_pairs_mut().append_pair("user_id", user_id.as_str());
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response, BridgeError> {
        request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| BridgeError::unavailable(format!("{operation}: {e}")))
    }

    async fn ensure_success(response: Response, operation: &str) -> Result<(), BridgeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(BridgeError::unavailable(format!(
            "{operation} failed with status {status}: {body}"
        )))
    }
}

#[async_trait]
impl FederationBridge for MatrixBridge {
    async fn upload_content(
        &self,
        file: &AvatarFile,
        metadata: &AvatarMetadata,
    ) -> Result<Option<ContentUrl>, BridgeError> {
        let mut url = self.endpoint(&["_matrix", "media", "v3", "upload"], None)?;
        url.query_pairs_mut()
            .append_pair("filename", metadata.file_name());

        let request = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, metadata.content_type())
            .body(file.as_bytes().to_vec());
        let response = self.send(request, "upload_content").await?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(BridgeError::unavailable(format!(
                "upload_content failed with status {status}"
            )));
        }
        if !status.is_success() {
            warn!(
                status = %status,
                file_name = metadata.file_name(),
                "homeserver rejected avatar upload"
            );
            return Ok(None);
        }

        // 2xx 但拿不到地址属于协议错误，不是拒绝
        let body = response.json::<UploadResponse>().await.map_err(|e| {
            BridgeError::unavailable(format!("upload_content returned an unreadable body: {e}"))
        })?;
        let url = body
            .content_uri
            .and_then(|uri| ContentUrl::parse(uri).ok())
            .ok_or_else(|| {
                BridgeError::unavailable("upload_content response has no content_uri")
            })?;
        debug!(url = %url, file_name = metadata.file_name(), size = file.len(), "avatar uploaded");
        Ok(Some(url))
    }

    async fn set_remote_avatar(
        &self,
        external_user_id: &ExternalId,
        url: &ContentUrl,
    ) -> Result<(), BridgeError> {
        let endpoint = self.endpoint(
            &[
                "_matrix",
                "client",
                "v3",
                "profile",
                external_user_id.as_str(),
                "avatar_url",
            ],
            Some(external_user_id),
        )?;
        let request = self.client.put(endpoint).json(&AvatarUrlBody {
            avatar_url: url.as_str(),
        });
        let response = self.send(request, "set_remote_avatar").await?;
        Self::ensure_success(response, "set_remote_avatar").await
    }

    async fn notify_typing(
        &self,
        external_room_id: &ExternalId,
        external_user_id: &ExternalId,
        is_typing: bool,
    ) -> Result<(), BridgeError> {
        let endpoint = self.endpoint(
            &[
                "_matrix",
                "client",
                "v3",
                "rooms",
                external_room_id.as_str(),
                "typing",
                external_user_id.as_str(),
            ],
            Some(external_user_id),
        )?;
        let body = TypingBody {
            typing: is_typing,
            timeout: is_typing.then_some(self.typing_timeout_ms),
        };
        let response = self
            .send(self.client.put(endpoint).json(&body), "notify_typing")
            .await?;
        Self::ensure_success(response, "notify_typing").await
    }
}
