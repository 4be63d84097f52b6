use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use quiz_core::model::QuestionId;

use crate::error::GatewayError;
use crate::gateway::{
    AuthReply, BearerSlot, LoginBody, QuestionGateway, QuestionPayload, QuestionRecord,
    QuestionsEnvelope, RegisterBody,
};

/// `reqwest`-backed implementation of the API contract.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    bearer: BearerSlot,
}

impl HttpGateway {
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer: BearerSlot) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            bearer,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            log::warn!("api call failed with status {status}");
            Err(GatewayError::HttpStatus(status))
        }
    }
}

#[async_trait]
impl QuestionGateway for HttpGateway {
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, GatewayError> {
        let response = self
            .authorized(self.client.get(self.url("/api/questions")))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("question fetch failed with status {status}");
            return Err(GatewayError::HttpStatus(status));
        }
        let envelope: QuestionsEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    async fn create_question(&self, payload: &QuestionPayload) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.post(self.url("/api/questions")).json(payload))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn update_question(
        &self,
        id: &QuestionId,
        payload: &QuestionPayload,
    ) -> Result<(), GatewayError> {
        let url = self.url(&format!("/api/questions/{id}"));
        let response = self
            .authorized(self.client.put(url).json(payload))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<(), GatewayError> {
        let url = self.url(&format!("/api/questions/{id}"));
        let response = self.authorized(self.client.delete(url)).send().await?;
        Self::expect_success(response).await
    }

    async fn login(&self, body: &LoginBody) -> Result<AuthReply, GatewayError> {
        // The auth endpoints put rejections in the body (`success: false`),
        // so the status code is not checked here.
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(body)
            .send()
            .await?;
        Ok(response.json().await?)
    }

    async fn register(&self, body: &RegisterBody) -> Result<AuthReply, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(body)
            .send()
            .await?;
        Ok(response.json().await?)
    }
}
