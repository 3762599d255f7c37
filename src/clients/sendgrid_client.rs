/// SendGrid 邮件 API 客户端
///
/// 封装 v3 `mail/send` 调用
use crate::config::NotificationConfig;
use crate::error::{AppError, AppResult};
use crate::models::MailMessage;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use std::time::Duration;
use tracing::debug;

/// 邮件发送能力
///
/// 通知服务只依赖这个 trait，测试时可以替换为内存实现。
#[async_trait]
pub trait MailApi: Send + Sync {
    /// 发送一封邮件，返回 HTTP 状态码
    async fn send(&self, message: &MailMessage) -> AppResult<u16>;
}

/// SendGrid 客户端
pub struct SendGridClient {
    http: reqwest::Client,
    api_base_url: String,
    api_key: String,
}

impl SendGridClient {
    /// 创建新的 SendGrid 客户端
    pub fn new(config: &NotificationConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(&config.api_base_url, e))?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn mail_send_request(&self, message: &MailMessage) -> RequestBuilder {
        self.http
            .post(format!("{}/v3/mail/send", self.api_base_url))
            .bearer_auth(&self.api_key)
            .json(message)
    }
}

#[async_trait]
impl MailApi for SendGridClient {
    /// 发送一封邮件
    ///
    /// # 返回
    /// 返回 HTTP 状态码；只有网络层失败才返回错误，是否成功由调用方判断
    async fn send(&self, message: &MailMessage) -> AppResult<u16> {
        debug!("调用 SendGrid API，主题: {}", message.subject);

        let response = self
            .mail_send_request(message)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed("v3/mail/send", e))?;

        let status = response.status().as_u16();
        debug!("SendGrid 返回状态: {}", status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MailAddress;

    #[test]
    fn mail_request_carries_key_and_body() {
        let client = SendGridClient::new(&NotificationConfig {
            api_key: "SG.key".to_string(),
            sender_email: "lrma@example.org".to_string(),
            api_base_url: "https://api.sendgrid.com/".to_string(),
            timeout_secs: 30,
        })
        .unwrap();
        let message = MailMessage::single(
            MailAddress::new("lrma@example.org", "LRMA bot"),
            MailAddress::new("sh@example.org", "Steve"),
            "subject",
            "body",
            None,
        );

        let request = client.mail_send_request(&message).build().unwrap();

        assert_eq!(request.url().as_str(), "https://api.sendgrid.com/v3/mail/send");
        assert_eq!(request.headers()["authorization"], "Bearer SG.key");
        let body: serde_json::Value =
            serde_json::from_slice(request.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(body["subject"], "subject");
    }
}
