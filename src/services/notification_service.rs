//! 邮件通知服务 - 业务能力层
//!
//! 只负责"给一组收件人发同一封邮件"

use crate::clients::{MailApi, SendGridClient};
use crate::config::NotificationConfig;
use crate::error::{AppResult, ValidationError};
use crate::models::{MailAddress, MailMessage};
use std::sync::Arc;
use tracing::{debug, warn};

/// SendGrid 接受邮件时返回的状态码
const ACCEPTED: u16 = 202;

/// 通知发送结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationReport {
    /// 发送成功的收件人邮箱
    pub delivered: Vec<String>,
    /// 发送失败的收件人
    pub failed: Vec<MailAddress>,
}

impl NotificationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 邮件通知服务
pub struct NotificationService {
    client: Arc<dyn MailApi>,
    sender_email: String,
}

impl NotificationService {
    /// 使用显式配置创建通知服务（SendGrid）
    pub fn new(config: &NotificationConfig) -> AppResult<Self> {
        let client = SendGridClient::new(config)?;
        Ok(Self::with_client(Arc::new(client), &config.sender_email))
    }

    /// 使用任意邮件发送实现创建通知服务
    pub fn with_client(client: Arc<dyn MailApi>, sender_email: impl Into<String>) -> Self {
        Self {
            client,
            sender_email: sender_email.into(),
        }
    }

    /// 给每个收件人单独发送一封邮件
    ///
    /// # 参数
    /// - `sender_name`: 发件人显示名称
    /// - `receiver_names` / `receiver_emails`: 收件人姓名与邮箱，一一对应
    /// - `subject`: 主题
    /// - `body`: 纯文本正文
    /// - `html_body`: 可选的 HTML 正文
    ///
    /// # 返回
    /// 姓名与邮箱数量不一致时返回参数错误（不会发送任何邮件）；
    /// 否则返回每个收件人的发送结果，失败的收件人会记录警告日志
    pub async fn send_notification(
        &self,
        sender_name: &str,
        receiver_names: &[String],
        receiver_emails: &[String],
        subject: &str,
        body: &str,
        html_body: Option<&str>,
    ) -> AppResult<NotificationReport> {
        if receiver_names.len() != receiver_emails.len() {
            return Err(ValidationError::RecipientMismatch {
                names: receiver_names.len(),
                emails: receiver_emails.len(),
            }
            .into());
        }

        let from = MailAddress::new(&self.sender_email, sender_name);
        let mut report = NotificationReport::default();

        for (name, email) in receiver_names.iter().zip(receiver_emails) {
            let to = MailAddress::new(email, name);
            let message = MailMessage::single(from.clone(), to.clone(), subject, body, html_body);

            match self.client.send(&message).await {
                Ok(ACCEPTED) => {
                    debug!("邮件已发送: {}", email);
                    report.delivered.push(email.clone());
                }
                Ok(status) => {
                    debug!("邮件发送被拒绝: {} (status {})", email, status);
                    report.failed.push(to);
                }
                Err(e) => {
                    debug!("邮件发送失败: {} ({})", email, e);
                    report.failed.push(to);
                }
            }
        }

        if !report.failed.is_empty() {
            let failures = report
                .failed
                .iter()
                .map(|to| format!("{}:{}", to.name.as_deref().unwrap_or_default(), to.email))
                .collect::<Vec<_>>()
                .join("\n");
            warn!("Failed to send message to some receivers: {}", failures);
        }

        Ok(report)
    }
}
