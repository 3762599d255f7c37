use serde::Serialize;

/// 邮件地址（带显示名称）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MailAddress {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Personalization {
    pub to: Vec<MailAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub value: String,
}

/// SendGrid v3 `mail/send` 请求体，一封邮件一个收件人
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailMessage {
    pub personalizations: Vec<Personalization>,
    pub from: MailAddress,
    pub subject: String,
    pub content: Vec<MailContent>,
}

impl MailMessage {
    /// 构建单收件人邮件
    ///
    /// 纯文本正文必填，HTML 正文可选（顺序必须是 text/plain 在前），空 HTML 视为没有。
    pub fn single(
        from: MailAddress,
        to: MailAddress,
        subject: &str,
        body: &str,
        html_body: Option<&str>,
    ) -> Self {
        let mut content = vec![MailContent {
            content_type: "text/plain",
            value: body.to_string(),
        }];
        if let Some(html) = html_body.filter(|h| !h.is_empty()) {
            content.push(MailContent {
                content_type: "text/html",
                value: html.to_string(),
            });
        }

        Self {
            personalizations: vec![Personalization { to: vec![to] }],
            from,
            subject: subject.to_string(),
            content,
        }
    }
}
