/// Shown in the admin notice when the submitter left the message blank.
pub const MESSAGE_PLACEHOLDER: &str = "No message added";

/// The inquiry payload as it arrives on the wire. Every field may be missing.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone)]
pub struct InquiryForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Text that is non-empty once surrounding whitespace is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn parse(field: &str, value: Option<String>) -> Result<Self, String> {
        let value = value.unwrap_or_default();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            Err(format!("{field} is required"))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequiredText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A validated inquiry. Only obtainable through `TryFrom<InquiryForm>`.
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub name: RequiredText,
    pub email: RequiredText,
    pub whatsapp: RequiredText,
    pub message: Option<String>,
}

impl Inquiry {
    pub fn message_or_placeholder(&self) -> &str {
        self.message.as_deref().unwrap_or(MESSAGE_PLACEHOLDER)
    }
}

impl TryFrom<InquiryForm> for Inquiry {
    type Error = String;

    fn try_from(value: InquiryForm) -> Result<Self, Self::Error> {
        let name = RequiredText::parse("name", value.name)?;
        let email = RequiredText::parse("email", value.email)?;
        let whatsapp = RequiredText::parse("whatsapp", value.whatsapp)?;
        let message = value
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Ok(Self {
            name,
            email,
            whatsapp,
            message,
        })
    }
}
