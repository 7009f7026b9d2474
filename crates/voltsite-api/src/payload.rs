//! Write payloads: mutations and their field sets.

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

/// A write operation against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// POST a new resource to the collection.
    Create,
    /// PATCH an existing resource by id.
    Update(u64),
    /// DELETE an existing resource by id.
    Delete(u64),
    /// POST a job application (multipart, carries the `career` field).
    Apply,
    /// POST a contact inquiry.
    Inquire,
}

/// A binary field attached to a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name, used for the multipart part and for
    /// extension-based validation.
    pub file_name: String,
    /// MIME type sent with the part.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create an attachment.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Lowercased file extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_lowercase())
        }
    }

    /// Size of the file contents in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// One payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldValue {
    Text(String),
    File(Attachment),
}

/// Ordered field set for a write request.
///
/// Encoded as JSON when every field is text, and as multipart form data as
/// soon as a binary field is present. The switch is transparent to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, FieldValue)>,
}

impl Payload {
    /// Create an empty payload.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a text field (builder style).
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    /// Add a binary field (builder style).
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.push_file(name, attachment);
        self
    }

    /// Add a text field in place.
    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .push((name.into(), FieldValue::Text(value.into())));
    }

    /// Add a binary field in place.
    pub fn push_file(&mut self, name: impl Into<String>, attachment: Attachment) {
        self.fields
            .push((name.into(), FieldValue::File(attachment)));
    }

    /// Whether the payload must be encoded as multipart form data.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.fields
            .iter()
            .any(|(_, value)| matches!(value, FieldValue::File(_)))
    }

    /// Whether the payload carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of a text field, if present.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(field, value)| {
            if field == name
                && let FieldValue::Text(text) = value
            {
                Some(text.as_str())
            } else {
                None
            }
        })
    }

    /// Encode as a JSON object. Binary fields are not representable here;
    /// callers check [`Self::is_multipart`] first.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.fields {
            if let FieldValue::Text(text) = value {
                object.insert(name.clone(), Value::String(text.clone()));
            }
        }
        Value::Object(object)
    }

    /// Encode as a multipart form.
    #[must_use]
    pub fn to_form(&self) -> Form {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = match value {
                FieldValue::Text(text) => form.text(name.clone(), text.clone()),
                FieldValue::File(attachment) => {
                    let part = Part::bytes(attachment.bytes.clone())
                        .file_name(attachment.file_name.clone());
                    let part = part
                        .mime_str(&attachment.content_type)
                        .unwrap_or_else(|_| {
                            Part::bytes(attachment.bytes.clone())
                                .file_name(attachment.file_name.clone())
                        });
                    form.part(name.clone(), part)
                }
            };
        }
        form
    }
}
