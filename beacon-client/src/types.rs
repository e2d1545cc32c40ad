use mime::Mime;

/// One named section of a `multipart/form-data` body.
///
/// The content is owned by the part once constructed; text is stored as its
/// UTF-8 bytes, binary content is carried through untouched.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<Mime>,
    pub body: Vec<u8>,
}

impl Part {
    /// A plain text part. No `Content-Type` line is emitted for it.
    pub fn text<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Part {
            name: name.into(),
            filename: None,
            content_type: None,
            body: value.into().into_bytes(),
        }
    }

    /// A binary part carrying a filename and an explicit content type.
    pub fn binary<N, F>(name: N, body: Vec<u8>, filename: F, content_type: Mime) -> Self
    where
        N: Into<String>,
        F: Into<String>,
    {
        Part {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type),
            body,
        }
    }
}
