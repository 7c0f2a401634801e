/// The kind of media attached to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    /// A JPEG image
    #[default]
    Image,
    /// An MP4 video
    Video,
}

impl MediaKind {
    /// The storage folder for this kind of media
    pub fn folder(&self) -> &'static str {
        match self {
            MediaKind::Image => "product_images",
            MediaKind::Video => "videos",
        }
    }

    /// The file extension for this kind of media
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
    }

    /// The MIME type for this kind of media
    pub fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/jpeg",
            MediaKind::Video => "video/mp4",
        }
    }
}

/// Raw media bytes awaiting upload
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    /// Whether the bytes encode an image or a video
    pub kind: MediaKind,
    /// The encoded media
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Wrap JPEG bytes
    pub fn image(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: MediaKind::Image,
            bytes: bytes.into(),
        }
    }

    /// Wrap MP4 bytes
    pub fn video(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: MediaKind::Video,
            bytes: bytes.into(),
        }
    }
}
