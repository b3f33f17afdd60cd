//! Picture format types for slide media.

/// Picture format types embeddable in a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Png,
    Jpeg,
    Emf,
}

impl PictureFormat {
    /// Get the MIME type for this picture format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Emf => "image/x-emf",
        }
    }

    /// Get the file extension for this picture format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Emf => "emf",
        }
    }

    /// Detect picture format from bytes (magic number detection).
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // EMF: record type 1 at offset 0, " EMF" signature at offset 40
        if bytes.len() >= 44
            && bytes.starts_with(&[0x01, 0x00, 0x00, 0x00])
            && bytes[40..44] == [0x20, 0x45, 0x4D, 0x46]
        {
            return Some(Self::Emf);
        }

        None
    }
}
