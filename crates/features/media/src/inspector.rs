use crate::error::{MediaError, MediaErrorExt};
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Analyses a stored upload; `Ok` means nothing suspicious was found.
///
/// `extension` is the lowercased extension validated on the client's file
/// name; the stored name may have lost it during sanitizing.
/// Model-backed detectors plug in here.
#[async_trait]
pub trait MediaInspector: Debug + Send + Sync {
    /// # Errors
    /// Any failure is reported to the client as a manipulation verdict.
    async fn inspect(&self, path: &Path, extension: &str) -> Result<(), MediaError>;
}

const HEADER_LEN: usize = 12;
const QUICKTIME_ATOMS: [&[u8; 4]; 6] = [b"moov", b"mdat", b"wide", b"free", b"skip", b"pnot"];

/// Checks that the file's magic bytes match its extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureInspector;

impl SignatureInspector {
    /// Whether `header` starts like a file of type `extension`.
    #[must_use]
    pub fn matches(extension: &str, header: &[u8]) -> bool {
        let at = |range: std::ops::Range<usize>| header.get(range);
        match extension {
            "jpg" | "jpeg" => header.starts_with(&[0xFF, 0xD8, 0xFF]),
            "png" => header.starts_with(b"\x89PNG\r\n\x1a\n"),
            "mp4" => at(4..8) == Some(&b"ftyp"[..]),
            "mov" => at(4..8).is_some_and(|atom| {
                atom == b"ftyp" || QUICKTIME_ATOMS.iter().any(|known| atom == *known)
            }),
            "avi" => header.starts_with(b"RIFF") && at(8..12) == Some(&b"AVI "[..]),
            _ => false,
        }
    }
}

#[async_trait]
impl MediaInspector for SignatureInspector {
    async fn inspect(&self, path: &Path, extension: &str) -> Result<(), MediaError> {
        let mut file = tokio::fs::File::open(path).await.context("Opening upload")?;
        let mut header = Vec::with_capacity(HEADER_LEN);
        file.take(HEADER_LEN as u64).read_to_end(&mut header).await.context("Reading upload header")?;

        if header.is_empty() {
            return Err(MediaError::Inspection { message: "file is empty".into(), context: None });
        }
        if !Self::matches(extension, &header) {
            return Err(MediaError::Inspection {
                message: format!("content does not look like a .{extension} file").into(),
                context: None,
            });
        }
        Ok(())
    }
}
