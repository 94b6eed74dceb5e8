use std::path::Path;

use anyhow::{bail, Context};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Read an image file into the data URI the backend stores.
pub async fn data_uri(path: &Path) -> anyhow::Result<String> {
    let mime = mime_type(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(encode(&bytes, mime))
}

fn encode(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn mime_type(path: &Path) -> anyhow::Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let mime = match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => bail!("{} is not a supported image type", path.display()),
    };
    Ok(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_type(Path::new("mojito.PNG")).unwrap(), "image/png");
        assert_eq!(mime_type(Path::new("a/b/negroni.jpeg")).unwrap(), "image/jpeg");
        assert!(mime_type(Path::new("notes.txt")).is_err());
        assert!(mime_type(Path::new("no_extension")).is_err());
    }

    #[test]
    fn encodes_as_data_uri() {
        assert_eq!(encode(b"hi", "image/gif"), "data:image/gif;base64,aGk=");
    }
}
