//! Content-type sniffing from leading file bytes
//!
//! Client-supplied names and declared types are never consulted. Image
//! formats are recognised by their magic numbers; a few common non-image
//! signatures are named so logs stay readable.

pub const IMAGE_MIME_PREFIX: &str = "image/";

const OCTET_STREAM: &str = "application/octet-stream";

/// MIME type of the content starting with `header`.
pub fn sniff_mime_type(header: &[u8]) -> &'static str {
    if header.is_empty() {
        return "application/x-empty";
    }

    if let Ok(format) = image::guess_format(header) {
        return format.to_mime_type();
    }

    if header.starts_with(b"%PDF-") {
        return "application/pdf";
    }
    if header.starts_with(b"PK\x03\x04") {
        return "application/zip";
    }
    if header.starts_with(&[0x1f, 0x8b]) {
        return "application/gzip";
    }

    if looks_like_text(header) {
        let text = String::from_utf8_lossy(header);
        if is_svg(&text) {
            return "image/svg+xml";
        }
        return "text/plain";
    }

    OCTET_STREAM
}

/// Whether a sniffed type belongs to the image category.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .get(..IMAGE_MIME_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MIME_PREFIX))
}

fn looks_like_text(header: &[u8]) -> bool {
    if header.contains(&0) {
        return false;
    }
    match std::str::from_utf8(header) {
        Ok(_) => true,
        // A multi-byte character cut off by the header limit is still text
        Err(e) => e.error_len().is_none(),
    }
}

fn is_svg(text: &str) -> bool {
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    let lower = trimmed.to_lowercase();
    lower.starts_with("<svg") || (lower.starts_with("<?xml") && lower.contains("<svg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::new(4, 3);
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    #[test]
    fn test_sniff_raster_images() {
        assert_eq!(sniff_mime_type(&encode(ImageFormat::Png)), "image/png");
        assert_eq!(sniff_mime_type(&encode(ImageFormat::Jpeg)), "image/jpeg");
        assert_eq!(sniff_mime_type(&encode(ImageFormat::Bmp)), "image/bmp");
    }

    #[test]
    fn test_sniff_ignores_nothing_but_bytes() {
        // A PNG header is an image regardless of what the client called it
        let png = encode(ImageFormat::Png);
        assert!(is_image_mime(sniff_mime_type(&png[..16])));
    }

    #[test]
    fn test_sniff_documents() {
        assert_eq!(sniff_mime_type(b"%PDF-1.7\n%\xe2\xe3"), "application/pdf");
        assert_eq!(sniff_mime_type(b"PK\x03\x04\x14\x00"), "application/zip");
        assert_eq!(sniff_mime_type(&[0x1f, 0x8b, 0x08, 0x00]), "application/gzip");
    }

    #[test]
    fn test_sniff_text_and_svg() {
        assert_eq!(sniff_mime_type(b"hello, world\n"), "text/plain");
        assert_eq!(
            sniff_mime_type(b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\"/>"),
            "image/svg+xml"
        );
        assert_eq!(
            sniff_mime_type(b"<?xml version=\"1.0\"?>\n<svg viewBox=\"0 0 1 1\"></svg>"),
            "image/svg+xml"
        );
        assert_eq!(sniff_mime_type(b"<?xml version=\"1.0\"?><feed/>"), "text/plain");
    }

    #[test]
    fn test_sniff_truncated_utf8_is_text() {
        let mut header = "caf\u{e9} ".repeat(3).into_bytes();
        header.push(0xc3);
        assert_eq!(sniff_mime_type(&header), "text/plain");
    }

    #[test]
    fn test_sniff_binary_and_empty() {
        assert_eq!(sniff_mime_type(&[0x00, 0xff, 0x13, 0x37]), "application/octet-stream");
        assert_eq!(sniff_mime_type(b""), "application/x-empty");
    }

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/JPEG"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("imag"));
        assert!(!is_image_mime("text/image/png"));
    }
}
