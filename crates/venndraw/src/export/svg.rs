//! SVG output: the rendered document, serialized as is.

use svg::Document;

use crate::{export, request::ExportFormat};

/// Encodes the document as SVG text. Resolution does not apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgEncoder;

impl export::Encoder for SvgEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Svg
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>, export::Error> {
        Ok(document.to_string().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;
    use crate::export::Encoder;

    #[test]
    fn test_encode_serializes_document() {
        let document = Document::new()
            .set("viewBox", (0, 0, 10, 10))
            .add(Rectangle::new().set("width", 10).set("height", 10));
        let bytes = SvgEncoder.encode(&document).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("<svg"));
        assert!(text.contains("<rect"));
        assert_eq!(SvgEncoder.format(), ExportFormat::Svg);
    }
}
