//! Line-oriented writer for metadata documents

use quick_xml::escape::escape;

/// XML declaration line
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Namespace carried by the root element
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

const INDENT: &str = "    ";

/// Builds one metadata document line by line
///
/// Value-bearing elements are always written on a single line. Empty text
/// values never produce an element.
pub(crate) struct MetadataWriter {
    root: &'static str,
    lines: Vec<String>,
    depth: usize,
}

impl MetadataWriter {
    /// Start a document with the given root element
    pub fn new(root: &'static str) -> Self {
        Self {
            root,
            lines: vec![
                XML_DECLARATION.to_string(),
                format!(r#"<{} xmlns="{}">"#, root, METADATA_NAMESPACE),
            ],
            depth: 1,
        }
    }

    /// Escaped text element, suppressed when the value is empty
    pub fn text(&mut self, tag: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.element(tag, &escape(value));
    }

    /// Optional escaped text element
    pub fn opt_text(&mut self, tag: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.text(tag, value);
        }
    }

    /// `true`/`false` element
    pub fn boolean(&mut self, tag: &str, value: bool) {
        self.element(tag, if value { "true" } else { "false" });
    }

    /// Integer element
    pub fn number(&mut self, tag: &str, value: u32) {
        self.element(tag, &value.to_string());
    }

    /// Element whose value is a fixed keyword that needs no escaping
    pub fn keyword(&mut self, tag: &str, value: &'static str) {
        self.element(tag, value);
    }

    /// Open a nested element
    pub fn open(&mut self, tag: &str) {
        let line = format!("{}<{}>", self.indent(), tag);
        self.lines.push(line);
        self.depth += 1;
    }

    /// Close the innermost nested element
    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        let line = format!("{}</{}>", self.indent(), tag);
        self.lines.push(line);
    }

    /// Close the root and return the document
    pub fn finish(mut self) -> String {
        self.lines.push(format!("</{}>", self.root));
        self.lines.join("\n")
    }

    fn element(&mut self, tag: &str, body: &str) {
        let line = format!("{}<{}>{}</{}>", self.indent(), tag, body, tag);
        self.lines.push(line);
    }

    fn indent(&self) -> String {
        INDENT.repeat(self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let writer = MetadataWriter::new("CustomField");
        assert_eq!(
            writer.finish(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <CustomField xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n\
             </CustomField>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let mut writer = MetadataWriter::new("CustomField");
        writer.text("label", r#"R&D <"Lab"> 'A'"#);
        let doc = writer.finish();
        assert!(doc.contains("    <label>R&amp;D &lt;&quot;Lab&quot;&gt; &apos;A&apos;</label>"));
    }

    #[test]
    fn test_empty_text_is_suppressed() {
        let mut writer = MetadataWriter::new("CustomField");
        writer.text("label", "");
        writer.opt_text("inlineHelpText", None);
        assert!(!writer.finish().contains("label"));
    }

    #[test]
    fn test_nesting_indents() {
        let mut writer = MetadataWriter::new("CustomField");
        writer.open("valueSet");
        writer.boolean("restricted", true);
        writer.close("valueSet");
        let doc = writer.finish();
        assert!(doc.contains("\n    <valueSet>\n        <restricted>true</restricted>\n    </valueSet>\n"));
    }
}
