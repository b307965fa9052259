//! Descriptor loader built on `quick-xml`'s namespace-aware reader.

use std::path::{Path, PathBuf};

use pomguard_core::errors::ParseError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use super::element::{Element, QName};

/// A parsed build descriptor with the namespace its queries resolve against.
#[derive(Debug, Clone)]
pub struct Descriptor {
    origin: PathBuf,
    namespace: Option<String>,
    root: Element,
}

impl Descriptor {
    /// Read and parse the descriptor at `path`.
    ///
    /// An empty `namespace` selects unqualified elements.
    pub fn load(path: &Path, namespace: &str) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content, path, namespace)
    }

    /// Parse descriptor text. `origin` is only used in error messages.
    pub fn parse_str(
        content: &str,
        origin: impl Into<PathBuf>,
        namespace: &str,
    ) -> Result<Self, ParseError> {
        let origin = origin.into();
        let root = parse_tree(content, &origin)?;
        tracing::debug!(
            path = %origin.display(),
            root = %root.name,
            "descriptor parsed"
        );
        Ok(Self {
            origin,
            namespace: Some(namespace).filter(|ns| !ns.is_empty()).map(str::to_string),
            root,
        })
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every element below the root named `local` in the descriptor namespace.
    pub fn find_all<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        let namespace = self.namespace();
        self.root
            .descendants()
            .filter(move |e| e.is(namespace, local))
    }
}

fn parse_tree(content: &str, origin: &Path) -> Result<Element, ParseError> {
    let malformed = |position: u64, message: String| ParseError::Malformed {
        path: origin.to_path_buf(),
        position,
        message,
    };

    let mut reader = NsReader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let (ns, event) = match reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(e) => return Err(malformed(reader.error_position() as u64, e.to_string())),
        };

        match event {
            Event::Start(start) => {
                check_start(&start).map_err(|m| malformed(position, m))?;
                let name = qualify(ns, start.local_name().as_ref())
                    .map_err(|m| malformed(position, m))?;
                if stack.is_empty() && root.is_some() {
                    return Err(malformed(position, format!("second root element <{name}>")));
                }
                stack.push(Element::new(name));
            }
            Event::Empty(start) => {
                check_start(&start).map_err(|m| malformed(position, m))?;
                let name = qualify(ns, start.local_name().as_ref())
                    .map_err(|m| malformed(position, m))?;
                if stack.is_empty() && root.is_some() {
                    return Err(malformed(position, format!("second root element <{name}>")));
                }
                attach(&mut stack, &mut root, Element::new(name));
            }
            Event::End(_) => {
                let Some(mut element) = stack.pop() else {
                    return Err(malformed(position, "closing tag without an open element".into()));
                };
                let trimmed = element.text.trim();
                if trimmed.len() != element.text.len() {
                    element.text = trimmed.to_string();
                }
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| malformed(position, e.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&value),
                    None if value.trim().is_empty() => {}
                    None => {
                        return Err(malformed(position, "text outside the root element".into()))
                    }
                }
            }
            Event::CData(data) => match stack.last_mut() {
                Some(current) => current.text.push_str(&String::from_utf8_lossy(&data)),
                None => return Err(malformed(position, "CDATA outside the root element".into())),
            },
            Event::Eof => {
                if let Some(open) = stack.last() {
                    return Err(malformed(position, format!("unclosed element <{}>", open.name)));
                }
                break;
            }
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    root.ok_or_else(|| ParseError::Empty {
        path: origin.to_path_buf(),
    })
}

/// Well-formedness of a start tag: a valid element name and attributes that
/// are quoted, have values, and are not repeated.
fn check_start(start: &BytesStart<'_>) -> Result<(), String> {
    let raw = start.name();
    let name = String::from_utf8_lossy(raw.as_ref());
    if !is_xml_name(&name) {
        return Err(format!("invalid element name `{name}`"));
    }
    for attr in start.attributes().with_checks(true) {
        let attr = attr.map_err(|e| format!("bad attribute on <{name}>: {e}"))?;
        let key = String::from_utf8_lossy(attr.key.as_ref());
        if !is_xml_name(&key) {
            return Err(format!("invalid attribute name `{key}` on <{name}>"));
        }
    }
    Ok(())
}

/// XML `Name` check. Non-ASCII characters are accepted without consulting
/// the Unicode ranges.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let start_char = |c: char| c.is_ascii_alphabetic() || c == '_' || c == ':' || !c.is_ascii();
    start_char(first) && chars.all(|c| start_char(c) || c.is_ascii_digit() || c == '-' || c == '.')
}

fn qualify(ns: ResolveResult<'_>, local: &[u8]) -> Result<QName, String> {
    let local = std::str::from_utf8(local).map_err(|e| format!("element name is not UTF-8: {e}"))?;
    let namespace = match ns {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(format!(
                "unknown namespace prefix `{}` on <{local}>",
                String::from_utf8_lossy(&prefix)
            ))
        }
    };
    Ok(QName::new(namespace.as_deref(), local))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomguard_core::constants::MAVEN_POM_NAMESPACE;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- service descriptor -->
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>my-library</artifactId>
      <version> 1.0.0 </version>
    </dependency>
    <dependency>
      <groupId>org.junit</groupId>
      <artifactId>junit-bom</artifactId>
      <scope>test</scope>
      <optional/>
    </dependency>
  </dependencies>
</project>"#;

    #[test]
    fn test_parses_namespaced_tree() {
        let d = Descriptor::parse_str(POM, "pom.xml", MAVEN_POM_NAMESPACE).unwrap();
        assert!(d.root().is(Some(MAVEN_POM_NAMESPACE), "project"));
        assert_eq!(d.find_all("dependency").count(), 2);
        let first = d.find_all("dependency").next().unwrap();
        let version = first.child(d.namespace(), "version").unwrap();
        assert_eq!(version.text(), "1.0.0");
    }

    #[test]
    fn test_wrong_namespace_finds_nothing() {
        let d = Descriptor::parse_str(POM, "pom.xml", "urn:other").unwrap();
        assert_eq!(d.find_all("dependency").count(), 0);
        let d = Descriptor::parse_str(POM, "pom.xml", "").unwrap();
        assert_eq!(d.find_all("dependency").count(), 0);
    }

    #[test]
    fn test_prefixed_namespace_and_entities() {
        let xml = r#"<m:project xmlns:m="urn:m"><m:name>a &amp; b</m:name><m:x><![CDATA[<raw>]]></m:x></m:project>"#;
        let d = Descriptor::parse_str(xml, "p.xml", "urn:m").unwrap();
        let ns = d.namespace();
        assert_eq!(d.root().child(ns, "name").unwrap().text(), "a & b");
        assert_eq!(d.root().child(ns, "x").unwrap().text(), "<raw>");
    }

    #[test]
    fn test_malformed_inputs() {
        for bad in [
            "<project><a></project>",
            "<project>",
            "<a/><b/>",
            "just text",
            "<p:project/>",
            "<project><dependency foo=bar></dependency></project>",
            r#"<project><dependency a="1" a="2"/></project>"#,
            "<project><1bad/></project>",
            "<project><dependency scope></dependency></project>",
            r#"<project><dependency x="unterminated></dependency></project>"#,
        ] {
            let err = Descriptor::parse_str(bad, "bad.xml", MAVEN_POM_NAMESPACE).unwrap_err();
            assert!(
                matches!(err, ParseError::Malformed { .. }),
                "expected Malformed for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_valid_attributes_and_names_accepted() {
        let xml = r#"<project xmlns="urn:m" a='1' b="2"><x.y-z_1 id="d"/><ünï/></project>"#;
        let d = Descriptor::parse_str(xml, "p.xml", "urn:m").unwrap();
        assert_eq!(d.root().children.len(), 2);
    }

    #[test]
    fn test_name_rules() {
        for good in ["project", "_x", "m:dep", "a1.b-c", "ünï"] {
            assert!(is_xml_name(good), "{good}");
        }
        for bad in ["", "1bad", "-x", ".x", "a b", "a=b"] {
            assert!(!is_xml_name(bad), "{bad}");
        }
    }

    #[test]
    fn test_empty_document() {
        let err = Descriptor::parse_str("<?xml version=\"1.0\"?>\n", "e.xml", "").unwrap_err();
        assert!(matches!(err, ParseError::Empty { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Descriptor::load(Path::new("/definitely/not/here/pom.xml"), MAVEN_POM_NAMESPACE)
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
