use std::io::BufRead;

use constants::MAX_XML_DEPTH;
use quick_xml::{
    events::{attributes::AttrError, BytesStart, Event},
    Reader,
};
use thiserror::Error;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),
    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("no root element found")]
    RootNotFound,
    #[error("multiple root elements found, `{0}` follows the root element")]
    MultipleRoots(String),
    #[error("text found outside of the root element")]
    TextOutsideRoot,
    #[error("element `{0}` is never closed")]
    Unclosed(String),
    #[error("elements are nested deeper than {0} levels")]
    TooDeep(usize),
}

/// An owned XML element. `text` holds the element's own text and CDATA content,
/// unescaped, without the text of its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Direct children named `name`, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Every element named `name` below this one, in document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, true, &mut found);
        found
    }

    /// Elements named `name` below this one that are not nested in another match.
    pub fn outermost<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, false, &mut found);
        found
    }

    fn collect_descendants<'a>(
        &'a self,
        name: &str,
        into_matches: bool,
        found: &mut Vec<&'a XmlElement>,
    ) {
        for child in &self.children {
            let is_match = child.name == name;
            if is_match {
                found.push(child);
            }
            if !is_match || into_matches {
                child.collect_descendants(name, into_matches, found);
            }
        }
    }
}

/// Reads one well-formed document into an [`XmlElement`] tree.
#[derive(Debug, Clone, Default)]
pub struct XmlDocumentReader {
    root: Option<XmlElement>,
    open_elements: Vec<XmlElement>,
}

impl XmlDocumentReader {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn read<R: BufRead>(mut self, xml: R) -> Result<XmlElement, XmlError> {
        let mut reader = Reader::from_reader(xml);

        let mut buf = Vec::new();
        loop {
            if self.match_event(reader.read_event_into(&mut buf)?)?.is_none() {
                break;
            }
            buf.clear();
        }

        if let Some(unclosed) = self.open_elements.pop() {
            return Err(XmlError::Unclosed(unclosed.name));
        }
        self.root.ok_or(XmlError::RootNotFound)
    }

    fn match_event(&mut self, event: Event) -> Result<Option<()>, XmlError> {
        match event {
            Event::Eof => return Ok(None),
            Event::Start(e) => self.open_element(&e)?,
            Event::End(_) => self.close_element(),
            Event::Empty(e) => {
                self.open_element(&e)?;
                self.close_element();
            }
            Event::Text(e) => self.push_text(&e.unescape()?)?,
            Event::CData(e) => self.push_text(&String::from_utf8_lossy(&e))?,
            // declarations, comments, processing instructions and doctypes carry no report data
            _ => (),
        };
        Ok(Some(()))
    }

    fn open_element(&mut self, e: &BytesStart) -> Result<(), XmlError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        if self.open_elements.is_empty() && self.root.is_some() {
            return Err(XmlError::MultipleRoots(name));
        }
        if self.open_elements.len() >= MAX_XML_DEPTH {
            return Err(XmlError::TooDeep(MAX_XML_DEPTH));
        }

        let attributes = e
            .attributes()
            .map(|attr| -> Result<(String, String), XmlError> {
                let attr = attr?;
                Ok((
                    String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                    attr.unescape_value()?.into_owned(),
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.open_elements.push(XmlElement {
            name,
            attributes,
            ..Default::default()
        });
        Ok(())
    }

    fn close_element(&mut self) {
        // quick-xml rejects end tags that do not match the open element
        if let Some(element) = self.open_elements.pop() {
            match self.open_elements.last_mut() {
                Some(parent) => parent.children.push(element),
                None => self.root = Some(element),
            }
        }
    }

    fn push_text(&mut self, text: &str) -> Result<(), XmlError> {
        match self.open_elements.last_mut() {
            Some(element) => element.text.push_str(text),
            None if text
                .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
                .is_empty() => {}
            None => return Err(XmlError::TextOutsideRoot),
        }
        Ok(())
    }
}
