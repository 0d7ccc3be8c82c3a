//! Build an [`Element`] tree from raw feed bytes with quick-xml.
//!
//! The document encoding comes from its BOM or XML declaration (UTF-8 when
//! neither says otherwise); names, attribute values, text and CDATA are all
//! decoded with it.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{Element, Feed, FeedError};

fn xml_err(e: impl std::fmt::Display) -> FeedError {
    FeedError::Xml(e.to_string())
}

fn start_element(e: &BytesStart<'_>, decoder: Decoder) -> Result<Element, FeedError> {
    let qname = e.name();
    let name = decoder.decode(qname.as_ref()).map_err(xml_err)?;
    let mut element = Element::new(name.into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = decoder.decode(attr.key.as_ref()).map_err(xml_err)?.into_owned();
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(xml_err)?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Attach a finished element to its parent, or make it the root.
fn close(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), FeedError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(FeedError::Xml("more than one root element".into())),
    }
    Ok(())
}

/// Parse a feed document (RSS 2.0 shaped: `<rss><channel><item>…`).
pub fn parse_feed(xml: &[u8]) -> Result<Feed, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => stack.push(start_element(&e, reader.decoder())?),
            Ok(Event::Empty(e)) => {
                let element = start_element(&e, reader.decoder())?;
                close(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FeedError::Xml("unexpected closing tag".into()))?;
                close(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape().map_err(xml_err)?);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = stack.last_mut() {
                    let text = reader.decoder().decode(&e).map_err(xml_err)?;
                    current.text.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FeedError::Xml(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::Xml(format!("unclosed <{}> element", open.name)));
    }
    root.map(Feed::new)
        .ok_or_else(|| FeedError::Xml("document has no root element".into()))
}
