//! Typed model of the Jenkins folder configuration document.
//!
//! Only a handful of fields are modelled explicitly; everything else a plugin
//! contributes is captured verbatim as [`RawProperty`] entries so that a
//! parse → render round trip never destroys configuration this crate does not
//! understand. Rendering emits the known fields in a fixed, deterministic
//! order followed by the opaque entries in document order.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::Error;

/// Root element Jenkins uses for folder configuration documents.
pub const FOLDER_ELEMENT: &str = "com.cloudbees.hudson.plugins.folder.Folder";

const SECURITY_ELEMENT: &str =
    "com.cloudbees.hudson.plugins.folder.properties.AuthorizationMatrixProperty";

/// A Jenkins folder configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Folder {
    pub description: String,
    pub display_name: String,
    pub properties: FolderProperties,
    pub folder_views: RawProperty,
    pub health_metrics: RawProperty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderProperties {
    pub security: Option<FolderSecurity>,
    /// Plugin-contributed properties this model does not understand,
    /// preserved in document order.
    pub other: Vec<RawProperty>,
}

/// The project-based authorization matrix attached to a folder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderSecurity {
    pub inheritance_strategy: String,
    pub permissions: Vec<String>,
}

/// An opaque XML element: tag name, attributes and inner content kept
/// verbatim so rendering reproduces it unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProperty {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub raw: String,
}

/// Rewrites an XML 1.1 declaration to 1.0 before parsing. Jenkins may emit
/// 1.1 declarations that the parser does not support; as long as the server
/// makes no use of 1.1-only syntax the document parses unchanged. This is a
/// compatibility shim, not a semantic transform.
pub fn normalize_declaration(config: &str) -> String {
    config.replace(
        "<?xml version='1.1' encoding='UTF-8'?>",
        "<?xml version='1.0' encoding='UTF-8'?>",
    )
}

/// Parses a folder configuration document served by the remote.
pub fn parse_folder(config: &str) -> Result<Folder, Error> {
    let doc = normalize_declaration(config);
    let mut reader = Reader::from_str(&doc);
    let mut folder = Folder::default();

    // Locate the document root, skipping the prologue.
    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(_) => break,
            Event::Eof => return Err(parse_error("missing document root")),
            _ => {}
        }
    }

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"description" => folder.description = read_element_text(&mut reader)?,
                b"displayName" => folder.display_name = read_element_text(&mut reader)?,
                b"properties" => parse_properties(&mut reader, &doc, &mut folder.properties)?,
                b"folderViews" => folder.folder_views = read_raw(&mut reader, &doc, &e)?,
                b"healthMetrics" => folder.health_metrics = read_raw(&mut reader, &doc, &e)?,
                _ => {
                    reader.read_to_end(e.name()).map_err(parse_error)?;
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"folderViews" => folder.folder_views = empty_raw(&e)?,
                b"healthMetrics" => folder.health_metrics = empty_raw(&e)?,
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(parse_error("unexpected end of document")),
            _ => {}
        }
    }

    Ok(folder)
}

impl Folder {
    /// Serializes the document: known fields first in a fixed order, then the
    /// opaque entries exactly as they were parsed.
    pub fn render(&self) -> Result<String, Error> {
        let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

        writer
            .write_event(Event::Start(BytesStart::new(FOLDER_ELEMENT)))
            .map_err(Error::xml)?;

        write_text_element(&mut writer, "description", &self.description)?;
        if !self.display_name.is_empty() {
            write_text_element(&mut writer, "displayName", &self.display_name)?;
        }

        writer
            .write_event(Event::Start(BytesStart::new("properties")))
            .map_err(Error::xml)?;
        if let Some(security) = &self.properties.security {
            write_security(&mut writer, security)?;
        }
        for property in &self.properties.other {
            write_raw(&mut writer, property, &property.name)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("properties")))
            .map_err(Error::xml)?;

        write_raw(&mut writer, &self.folder_views, "folderViews")?;
        write_raw(&mut writer, &self.health_metrics, "healthMetrics")?;

        writer
            .write_event(Event::End(BytesEnd::new(FOLDER_ELEMENT)))
            .map_err(Error::xml)?;

        String::from_utf8(writer.into_inner()).map_err(Error::xml)
    }
}

fn parse_error(err: impl std::fmt::Display) -> Error {
    Error::Xml(format!("could not parse job XML: {err}"))
}

/// Collects the text content of the element whose start tag was just read,
/// unescaping entities. Nested markup is skipped.
fn read_element_text(reader: &mut Reader<&[u8]>) -> Result<String, Error> {
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(parse_error)?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(e) => {
                reader.read_to_end(e.name()).map_err(parse_error)?;
            }
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(parse_error("unexpected end of document")),
            _ => {}
        }
    }
}

/// Captures the element whose start tag was just read as an opaque property:
/// attributes decoded, inner content sliced verbatim from the source.
fn read_raw(reader: &mut Reader<&[u8]>, doc: &str, e: &BytesStart) -> Result<RawProperty, Error> {
    let mut property = empty_raw(e)?;
    let span = reader.read_to_end(e.name()).map_err(parse_error)?;
    property.raw = doc[span.start as usize..span.end as usize].to_owned();
    Ok(property)
}

fn empty_raw(e: &BytesStart) -> Result<RawProperty, Error> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(parse_error)?;
        attributes.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            attr.unescape_value().map_err(parse_error)?.into_owned(),
        ));
    }
    Ok(RawProperty {
        name,
        attributes,
        raw: String::new(),
    })
}

fn parse_properties(
    reader: &mut Reader<&[u8]>,
    doc: &str,
    properties: &mut FolderProperties,
) -> Result<(), Error> {
    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(e) => {
                if e.name().as_ref() == SECURITY_ELEMENT.as_bytes() {
                    properties.security = Some(parse_security(reader)?);
                } else {
                    properties.other.push(read_raw(reader, doc, &e)?);
                }
            }
            Event::Empty(e) => {
                if e.name().as_ref() != SECURITY_ELEMENT.as_bytes() {
                    properties.other.push(empty_raw(&e)?);
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(parse_error("unexpected end of document")),
            _ => {}
        }
    }
}

fn parse_security(reader: &mut Reader<&[u8]>) -> Result<FolderSecurity, Error> {
    let mut security = FolderSecurity::default();
    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Empty(e) if e.name().as_ref() == b"inheritanceStrategy" => {
                security.inheritance_strategy = class_attribute(&e)?;
            }
            Event::Start(e) => match e.name().as_ref() {
                b"inheritanceStrategy" => {
                    security.inheritance_strategy = class_attribute(&e)?;
                    reader.read_to_end(e.name()).map_err(parse_error)?;
                }
                b"permission" => security.permissions.push(read_element_text(reader)?),
                _ => {
                    reader.read_to_end(e.name()).map_err(parse_error)?;
                }
            },
            Event::End(_) => return Ok(security),
            Event::Eof => return Err(parse_error("unexpected end of document")),
            _ => {}
        }
    }
}

fn class_attribute(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes() {
        let attr = attr.map_err(parse_error)?;
        if attr.key.as_ref() == b"class" {
            return Ok(attr.unescape_value().map_err(parse_error)?.into_owned());
        }
    }
    Ok(String::new())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<(), Error> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(Error::xml)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(Error::xml)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(Error::xml)?;
    Ok(())
}

fn write_security(writer: &mut Writer<Vec<u8>>, security: &FolderSecurity) -> Result<(), Error> {
    writer
        .write_event(Event::Start(BytesStart::new(SECURITY_ELEMENT)))
        .map_err(Error::xml)?;
    let mut strategy = BytesStart::new("inheritanceStrategy");
    strategy.push_attribute(("class", security.inheritance_strategy.as_str()));
    writer
        .write_event(Event::Empty(strategy))
        .map_err(Error::xml)?;
    for permission in &security.permissions {
        write_text_element(writer, "permission", permission)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(SECURITY_ELEMENT)))
        .map_err(Error::xml)?;
    Ok(())
}

/// Writes an opaque property back out: attributes re-emitted, inner content
/// written verbatim without re-escaping.
fn write_raw(writer: &mut Writer<Vec<u8>>, property: &RawProperty, tag: &str) -> Result<(), Error> {
    let mut start = BytesStart::new(tag);
    for (key, value) in &property.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if property.raw.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(Error::xml)?;
    } else {
        writer.write_event(Event::Start(start)).map_err(Error::xml)?;
        writer
            .write_event(Event::Text(BytesText::from_escaped(property.raw.as_str())))
            .map_err(Error::xml)?;
        writer
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(Error::xml)?;
    }
    Ok(())
}
