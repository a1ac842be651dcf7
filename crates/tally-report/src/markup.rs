//! A thin element writer over `quick-xml`, shared by the page shell and the
//! SVG charts. Text and attribute values are escaped by the writer.

use std::{fmt::Display, io::Cursor};

use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

/// A start tag with its attributes, not yet written.
pub struct Element {
  tag:   &'static str,
  start: BytesStart<'static>,
}

impl Element {
  pub fn new(tag: &'static str) -> Self { Self { tag, start: BytesStart::new(tag) } }

  pub fn attr(mut self, key: &str, value: impl Display) -> Self {
    self.start.push_attribute((key, value.to_string().as_str()));
    self
  }

  /// A coordinate attribute, to one decimal place.
  pub fn px(self, key: &str, value: f64) -> Self { self.attr(key, format!("{value:.1}")) }
}

pub struct Markup {
  writer: Writer<Cursor<Vec<u8>>>,
}

impl Default for Markup {
  fn default() -> Self { Self::new() }
}

impl Markup {
  pub fn new() -> Self { Self { writer: Writer::new(Cursor::new(Vec::new())) } }

  pub fn doctype(&mut self, name: &str) -> quick_xml::Result<()> {
    self.writer.write_event(Event::DocType(BytesText::from_escaped(name)))?;
    Ok(())
  }

  pub fn open(&mut self, el: Element) -> quick_xml::Result<()> {
    self.writer.write_event(Event::Start(el.start))?;
    Ok(())
  }

  pub fn close(&mut self, tag: &str) -> quick_xml::Result<()> {
    self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
  }

  /// A self-closing element.
  pub fn empty(&mut self, el: Element) -> quick_xml::Result<()> {
    self.writer.write_event(Event::Empty(el.start))?;
    Ok(())
  }

  /// An element holding only `content`, escaped.
  pub fn element(&mut self, el: Element, content: &str) -> quick_xml::Result<()> {
    let tag = el.tag;
    self.open(el)?;
    self.writer.write_event(Event::Text(BytesText::new(content)))?;
    self.close(tag)
  }

  /// An element holding `content` as is, for `<style>` bodies.
  pub fn verbatim(&mut self, el: Element, content: &str) -> quick_xml::Result<()> {
    let tag = el.tag;
    self.open(el)?;
    self.writer.write_event(Event::Text(BytesText::from_escaped(content)))?;
    self.close(tag)
  }

  /// `el` wrapping a `<title>` tooltip.
  pub fn titled(&mut self, el: Element, tooltip: &str) -> quick_xml::Result<()> {
    let tag = el.tag;
    self.open(el)?;
    self.element(Element::new("title"), tooltip)?;
    self.close(tag)
  }

  pub fn into_string(self) -> String {
    String::from_utf8_lossy(&self.writer.into_inner().into_inner()).into_owned()
  }
}
