//! HTML page shell shared by every report.

use crate::markup::{Element, Markup};

const STYLE: &str = "
body { font-family: Arial, Helvetica, sans-serif; padding: 20px; color: #222; }
h1 { font-size: 22px; }
h2 { font-size: 17px; margin-top: 28px; }
table { border-collapse: collapse; width: 100%; margin-top: 16px; }
th, td { border: 1px solid #ddd; padding: 10px; }
th { background: #f0f0f0; text-align: left; }
td.num, th.num { text-align: right; }
svg text { font-family: Arial, Helvetica, sans-serif; font-size: 12px; }
";

/// A standalone HTML document, open at `<body>` until [`Page::finish`].
pub struct Page {
  markup: Markup,
}

impl Page {
  /// Write the head and an `<h1>` carrying `title`.
  pub fn new(title: &str) -> quick_xml::Result<Self> {
    let mut m = Markup::new();
    m.doctype("html")?;
    m.open(Element::new("html").attr("lang", "en"))?;
    m.open(Element::new("head"))?;
    m.empty(Element::new("meta").attr("charset", "utf-8"))?;
    m.element(Element::new("title"), title)?;
    m.verbatim(Element::new("style"), STYLE)?;
    m.close("head")?;
    m.open(Element::new("body"))?;
    m.element(Element::new("h1"), title)?;
    Ok(Self { markup: m })
  }

  /// Where charts are drawn.
  pub fn body(&mut self) -> &mut Markup { &mut self.markup }

  pub fn heading(&mut self, text: &str) -> quick_xml::Result<()> {
    self.markup.element(Element::new("h2"), text)
  }

  /// A two-column table of `(label, value)` rows.
  pub fn table(&mut self, header: (&str, &str), rows: &[(String, String)]) -> quick_xml::Result<()> {
    let m = &mut self.markup;
    m.open(Element::new("table"))?;
    m.open(Element::new("tr"))?;
    m.element(Element::new("th"), header.0)?;
    m.element(Element::new("th").attr("class", "num"), header.1)?;
    m.close("tr")?;
    for (label, value) in rows {
      m.open(Element::new("tr"))?;
      m.element(Element::new("td"), label)?;
      m.element(Element::new("td").attr("class", "num"), value)?;
      m.close("tr")?;
    }
    m.close("table")
  }

  pub fn finish(mut self) -> quick_xml::Result<String> {
    self.markup.close("body")?;
    self.markup.close("html")?;
    Ok(self.markup.into_string())
  }
}
