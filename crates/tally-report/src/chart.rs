//! Static SVG charts: line, vertical bar, horizontal bar and donut.
//!
//! Each function writes one self-contained `<svg>` element sized
//! [`WIDTH`] x [`HEIGHT`] into a [`Markup`]. No scripts are emitted.

use crate::{
  format,
  markup::{Element, Markup},
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 440.0;

const TOP: f64 = 30.0;
const RIGHT: f64 = 150.0;
const BOTTOM: f64 = 90.0;

const AXIS: &str = "#444";
const GRID: &str = "#e5e5e5";

/// Palette for donut slices, cycled.
const PALETTE: [&str; 8] = [
  "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
];

/// One named line of a [`line_chart`].
pub struct Series<'a> {
  pub name:   &'a str,
  pub color:  &'a str,
  pub values: &'a [f64],
}

// ─── Scales ──────────────────────────────────────────────────────────────────

/// A linear axis from `lo` to `hi` with round tick values.
#[derive(Debug, Clone, PartialEq)]
struct Axis {
  lo:    f64,
  hi:    f64,
  ticks: Vec<f64>,
}

impl Axis {
  /// Cover every value and zero with about five round steps.
  fn covering(values: impl Iterator<Item = f64>) -> Self {
    let (min, max) = values
      .filter(|v| v.is_finite())
      .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let step = nice_step(if max > min { (max - min) / 5.0 } else { 1.0 });
    let lo = (min / step).floor() * step;
    let hi = (max / step).ceil() * step;
    let hi = if hi > lo { hi } else { lo + step };

    let count = ((hi - lo) / step).round() as usize;
    let ticks = (0..=count).map(|i| lo + step * i as f64).collect();
    Self { lo, hi, ticks }
  }

  /// Fraction of the way from `lo` to `hi`.
  fn frac(&self, v: f64) -> f64 { (v - self.lo) / (self.hi - self.lo) }
}

/// Smallest of 1, 2, 5 or 10 times a power of ten that is at least `raw`.
fn nice_step(raw: f64) -> f64 {
  let magnitude = 10f64.powf(raw.log10().floor());
  let residual = raw / magnitude;
  let factor = if residual <= 1.0 {
    1.0
  } else if residual <= 2.0 {
    2.0
  } else if residual <= 5.0 {
    5.0
  } else {
    10.0
  };
  factor * magnitude
}

/// Whole-dollar tick label.
fn tick_label(v: f64) -> String {
  let dollars = format::count(v.abs().round() as i64);
  if v < 0.0 { format!("-${dollars}") } else { format!("${dollars}") }
}

// ─── SVG plumbing ────────────────────────────────────────────────────────────

fn open_svg(out: &mut Markup) -> quick_xml::Result<()> {
  out.open(
    Element::new("svg")
      .attr("xmlns", SVG_NS)
      .attr("width", WIDTH)
      .attr("height", HEIGHT)
      .attr("viewBox", format!("0 0 {WIDTH} {HEIGHT}")),
  )
}

fn no_data(out: &mut Markup) -> quick_xml::Result<()> {
  open_svg(out)?;
  text(out, WIDTH / 2.0, HEIGHT / 2.0, "middle", "No data")?;
  out.close("svg")
}

fn label(x: f64, y: f64, anchor: &str) -> Element {
  Element::new("text")
    .px("x", x)
    .px("y", y)
    .attr("text-anchor", anchor)
    .attr("fill", AXIS)
}

fn text(out: &mut Markup, x: f64, y: f64, anchor: &str, content: &str) -> quick_xml::Result<()> {
  out.element(label(x, y, anchor), content)
}

/// Category label under the x axis, slanted when there are many.
fn x_label(out: &mut Markup, x: f64, y: f64, content: &str, slanted: bool) -> quick_xml::Result<()> {
  if slanted {
    let el = label(x, y, "end").attr("transform", format!("rotate(-40 {x:.1} {y:.1})"));
    out.element(el, content)
  } else {
    text(out, x, y, "middle", content)
  }
}

fn line(out: &mut Markup, (x1, y1): (f64, f64), (x2, y2): (f64, f64), color: &str) -> quick_xml::Result<()> {
  out.empty(
    Element::new("line")
      .px("x1", x1)
      .px("y1", y1)
      .px("x2", x2)
      .px("y2", y2)
      .attr("stroke", color),
  )
}

/// Horizontal grid lines with money labels for a vertical value axis.
fn value_grid(
  out: &mut Markup,
  axis: &Axis,
  left: f64,
  right: f64,
  y_of: impl Fn(f64) -> f64,
) -> quick_xml::Result<()> {
  for &tick in &axis.ticks {
    let y = y_of(tick);
    line(out, (left, y), (right, y), GRID)?;
    text(out, left - 8.0, y + 4.0, "end", &tick_label(tick))?;
  }
  Ok(())
}

fn legend(out: &mut Markup, entries: &[(&str, &str)], x: f64) -> quick_xml::Result<()> {
  for (i, (name, color)) in entries.iter().enumerate() {
    let y = TOP + 10.0 + i as f64 * 22.0;
    out.empty(
      Element::new("rect")
        .px("x", x)
        .px("y", y - 11.0)
        .attr("width", 14)
        .attr("height", 14)
        .attr("fill", color),
    )?;
    text(out, x + 20.0, y, "start", name)?;
  }
  Ok(())
}

fn tooltip(name: &str, value: f64) -> String { format!("{name}: {}", format::money(value)) }

// ─── Charts ──────────────────────────────────────────────────────────────────

/// A multi-series line chart over categorical x labels.
pub fn line_chart(
  out: &mut Markup,
  labels: &[String],
  series: &[Series<'_>],
  y_title: &str,
) -> quick_xml::Result<()> {
  if labels.is_empty() || series.is_empty() {
    return no_data(out);
  }
  let left = 90.0;
  let (plot_w, plot_h) = (WIDTH - left - RIGHT, HEIGHT - TOP - BOTTOM);
  let axis = Axis::covering(series.iter().flat_map(|s| s.values.iter().copied()));
  let y_of = |v: f64| TOP + plot_h * (1.0 - axis.frac(v));
  let x_of = |i: usize| {
    if labels.len() == 1 {
      left + plot_w / 2.0
    } else {
      left + plot_w * i as f64 / (labels.len() - 1) as f64
    }
  };

  open_svg(out)?;
  value_grid(out, &axis, left, left + plot_w, y_of)?;
  line(out, (left, TOP), (left, TOP + plot_h), AXIS)?;
  text(out, 18.0, TOP + plot_h / 2.0, "middle", y_title)?;

  let slanted = labels.len() > 8;
  for (i, name) in labels.iter().enumerate() {
    x_label(out, x_of(i), TOP + plot_h + 18.0, name, slanted)?;
  }

  for s in series {
    let points: Vec<String> = s
      .values
      .iter()
      .enumerate()
      .map(|(i, v)| format!("{:.1},{:.1}", x_of(i), y_of(*v)))
      .collect();
    out.empty(
      Element::new("polyline")
        .attr("fill", "none")
        .attr("stroke", s.color)
        .attr("stroke-width", 3)
        .attr("points", points.join(" ")),
    )?;
    for (i, v) in s.values.iter().enumerate() {
      let dot = Element::new("circle")
        .px("cx", x_of(i))
        .px("cy", y_of(*v))
        .attr("r", 4)
        .attr("fill", s.color);
      out.titled(dot, &tooltip(s.name, *v))?;
    }
  }

  let entries: Vec<(&str, &str)> = series.iter().map(|s| (s.name, s.color)).collect();
  legend(out, &entries, WIDTH - RIGHT + 20.0)?;
  out.close("svg")
}

/// Vertical bars, one per label. Negative values hang below the zero line.
pub fn bar_chart(
  out: &mut Markup,
  labels: &[String],
  values: &[f64],
  color: &str,
  y_title: &str,
) -> quick_xml::Result<()> {
  if labels.is_empty() {
    return no_data(out);
  }
  let left = 90.0;
  let (plot_w, plot_h) = (WIDTH - left - 30.0, HEIGHT - TOP - BOTTOM);
  let axis = Axis::covering(values.iter().copied());
  let y_of = |v: f64| TOP + plot_h * (1.0 - axis.frac(v));
  let band = plot_w / labels.len() as f64;
  let zero = y_of(0.0);

  open_svg(out)?;
  value_grid(out, &axis, left, left + plot_w, y_of)?;
  text(out, 18.0, TOP + plot_h / 2.0, "middle", y_title)?;

  let slanted = labels.len() > 6;
  for (i, (name, value)) in labels.iter().zip(values).enumerate() {
    let y = y_of(*value);
    let bar = Element::new("rect")
      .px("x", left + band * i as f64 + band * 0.15)
      .px("y", y.min(zero))
      .px("width", band * 0.7)
      .px("height", (y - zero).abs())
      .attr("fill", color);
    out.titled(bar, &tooltip(name, *value))?;
    x_label(out, left + band * (i as f64 + 0.5), TOP + plot_h + 18.0, name, slanted)?;
  }
  line(out, (left, zero), (left + plot_w, zero), AXIS)?;
  out.close("svg")
}

/// Horizontal bars, first label on top.
pub fn horizontal_bar_chart(
  out: &mut Markup,
  labels: &[String],
  values: &[f64],
  color: &str,
  x_title: &str,
) -> quick_xml::Result<()> {
  if labels.is_empty() {
    return no_data(out);
  }
  let left = 160.0;
  let (plot_w, plot_h) = (WIDTH - left - 40.0, HEIGHT - TOP - 60.0);
  let axis = Axis::covering(values.iter().copied());
  let x_of = |v: f64| left + plot_w * axis.frac(v);
  let band = plot_h / labels.len() as f64;
  let zero = x_of(0.0);

  open_svg(out)?;
  for &tick in &axis.ticks {
    let x = x_of(tick);
    line(out, (x, TOP), (x, TOP + plot_h), GRID)?;
    text(out, x, TOP + plot_h + 18.0, "middle", &tick_label(tick))?;
  }
  text(out, left + plot_w / 2.0, HEIGHT - 12.0, "middle", x_title)?;

  for (i, (name, value)) in labels.iter().zip(values).enumerate() {
    let y = TOP + band * i as f64 + band * 0.15;
    let x = x_of(*value);
    let bar = Element::new("rect")
      .px("x", x.min(zero))
      .px("y", y)
      .px("width", (x - zero).abs())
      .px("height", band * 0.7)
      .attr("fill", color);
    out.titled(bar, &tooltip(name, *value))?;
    text(out, left - 8.0, y + band * 0.35 + 4.0, "end", name)?;
  }
  line(out, (zero, TOP), (zero, TOP + plot_h), AXIS)?;
  out.close("svg")
}

/// A ring chart of each label's share of the total. Negative values count
/// as zero.
pub fn donut_chart(out: &mut Markup, labels: &[String], values: &[f64]) -> quick_xml::Result<()> {
  let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
  if labels.is_empty() || total <= 0.0 {
    return no_data(out);
  }
  let (cx, cy) = (WIDTH / 2.0 - 80.0, HEIGHT / 2.0);
  let outer = 170.0;
  let inner = outer * 0.3;

  open_svg(out)?;
  let mut start = 0.0f64;
  let mut entries = Vec::with_capacity(labels.len());

  for (i, (name, value)) in labels.iter().zip(values).enumerate() {
    let color = PALETTE[i % PALETTE.len()];
    let share = value.max(0.0) / total;
    entries.push((format!("{name} ({:.1}%)", share * 100.0), color));
    if share <= 0.0 {
      continue;
    }

    if share >= 0.9999 {
      let ring = Element::new("circle")
        .px("cx", cx)
        .px("cy", cy)
        .px("r", (outer + inner) / 2.0)
        .attr("fill", "none")
        .attr("stroke", color)
        .px("stroke-width", outer - inner);
      out.titled(ring, &tooltip(name, *value))?;
      continue;
    }

    let end = start + share * std::f64::consts::TAU;
    let large = if share > 0.5 { 1 } else { 0 };
    // Angles run clockwise from twelve o'clock.
    let point = |r: f64, a: f64| (cx + r * a.sin(), cy - r * a.cos());
    let (ox1, oy1) = point(outer, start);
    let (ox2, oy2) = point(outer, end);
    let (ix2, iy2) = point(inner, end);
    let (ix1, iy1) = point(inner, start);
    let d = format!(
      "M {ox1:.2} {oy1:.2} A {outer} {outer} 0 {large} 1 {ox2:.2} {oy2:.2} \
       L {ix2:.2} {iy2:.2} A {inner} {inner} 0 {large} 0 {ix1:.2} {iy1:.2} Z"
    );
    out.titled(Element::new("path").attr("d", d).attr("fill", color), &tooltip(name, *value))?;
    start = end;
  }

  let entries: Vec<(&str, &str)> = entries.iter().map(|(l, c)| (l.as_str(), *c)).collect();
  legend(out, &entries, WIDTH - 230.0)?;
  out.close("svg")
}
