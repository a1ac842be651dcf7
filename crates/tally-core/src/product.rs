//! Product records and the derived margin / price-tier metrics.

use serde::Serialize;

// ─── Category ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
pub enum Category {
  Electronics,
  Clothing,
  #[serde(rename = "Home & Garden")]
  #[strum(serialize = "Home & Garden")]
  HomeAndGarden,
  Sports,
  Books,
}

impl Category {
  pub const ALL: [Category; 5] = [
    Category::Electronics,
    Category::Clothing,
    Category::HomeAndGarden,
    Category::Sports,
    Category::Books,
  ];

  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Price tier ──────────────────────────────────────────────────────────────

/// Bucket of a product's base price. Buckets are left-open, right-closed:
/// `(0, 50]`, `(50, 150]`, `(150, 500]`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
pub enum PriceTier {
  Budget,
  #[strum(serialize = "Mid-Range")]
  MidRange,
  Premium,
}

impl PriceTier {
  /// Bucket `base_price`; prices outside `(0, 500]` have no tier.
  pub fn for_price(base_price: f64) -> Option<Self> {
    if base_price > 0.0 && base_price <= 50.0 {
      Some(Self::Budget)
    } else if base_price > 50.0 && base_price <= 150.0 {
      Some(Self::MidRange)
    } else if base_price > 150.0 && base_price <= 500.0 {
      Some(Self::Premium)
    } else {
      None
    }
  }

  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Margin ──────────────────────────────────────────────────────────────────

/// Round to two decimal places, ties to even.
pub fn round2(value: f64) -> f64 { (value * 100.0).round_ties_even() / 100.0 }

/// `(base_price - cost) / base_price * 100`, rounded to cents of a percent.
///
/// Undefined (`None`) for a zero base price or any other non-finite result.
pub fn profit_margin(base_price: f64, cost: f64) -> Option<f64> {
  if base_price == 0.0 {
    return None;
  }
  let margin = (base_price - cost) / base_price * 100.0;
  margin.is_finite().then(|| round2(margin))
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A product row exactly as read from the source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawProduct {
  pub product_id:   i64,
  pub product_name: String,
  pub category:     Category,
  pub base_price:   f64,
  pub cost:         f64,
}

/// A product with derived metrics, as persisted in `dim_products`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
  pub product_id:    i64,
  pub product_name:  String,
  pub category:      Category,
  pub base_price:    f64,
  pub cost:          f64,
  pub profit_margin: Option<f64>,
  pub price_tier:    Option<PriceTier>,
}

impl From<RawProduct> for Product {
  fn from(raw: RawProduct) -> Self {
    Self {
      profit_margin: profit_margin(raw.base_price, raw.cost),
      price_tier: PriceTier::for_price(raw.base_price),
      product_id: raw.product_id,
      product_name: raw.product_name,
      category: raw.category,
      base_price: raw.base_price,
      cost: raw.cost,
    }
  }
}
