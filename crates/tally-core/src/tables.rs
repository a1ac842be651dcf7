//! Whole-table collections passed between pipeline stages.

use crate::{
  customer::{Customer, RawCustomer},
  fact::SalesFact,
  order::{OrderLine, RawOrder},
  product::{Product, RawProduct},
};

/// The three source tables as extracted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
  pub customers: Vec<RawCustomer>,
  pub products:  Vec<RawProduct>,
  pub orders:    Vec<RawOrder>,
}

/// Cleaned dimensions, cleaned orders and the fact table built from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanTables {
  pub customers:  Vec<Customer>,
  pub products:   Vec<Product>,
  pub orders:     Vec<OrderLine>,
  pub fact_sales: Vec<SalesFact>,
}
