//! SQL schema for the tally star schema.
//!
//! The whole schema is dropped and recreated on every load; there are no
//! migrations. Indexes are built after the rows are in.

/// Drops every table the pipeline owns. Their indexes go with them.
pub const DROP_SCHEMA: &str = "
DROP TABLE IF EXISTS fact_sales;
DROP TABLE IF EXISTS dim_customers;
DROP TABLE IF EXISTS dim_products;
";

pub const CREATE_SCHEMA: &str = "
CREATE TABLE dim_customers (
    customer_id             INTEGER PRIMARY KEY,
    customer_name           TEXT,
    email                   TEXT,
    registration_date       DATE,      -- 'YYYY-MM-DD HH:MM:SS'
    country                 TEXT,      -- canonical long form
    customer_segment        TEXT,      -- 'Premium' | 'Standard' | 'Basic'
    days_since_registration INTEGER
);

CREATE TABLE dim_products (
    product_id    INTEGER PRIMARY KEY,
    product_name  TEXT,
    category      TEXT,
    base_price    REAL,
    cost          REAL,
    profit_margin REAL,                -- NULL when base_price = 0
    price_tier    TEXT                 -- 'Budget' | 'Mid-Range' | 'Premium' | NULL
);

-- One row per cleaned order line. Dimension attributes are copied in and
-- are NULL when the referenced product or customer does not exist.
CREATE TABLE fact_sales (
    order_id          INTEGER,
    customer_id       INTEGER,
    product_id        INTEGER,
    order_date        DATE,
    order_month       TEXT,            -- 'YYYY-MM'
    order_year        INTEGER,
    order_quarter     INTEGER,
    day_of_week       TEXT,
    quantity          INTEGER,
    unit_price        REAL,
    total_amount      REAL,
    shipping_cost     REAL,
    total_order_value REAL,
    status            TEXT,
    category          TEXT,
    customer_segment  TEXT,
    country           TEXT,
    price_tier        TEXT,
    revenue           REAL,
    cost_of_goods     REAL,
    gross_profit      REAL
);
";

pub const CREATE_INDEXES: &str = "
CREATE INDEX idx_sales_date     ON fact_sales(order_date);
CREATE INDEX idx_sales_customer ON fact_sales(customer_id);
CREATE INDEX idx_sales_product  ON fact_sales(product_id);
";
