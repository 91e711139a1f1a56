//! The join/derivation sequence that turns raw tables into the enriched
//! sales fact table.
//!
//! Every join is a left outer join anchored (directly or transitively) on
//! `sales`, so the output row count always equals the input `sales` row
//! count; unmatched lookups yield null enrichment columns instead of
//! dropping rows. Name and region concatenation skips null parts, matching
//! `concat_ws` semantics.

use polars::prelude::*;

/// Column order of the published fact table.
pub const OUTPUT_COLUMNS: [&str; 27] = [
    "SalesID",
    "TransactionNumber",
    "SalesDate",
    "Year",
    "Month",
    "Day",
    "Weekday",
    "CustomerID",
    "CustomerFullName",
    "Region",
    "CountryName",
    "CityName",
    "SalesPersonID",
    "EmployeeFullName",
    "ProductID",
    "ProductName",
    "CategoryName",
    "Class",
    "Resistant",
    "IsAllergic",
    "VitalityDays",
    "Quantity",
    "Price",
    "GrossRevenue",
    "Discount",
    "DiscountAmount",
    "TotalPrice",
];

fn left_join() -> JoinArgs {
    JoinArgs::new(JoinType::Left)
}

fn full_name() -> Expr {
    concat_str(
        [col("FirstName"), col("MiddleInitial"), col("LastName")],
        " ",
        true,
    )
}

/// Customers joined to city and country, with the derived full name and
/// `"<CountryName> - <CityName>"` region label.
pub fn customers_full(
    customers: &DataFrame,
    cities: &DataFrame,
    countries: &DataFrame,
) -> PolarsResult<DataFrame> {
    customers
        .clone()
        .lazy()
        .join(
            cities.clone().lazy(),
            [col("CityID")],
            [col("CityID")],
            left_join(),
        )
        .join(
            countries.clone().lazy(),
            [col("CountryID")],
            [col("CountryID")],
            left_join(),
        )
        .with_columns([
            full_name().alias("CustomerFullName"),
            concat_str([col("CountryName"), col("CityName")], " - ", true).alias("Region"),
        ])
        .select([
            col("CustomerID"),
            col("CustomerFullName"),
            col("CityName"),
            col("CountryName"),
            col("Region"),
        ])
        .collect()
}

/// Employees joined to city, with the derived full name.
pub fn employees_full(employees: &DataFrame, cities: &DataFrame) -> PolarsResult<DataFrame> {
    employees
        .clone()
        .lazy()
        .join(
            cities.clone().lazy(),
            [col("CityID")],
            [col("CityID")],
            left_join(),
        )
        .with_columns([full_name().alias("EmployeeFullName")])
        .select([col("EmployeeID"), col("EmployeeFullName"), col("CityName")])
        .collect()
}

/// Products with the category name flattened on.
pub fn products_full(products: &DataFrame, categories: &DataFrame) -> PolarsResult<DataFrame> {
    products
        .clone()
        .lazy()
        .join(
            categories.clone().lazy(),
            [col("CategoryID")],
            [col("CategoryID")],
            left_join(),
        )
        .select([
            col("ProductID"),
            col("ProductName"),
            col("Price"),
            col("Class"),
            col("Resistant"),
            col("IsAllergic"),
            col("VitalityDays"),
            col("CategoryName"),
        ])
        .collect()
}

/// The final fact table: sales joined to all three enriched dimensions,
/// plus revenue/discount arithmetic and calendar parts from `SalesDate`.
/// `Weekday` follows ISO numbering (Monday = 1 .. Sunday = 7).
pub fn sales_enriched(
    sales: &DataFrame,
    customers_full: &DataFrame,
    employees_full: &DataFrame,
    products_full: &DataFrame,
) -> PolarsResult<DataFrame> {
    // Only the key and full name enter the fact join; the employee city
    // would otherwise collide with the customer's CityName column.
    let employee_names = employees_full
        .clone()
        .lazy()
        .select([col("EmployeeID"), col("EmployeeFullName")]);

    sales
        .clone()
        .lazy()
        .join(
            customers_full.clone().lazy(),
            [col("CustomerID")],
            [col("CustomerID")],
            left_join(),
        )
        .join(
            employee_names,
            [col("SalesPersonID")],
            [col("EmployeeID")],
            left_join(),
        )
        .join(
            products_full.clone().lazy(),
            [col("ProductID")],
            [col("ProductID")],
            left_join(),
        )
        .with_columns([(col("Quantity") * col("Price")).alias("GrossRevenue")])
        .with_columns([
            (col("GrossRevenue") - col("TotalPrice")).alias("DiscountAmount"),
            col("SalesDate").dt().year().alias("Year"),
            col("SalesDate").dt().month().alias("Month"),
            col("SalesDate").dt().day().alias("Day"),
            col("SalesDate").dt().weekday().alias("Weekday"),
        ])
        .select(OUTPUT_COLUMNS.map(|name| col(name)))
        .collect()
}
