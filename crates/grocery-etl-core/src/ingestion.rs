//! Raw table loading with deferred failure aggregation.
//!
//! Each read catches its own error and yields a null sentinel instead of
//! raising; the aggregate gate in [`RawTables::into_complete`] is the only
//! place a load failure becomes fatal. Partial data never flows downstream.

use std::io::Cursor;
use std::sync::Arc;

use grocery_etl_bucket::BucketStore;
use polars::prelude::*;
use tracing::{error, info};

use crate::error::{EtlError, Result};
use crate::schemas;

pub const RAW_PREFIX: &str = "raw_data";

/// Per-table load results; `None` marks a failed read.
#[derive(Debug, Default)]
pub struct RawTables {
    pub categories: Option<DataFrame>,
    pub cities: Option<DataFrame>,
    pub countries: Option<DataFrame>,
    pub customers: Option<DataFrame>,
    pub employees: Option<DataFrame>,
    pub products: Option<DataFrame>,
    pub sales: Option<DataFrame>,
}

/// All seven raw tables, present and schema-checked.
#[derive(Debug)]
pub struct LoadedTables {
    pub categories: DataFrame,
    pub cities: DataFrame,
    pub countries: DataFrame,
    pub customers: DataFrame,
    pub employees: DataFrame,
    pub products: DataFrame,
    pub sales: DataFrame,
}

impl RawTables {
    /// Names of the tables whose read failed.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.categories.is_none() {
            missing.push("categories");
        }
        if self.cities.is_none() {
            missing.push("cities");
        }
        if self.countries.is_none() {
            missing.push("countries");
        }
        if self.customers.is_none() {
            missing.push("customers");
        }
        if self.employees.is_none() {
            missing.push("employees");
        }
        if self.products.is_none() {
            missing.push("products");
        }
        if self.sales.is_none() {
            missing.push("sales");
        }
        missing
    }

    /// All-or-nothing gate: every table must have loaded.
    pub fn into_complete(self) -> Result<LoadedTables> {
        let missing = self.missing();
        match (
            self.categories,
            self.cities,
            self.countries,
            self.customers,
            self.employees,
            self.products,
            self.sales,
        ) {
            (
                Some(categories),
                Some(cities),
                Some(countries),
                Some(customers),
                Some(employees),
                Some(products),
                Some(sales),
            ) => Ok(LoadedTables {
                categories,
                cities,
                countries,
                customers,
                employees,
                products,
                sales,
            }),
            _ => Err(EtlError::IncompleteLoad(missing)),
        }
    }
}

/// Read every raw table, deferring failures into sentinels.
pub async fn load_raw_tables(store: &dyn BucketStore) -> RawTables {
    info!("reading raw CSV tables with predefined schemas");
    RawTables {
        categories: read_table(store, "categories", schemas::categories_schema()).await,
        cities: read_table(store, "cities", schemas::cities_schema()).await,
        countries: read_table(store, "countries", schemas::countries_schema()).await,
        customers: read_table(store, "customers", schemas::customers_schema()).await,
        employees: read_table(store, "employees", schemas::employees_schema()).await,
        products: read_table(store, "products", schemas::products_schema()).await,
        sales: read_table(store, "sales", schemas::sales_schema()).await,
    }
}

async fn read_table(
    store: &dyn BucketStore,
    name: &'static str,
    schema: Schema,
) -> Option<DataFrame> {
    let key = format!("{RAW_PREFIX}/{name}.csv");
    match fetch_and_parse(store, &key, schema).await {
        Ok(df) => {
            info!("successfully read {name}.csv ({} rows)", df.height());
            Some(df)
        }
        Err(err) => {
            error!("failed to read {name}.csv: {err}");
            None
        }
    }
}

async fn fetch_and_parse(
    store: &dyn BucketStore,
    key: &str,
    schema: Schema,
) -> Result<DataFrame> {
    let bytes = store.get_object(key).await?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema(Some(Arc::new(schema)))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    Ok(df)
}
