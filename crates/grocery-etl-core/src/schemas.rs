//! Fixed schemas for the seven raw CSV tables (schema-on-read: asserted at
//! load time, never inferred).

use polars::prelude::*;

fn sales_date_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Microseconds, None)
}

pub fn categories_schema() -> Schema {
    Schema::from_iter([
        Field::new("CategoryID".into(), DataType::Int32),
        Field::new("CategoryName".into(), DataType::String),
    ])
}

pub fn cities_schema() -> Schema {
    Schema::from_iter([
        Field::new("CityID".into(), DataType::Int32),
        Field::new("CityName".into(), DataType::String),
        Field::new("CountryID".into(), DataType::Int32),
    ])
}

pub fn countries_schema() -> Schema {
    Schema::from_iter([
        Field::new("CountryID".into(), DataType::Int32),
        Field::new("CountryName".into(), DataType::String),
    ])
}

pub fn customers_schema() -> Schema {
    Schema::from_iter([
        Field::new("CustomerID".into(), DataType::Int32),
        Field::new("FirstName".into(), DataType::String),
        Field::new("MiddleInitial".into(), DataType::String),
        Field::new("LastName".into(), DataType::String),
        Field::new("CityID".into(), DataType::Int32),
    ])
}

pub fn employees_schema() -> Schema {
    Schema::from_iter([
        Field::new("EmployeeID".into(), DataType::Int32),
        Field::new("FirstName".into(), DataType::String),
        Field::new("MiddleInitial".into(), DataType::String),
        Field::new("LastName".into(), DataType::String),
        Field::new("CityID".into(), DataType::Int32),
    ])
}

pub fn products_schema() -> Schema {
    Schema::from_iter([
        Field::new("ProductID".into(), DataType::Int32),
        Field::new("ProductName".into(), DataType::String),
        Field::new("Price".into(), DataType::Float64),
        Field::new("Class".into(), DataType::String),
        Field::new("Resistant".into(), DataType::String),
        Field::new("IsAllergic".into(), DataType::String),
        Field::new("VitalityDays".into(), DataType::Int32),
        Field::new("CategoryID".into(), DataType::Int32),
    ])
}

pub fn sales_schema() -> Schema {
    Schema::from_iter([
        Field::new("SalesID".into(), DataType::Int32),
        Field::new("TransactionNumber".into(), DataType::String),
        Field::new("SalesDate".into(), sales_date_dtype()),
        Field::new("CustomerID".into(), DataType::Int32),
        Field::new("SalesPersonID".into(), DataType::Int32),
        Field::new("ProductID".into(), DataType::Int32),
        Field::new("Quantity".into(), DataType::Int32),
        Field::new("TotalPrice".into(), DataType::Float64),
        Field::new("Discount".into(), DataType::Float64),
    ])
}
