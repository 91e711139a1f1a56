use bytes::Bytes;
use grocery_etl_bucket::{BucketStore, MemoryBucketStore};
use grocery_etl_core::error::EtlError;
use grocery_etl_core::ingestion;

const CATEGORIES_CSV: &str = "CategoryID,CategoryName\n5,Dairy\n";
const CITIES_CSV: &str = "CityID,CityName,CountryID\n100,Taipei,1\n";
const COUNTRIES_CSV: &str = "CountryID,CountryName\n1,Taiwan\n";
const CUSTOMERS_CSV: &str =
    "CustomerID,FirstName,MiddleInitial,LastName,CityID\n10,Anna,B,Lee,100\n";
const EMPLOYEES_CSV: &str =
    "EmployeeID,FirstName,MiddleInitial,LastName,CityID\n20,Carol,D,Chen,100\n";
const PRODUCTS_CSV: &str = "ProductID,ProductName,Price,Class,Resistant,IsAllergic,VitalityDays,CategoryID\n30,Milk,10.0,Medium,Durable,Unknown,7,5\n";
const SALES_CSV: &str = "SalesID,TransactionNumber,SalesDate,CustomerID,SalesPersonID,ProductID,Quantity,TotalPrice,Discount\n1,T-1,2023-03-15 00:00:00,10,20,30,3,27.0,0.1\n2,T-2,2023-03-16 00:00:00,10,20,30,2,20.0,0.0\n";

async fn seed(store: &MemoryBucketStore, name: &str, body: &str) {
    store
        .put_object(
            &format!("raw_data/{name}.csv"),
            Bytes::from(body.to_string()),
        )
        .await
        .expect("seed");
}

async fn seed_all(store: &MemoryBucketStore) {
    seed(store, "categories", CATEGORIES_CSV).await;
    seed(store, "cities", CITIES_CSV).await;
    seed(store, "countries", COUNTRIES_CSV).await;
    seed(store, "customers", CUSTOMERS_CSV).await;
    seed(store, "employees", EMPLOYEES_CSV).await;
    seed(store, "products", PRODUCTS_CSV).await;
    seed(store, "sales", SALES_CSV).await;
}

#[tokio::test]
async fn all_seven_tables_load_with_their_schemas() {
    let store = MemoryBucketStore::new();
    seed_all(&store).await;

    let raw = ingestion::load_raw_tables(&store).await;
    assert!(raw.missing().is_empty());

    let tables = raw.into_complete().expect("complete");
    assert_eq!(tables.sales.height(), 2);
    assert_eq!(tables.categories.height(), 1);

    // Schema-on-read: declared dtypes, not inferred ones.
    let sales_date = tables.sales.column("SalesDate").expect("SalesDate");
    assert!(matches!(sales_date.dtype(), polars::prelude::DataType::Datetime(_, _)));
}

#[tokio::test]
async fn missing_object_becomes_a_sentinel_not_an_error() {
    let store_without_sales = MemoryBucketStore::new();
    seed(&store_without_sales, "categories", CATEGORIES_CSV).await;
    seed(&store_without_sales, "cities", CITIES_CSV).await;
    seed(&store_without_sales, "countries", COUNTRIES_CSV).await;
    seed(&store_without_sales, "customers", CUSTOMERS_CSV).await;
    seed(&store_without_sales, "employees", EMPLOYEES_CSV).await;
    seed(&store_without_sales, "products", PRODUCTS_CSV).await;

    let raw = ingestion::load_raw_tables(&store_without_sales).await;
    assert_eq!(raw.missing(), vec!["sales"]);

    let err = raw.into_complete().unwrap_err();
    assert!(matches!(err, EtlError::IncompleteLoad(tables) if tables == vec!["sales"]));
}

#[tokio::test]
async fn unparseable_table_becomes_a_sentinel() {
    let store = MemoryBucketStore::new();
    seed_all(&store).await;
    seed(
        &store,
        "categories",
        "CategoryID,CategoryName\nnot-a-number,Dairy\n",
    )
    .await;

    let raw = ingestion::load_raw_tables(&store).await;
    assert_eq!(raw.missing(), vec!["categories"]);
}
