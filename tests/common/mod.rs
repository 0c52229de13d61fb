#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use expense_report::{
    config::ConfigManager,
    domain::{Category, Payment, User, UserRole},
    storage::{save_dataset_to_path, Dataset},
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn setup_config() -> ConfigManager {
    ConfigManager::with_base_dir(&temp_base())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Three users, three categories; Boris has no payments at all.
pub struct Household {
    pub anna: User,
    pub boris: User,
    pub vera: User,
    pub food: Category,
    pub transport: Category,
    pub rent: Category,
    pub dataset: Dataset,
}

pub fn household() -> Household {
    let anna = User::new("anna", "Anna Ivanova", UserRole::Admin);
    let boris = User::new("boris", "Boris Petrov", UserRole::User);
    let vera = User::new("vera", "Vera Smirnova", UserRole::User);
    let food = Category::new("Food");
    let transport = Category::new("Transport");
    let rent = Category::new("Rent");

    let payments = vec![
        Payment::new("Groceries", anna.id, food.id, date(2024, 3, 1), Decimal::from(15)),
        Payment::new("Bread", anna.id, food.id, date(2024, 3, 2), Decimal::from(5)),
        Payment::new("Bus pass", anna.id, transport.id, date(2024, 3, 3), Decimal::from(5)),
        Payment::new("Flat", vera.id, rent.id, date(2024, 3, 5), Decimal::from(700)),
        Payment::new("Taxi", vera.id, transport.id, date(2024, 3, 6), Decimal::from(12))
            .with_quantity(Some(2)),
    ];

    let dataset = Dataset::new(
        vec![anna.clone(), boris.clone(), vera.clone()],
        vec![food.clone(), transport.clone(), rent.clone()],
        payments,
    );

    Household {
        anna,
        boris,
        vera,
        food,
        transport,
        rent,
        dataset,
    }
}

/// Writes the household snapshot to a fresh JSON file.
pub fn household_file(household: &Household) -> PathBuf {
    let path = temp_base().join("data.json");
    save_dataset_to_path(&household.dataset, &path).expect("write dataset");
    path
}
