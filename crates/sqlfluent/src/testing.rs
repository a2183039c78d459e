//! Hand-written table fixtures for unit tests.

use crate::table::{Column, Table};

pub(crate) struct Car;

impl Table for Car {
    const TABLE: &'static str = "Car";
    const COLUMNS: &'static [&'static str] = &["Id", "ModelYear", "Mileage", "Price", "MakerId"];
}

impl Car {
    pub(crate) const ID: Column<Car> = Column::new("Id");
    pub(crate) const MODEL_YEAR: Column<Car> = Column::new("ModelYear");
    pub(crate) const MILEAGE: Column<Car> = Column::new("Mileage");
    pub(crate) const PRICE: Column<Car> = Column::new("Price");
    pub(crate) const MAKER_ID: Column<Car> = Column::new("MakerId");
}

pub(crate) struct Maker;

impl Table for Maker {
    const TABLE: &'static str = "Maker";
    const COLUMNS: &'static [&'static str] = &["Id", "Name", "FoundationDate", "CountryId"];
}

impl Maker {
    pub(crate) const ID: Column<Maker> = Column::new("Id");
    pub(crate) const NAME: Column<Maker> = Column::new("Name");
    pub(crate) const FOUNDATION_DATE: Column<Maker> = Column::new("FoundationDate");
    pub(crate) const COUNTRY_ID: Column<Maker> = Column::new("CountryId");
}

pub(crate) struct Country;

impl Table for Country {
    const TABLE: &'static str = "Country";
}

impl Country {
    pub(crate) const ID: Column<Country> = Column::new("Id");
    pub(crate) const NAME: Column<Country> = Column::new("Name");
}

/// Case- and whitespace-insensitive comparison form.
pub(crate) fn normalize(sql: &str) -> String {
    sql.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
