pub mod core {
    pub mod clock;
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod library;
    pub mod repository;
    pub mod seed;
}

pub mod utils {
    pub mod date;
    pub mod ddb;
    pub mod memory;
}

pub mod materials;
pub mod patrons;
pub mod checkout;
