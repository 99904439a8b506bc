pub mod checkout_material_cmd;
pub mod query_checkouts_cmd;
pub mod return_material_cmd;
pub mod settle_payments_cmd;
