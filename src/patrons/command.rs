pub mod add_patron_cmd;
pub mod get_patron_cmd;
pub mod query_patrons_cmd;
pub mod toggle_patron_cmd;
pub mod update_patron_cmd;
