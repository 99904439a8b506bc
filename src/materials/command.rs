pub mod add_material_cmd;
pub mod get_material_cmd;
pub mod query_materials_cmd;
pub mod query_reference_cmd;
pub mod remove_material_cmd;
