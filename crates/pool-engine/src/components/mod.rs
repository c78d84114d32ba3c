pub mod ball;
pub mod table_box;
