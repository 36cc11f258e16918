pub mod lookup;
pub mod panels;
pub mod plot;
pub mod table;
