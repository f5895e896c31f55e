pub mod console;
pub mod spinner;
