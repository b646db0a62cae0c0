pub mod editor;
pub mod prescription;
