pub mod atmosphere;
pub mod cursor;
pub mod field;
pub mod grid;
pub mod neural_wave;
