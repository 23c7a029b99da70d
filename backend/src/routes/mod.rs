pub mod locations;
pub mod skymap;
