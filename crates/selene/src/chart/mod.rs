pub mod natal;

pub use natal::NatalChart;
