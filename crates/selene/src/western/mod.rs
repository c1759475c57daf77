pub mod houses;
pub mod signs;

pub use houses::{
    house_life_area, house_meaning, locate_house, whole_sign_house, HousePlacement,
};
pub use signs::{get_sign_index, normalize_longitude, ZodiacSign};
