pub mod articles;
pub mod farmers;
pub mod master_data;
pub mod overview;
pub mod policies;
