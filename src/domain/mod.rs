pub mod difficulty;
pub mod geometry;
pub mod heading;
pub mod paddle;
pub mod score;
