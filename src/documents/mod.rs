mod game;
mod genre;
mod platform;

pub use game::Game;
pub use genre::Genre;
pub use platform::Platform;
