pub mod assets;
pub mod livestream;
pub mod navigation;
pub mod pages;
pub mod venues;
