pub mod font;
pub mod io;
pub mod ttf;

pub(crate) mod os;
