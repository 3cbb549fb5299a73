// Low-level helpers shared by the tag readers
pub mod encoding;
pub mod io;
