pub mod io;

pub use io::{AudioDecoder, AudioTrack};
