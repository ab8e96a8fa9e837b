pub mod capture;
pub mod wav;

pub use capture::{AudioRecorder, CHANNELS, CHUNK_SIZE, SAMPLE_RATE};
pub use wav::write_wav;
