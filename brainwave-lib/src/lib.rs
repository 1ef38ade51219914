pub mod brain;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod framer;
pub mod packet;
pub mod reading;
pub mod source;
pub mod stream;

#[cfg(test)]
mod tests;

// Re-export the main types for easy access
pub use brain::Brain;
pub use decoder::PayloadDecoder;
pub use error::{BrainError, DecodeError};
pub use framer::{AssemblerState, FrameAssembler, FrameEvent};
pub use packet::{FrameBuffer, PayloadBuilder, Tag, checksum, encode_frame};
pub use reading::{DecodedReading, EegBand, EegPower};
pub use source::{ByteSource, ReaderSource};
pub use stream::{StepResult, StreamDecoder, StreamStats};
