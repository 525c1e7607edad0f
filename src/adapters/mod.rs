//! Adapter implementations for the image generator port.
//!
//! - `live/`: Imagen and Gemini over the Generative Language API
//! - `recording/`: wrap a live adapter and record outcomes to a cassette
//! - `replaying/`: serve outcomes back from a cassette

pub mod live;
pub mod recording;
pub mod replaying;
