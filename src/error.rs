// Crate error type. Every variant states *where* things went wrong.
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the frame buffer to the window failed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Palette source produced no colors")]
    EmptyPalette,
    #[error("Pixel buffer is {actual:?}, surface expects {expected:?}")]
    BufferSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}
