// Adapters - external system implementations

pub mod download;
pub mod exec_ffmpeg;
pub mod hf_image;
pub mod openverse;
pub mod pexels;

// Re-export adapters
pub use download::MediaDownloader;
pub use exec_ffmpeg::FfmpegRunner;
pub use hf_image::HuggingFaceImageGen;
pub use openverse::{OpenverseAuth, OpenverseClient};
pub use pexels::PexelsClient;
