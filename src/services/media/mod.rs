//! 이미지 호스팅 (Cloudinary)

pub mod cloudinary_client;
pub mod image_service;

pub use cloudinary_client::CloudinaryClient;
pub use image_service::ImageService;
