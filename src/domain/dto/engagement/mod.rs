//! 리뷰, 피드백, 문의 메시지 DTO

pub mod review;
pub mod feedback;
pub mod message;

pub use review::*;
pub use feedback::*;
pub use message::*;
