//! 리뷰, 피드백, 문의 메시지 서비스

pub mod review_service;
pub mod feedback_service;
pub mod message_service;

pub use review_service::ReviewService;
pub use feedback_service::FeedbackService;
pub use message_service::MessageService;
