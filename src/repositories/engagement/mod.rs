//! 리뷰, 피드백, 문의 메시지 리포지토리

pub mod review_repo;
pub mod feedback_repo;
pub mod message_repo;

pub use review_repo::ReviewRepository;
pub use feedback_repo::FeedbackRepository;
pub use message_repo::MessageRepository;
