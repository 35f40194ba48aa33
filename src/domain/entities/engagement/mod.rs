//! 고객 참여 엔티티 (리뷰, 피드백, 문의)

pub mod review;
pub mod feedback;
pub mod message;
