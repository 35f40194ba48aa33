//! 사용자 도메인 엔티티

pub mod user;
pub mod user_details;
