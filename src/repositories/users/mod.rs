//! 사용자 계정과 배송 정보 리포지토리

pub mod user_repo;
pub mod user_details_repo;

pub use user_repo::UserRepository;
pub use user_details_repo::UserDetailsRepository;
