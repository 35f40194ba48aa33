//! # User Data Transfer Objects Module
//!
//! `/user`, `/userDetails` 라우터의 요청/응답 본문입니다.
//!
//! ```text
//! users/
//! ├── request.rs    # 회원가입, 로그인, 프로필/비밀번호 수정, 배송 정보
//! └── response.rs   # UserResponse, LoginResponse, UserDetailsResponse
//! ```
//!
//! 응답 DTO는 비밀번호 해시를 절대 포함하지 않습니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
