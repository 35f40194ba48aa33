//! 외부 서비스 요청/응답 타입

pub mod razorpay;
pub mod cloudinary;
