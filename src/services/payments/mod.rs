//! 결제 게이트웨이 (Razorpay)

pub mod razorpay_client;
pub mod payment_service;

pub use razorpay_client::RazorpayClient;
pub use payment_service::PaymentService;
