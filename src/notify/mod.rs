//! Outbound notifications: transports, copy and fan-out planning.

pub mod fanout;
pub mod templates;
pub mod transport;

pub use fanout::{
    FanoutPlan, NOTIFICATION_BOOKING_ACCEPTED, NOTIFICATION_SESSION_START,
    NOTIFICATION_SUITABLE_JOB,
};
pub use transport::{
    Email, HttpMailer, HttpPushTransport, HttpSmsTransport, Mailer, NotifyError, PushMessage,
    PushSound, PushTransport, SmsTransport,
};
