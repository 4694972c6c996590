pub mod export;
pub mod poller;
pub mod status;

pub use poller::GuestListPoller;
pub use status::StatusTransitionHandler;
