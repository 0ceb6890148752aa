pub mod api;
pub mod config;
pub mod domain {
    pub mod payment;
    pub mod session;
}
pub mod error;
pub mod flow {
    pub mod driver;
    pub mod poller;
    pub mod state;
}
pub mod validate;
