pub mod models {
    pub mod errors;
    pub mod events;
    pub mod notifications;
    pub mod profile;
}

pub mod repositories {
    pub mod profile_repository;
}

pub mod services {
    pub mod dispatch_service;
    pub mod firebase_auth;
    pub mod notification_services;
}

pub mod utilities {
    pub mod config;
    pub mod logging;
    pub mod requests;
    pub mod responses;
    #[cfg(any(test, feature = "test-utils"))]
    pub mod test;
}
