// Organizer authentication
// Bearer tokens are issued by the platform's identity service; this
// service only verifies them

pub mod jwt;
