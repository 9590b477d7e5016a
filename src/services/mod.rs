/// Business logic independent of file formats and mail transports
pub mod birthday_service;
