// Contact form proxy: validates a submission and relays it as an email.

pub mod handlers;
pub mod models;
