pub mod api_url;
pub mod notice;
