//! Ports are the attachment points between devices and networks.

mod urls;

pub use urls::{create_url, delete_url, get_url, list_url, update_url};
