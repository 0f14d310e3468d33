use crate::networking::v2::API_VERSION;
use crate::session::ServiceClient;

const RESOURCE_PATH: &str = "ports";

fn resource_url(client: &ServiceClient, id: &str) -> String {
    client.service_url(&[API_VERSION, RESOURCE_PATH, id])
}

fn root_url(client: &ServiceClient) -> String {
    client.service_url(&[API_VERSION, RESOURCE_PATH])
}

pub fn list_url(client: &ServiceClient) -> String {
    root_url(client)
}

pub fn get_url(client: &ServiceClient, id: &str) -> String {
    resource_url(client, id)
}

pub fn create_url(client: &ServiceClient) -> String {
    root_url(client)
}

pub fn update_url(client: &ServiceClient, id: &str) -> String {
    resource_url(client, id)
}

pub fn delete_url(client: &ServiceClient, id: &str) -> String {
    resource_url(client, id)
}
