/// The root of a single service's API. Resource URL builders append to the endpoint verbatim,
/// the endpoint is never validated or rewritten here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceClient {
    endpoint: String,
}

impl ServiceClient {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Join path parts onto the endpoint with `/`.
    pub fn service_url(&self, parts: &[&str]) -> String {
        format!("{}{}", self.endpoint, parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_url_is_plain_concatenation() {
        let client = ServiceClient::new("http://localhost:9696/");
        assert_eq!(
            client.service_url(&["v2.0", "networks", "abc"]),
            "http://localhost:9696/v2.0/networks/abc"
        );

        let unslashed = ServiceClient::new("http://localhost:9696");
        assert_eq!(unslashed.service_url(&["v2.0"]), "http://localhost:9696v2.0");
    }
}
