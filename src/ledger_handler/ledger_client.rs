/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default settings.
///
/// This client is used for making REST API calls to the external ledger
/// service. It sets a fixed timeout and allows easy reuse of the HTTP client
/// infrastructure.
#[derive(Debug)]
pub struct LedgerClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the ledger API, prepended to all endpoint paths.
    base_url: String,
}

impl LedgerClient {
    /// Constructs a new `LedgerClient` with the given base URL.
    ///
    /// This client has a default request timeout of 5 seconds.
    pub fn new(base_url: &str) -> LedgerClient {
        LedgerClient {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
                .unwrap(),
            base_url: String::from(base_url),
        }
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub fn url(&self) -> &str { self.base_url.as_str() }
}
